use crate::application::dto::DashboardResponse;
use crate::branch_status::domain::{BranchRecord, BranchStatus, ProjectStatus, SyncState};
use crate::ports::outbound::DashboardFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;

/// Shown in place of a missing pipeline timestamp
pub const NO_PIPELINE_MARKER: &str = "No pipeline found";

/// Shown in place of a missing commit timestamp
pub const NO_COMMIT_MARKER: &str = "No commit found";

const FIXED_HEADERS: [&str; 5] = ["Project", "Branches", "Features", "Open MRs", "main ← develop"];

/// Cell tone used to pick a color when colored output is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Good,
    Bad,
    Muted,
}

struct Cell {
    text: String,
    tone: Tone,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// TableFormatter adapter rendering the dashboard as an aligned text table
///
/// One row per project; one column per branch in `all_branches`. Branch
/// cells show ✅ or ❌ followed by the pipeline and commit timestamps.
pub struct TableFormatter {
    colored: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self { colored: false }
    }

    /// Enables ANSI colors for status cells
    pub fn with_colors(colored: bool) -> Self {
        Self { colored }
    }

    fn sync_cell(state: SyncState) -> Cell {
        let tone = match state {
            SyncState::Synced => Tone::Good,
            SyncState::NotSynced => Tone::Bad,
            SyncState::Unavailable => Tone::Muted,
        };
        Cell {
            text: state.to_string(),
            tone,
        }
    }

    fn branch_cell(record: Option<&BranchRecord>) -> Cell {
        let Some(record) = record else {
            return Cell {
                text: "-".to_string(),
                tone: Tone::Muted,
            };
        };

        let (icon, tone) = match record.status {
            BranchStatus::Synced => ("✅", Tone::Good),
            BranchStatus::NotSynced => ("❌", Tone::Bad),
        };
        Cell {
            text: format!(
                "{} {} / {}",
                icon,
                record.pipeline_timestamp.display_or(NO_PIPELINE_MARKER),
                record.commit_timestamp.display_or(NO_COMMIT_MARKER)
            ),
            tone,
        }
    }

    fn row(project: &ProjectStatus, branches: &[String]) -> Vec<Cell> {
        let bundle = &project.bundle;
        let mut cells = vec![
            Cell::plain(project.identifier.as_str()),
            Cell::plain(bundle.total_branch_count().to_string()),
            Cell::plain(bundle.total_feature_branch_count().to_string()),
            Cell::plain(bundle.open_change_request_count().to_string()),
            Self::sync_cell(bundle.main_synced_to_develop()),
        ];
        cells.extend(
            branches
                .iter()
                .map(|name| Self::branch_cell(bundle.branch(name))),
        );
        cells
    }

    fn paint(&self, cell: &Cell, width: usize) -> String {
        let padded = format!("{:<width$}", cell.text, width = width);
        if !self.colored {
            return padded;
        }
        match cell.tone {
            Tone::Plain => padded,
            Tone::Good => padded.green().to_string(),
            Tone::Bad => padded.red().to_string(),
            Tone::Muted => padded.dimmed().to_string(),
        }
    }

    fn render_line(&self, output: &mut String, cells: &[Cell], widths: &[usize]) {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| self.paint(cell, *width))
            .collect::<Vec<_>>()
            .join(" | ");
        output.push_str(line.trim_end());
        output.push('\n');
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardFormatter for TableFormatter {
    fn format(&self, response: &DashboardResponse) -> Result<String> {
        let mut output = String::new();

        if response.projects.is_empty() {
            output.push_str(&format!(
                "No projects match the current filters ({} configured).\n",
                response.total_projects
            ));
            return Ok(output);
        }

        let header: Vec<Cell> = FIXED_HEADERS
            .iter()
            .map(|h| Cell::plain(*h))
            .chain(response.all_branches.iter().map(|b| Cell::plain(b.as_str())))
            .collect();
        let rows: Vec<Vec<Cell>> = response
            .projects
            .iter()
            .map(|p| Self::row(p, &response.all_branches))
            .collect();

        let mut widths: Vec<usize> = header.iter().map(Cell::width).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let header_line = header
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell.text, width = width))
            .collect::<Vec<_>>()
            .join(" | ");
        if self.colored {
            output.push_str(&header_line.trim_end().bold().to_string());
        } else {
            output.push_str(header_line.trim_end());
        }
        output.push('\n');
        output.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        output.push('\n');

        for row in &rows {
            self.render_line(&mut output, row, &widths);
        }

        output.push_str(&format!(
            "\nShowing {} of {} project(s)\n",
            response.projects.len(),
            response.total_projects
        ));

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch_status::domain::{ProjectIdentifier, StatusBundle, Timestamp};
    use chrono::{TimeZone, Utc};

    fn response() -> DashboardResponse {
        let app = ProjectIdentifier::new("team/app").unwrap();
        let pipeline = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let commit = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let bundle = StatusBundle::available(
            &app,
            4,
            2,
            1,
            SyncState::Synced,
            "https://gitlab.example.com/team/app".to_string(),
            vec![
                BranchRecord {
                    name: "main".to_string(),
                    status: BranchStatus::Synced,
                    pipeline_timestamp: Timestamp::At(pipeline),
                    commit_timestamp: Timestamp::At(commit),
                    pipeline_state: "success".to_string(),
                },
                BranchRecord {
                    name: "develop".to_string(),
                    status: BranchStatus::NotSynced,
                    pipeline_timestamp: Timestamp::NotFound,
                    commit_timestamp: Timestamp::At(commit),
                    pipeline_state: BranchRecord::NO_PIPELINE_STATE.to_string(),
                },
            ],
        );
        let gone = ProjectIdentifier::new("team/gone").unwrap();

        DashboardResponse::new(
            vec![
                ProjectStatus::new(app, bundle),
                ProjectStatus::new(gone.clone(), StatusBundle::unavailable(&gone)),
            ],
            vec!["develop".to_string(), "main".to_string()],
            3,
        )
    }

    #[test]
    fn test_table_contains_header_and_rows() {
        let output = TableFormatter::new().format(&response()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("Project"));
        assert!(lines[0].contains("develop"));
        assert!(lines[2].starts_with("team/app"));
        assert!(lines[3].starts_with("team/gone"));
        assert!(output.contains("Showing 2 of 3 project(s)"));
    }

    #[test]
    fn test_branch_cells_show_markers() {
        let output = TableFormatter::new().format(&response()).unwrap();

        assert!(output.contains("✅ 2024-01-02 10:00:00 / 2024-01-01 09:00:00"));
        assert!(output.contains("❌ No pipeline found / 2024-01-01 09:00:00"));
    }

    #[test]
    fn test_unavailable_project_row() {
        let output = TableFormatter::new().format(&response()).unwrap();
        let gone = output
            .lines()
            .find(|l| l.starts_with("team/gone"))
            .unwrap();

        assert!(gone.contains("N/A"));
        assert!(gone.contains("unavailable"));
    }

    #[test]
    fn test_columns_are_aligned() {
        let output = TableFormatter::new().format(&response()).unwrap();
        let lines: Vec<&str> = output.lines().take(4).collect();
        let separator_positions: Vec<Option<usize>> =
            lines.iter().map(|l| l.find(" | ")).collect();

        assert_eq!(separator_positions[0], separator_positions[2]);
        assert_eq!(separator_positions[2], separator_positions[3]);
    }

    #[test]
    fn test_empty_result_message() {
        let empty = DashboardResponse::new(vec![], vec![], 5);
        let output = TableFormatter::new().format(&empty).unwrap();
        assert_eq!(output, "No projects match the current filters (5 configured).\n");
    }

    #[test]
    fn test_colored_output_contains_ansi_codes() {
        let output = TableFormatter::with_colors(true).format(&response()).unwrap();
        assert!(output.contains("\u{1b}["));
    }
}
