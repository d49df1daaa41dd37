use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use branch_pulse::adapters::inbound::DEFAULT_LISTEN_ADDR;
use branch_pulse::application::dto::{DashboardRequest, OutputFormat};
use branch_pulse::branch_status::domain::SyncState;
use branch_pulse::branch_status::services::{DashboardFilter, SortOrder};
use branch_pulse::config::{parse_branch_list, CliOverrides};

/// Server contacted by `cache clear` when `--server` is not given
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Branch and pipeline sync dashboard for GitLab projects
#[derive(Parser, Debug)]
#[command(name = "branch-pulse")]
#[command(version)]
#[command(
    about = "Branch and pipeline sync dashboard for GitLab projects",
    long_about = None
)]
pub struct Cli {
    /// Path to a config file (defaults to ./branch-pulse.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// GitLab base URL (overrides GITLAB_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub gitlab_url: Option<String>,

    /// Path of the project registry database
    #[arg(long, global = true, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the sync status of every configured project
    Status(StatusArgs),

    /// Manage the list of configured projects
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Manage the status cache
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Serve the dashboard as an HTTP JSON API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Case-insensitive substring matched against project path or name
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Only show projects with at least this many feature branches
    #[arg(long, value_name = "N")]
    pub min_feature_branches: Option<usize>,

    /// Only show projects with at most this many open merge requests
    #[arg(long, value_name = "N")]
    pub max_open_mrs: Option<usize>,

    /// Only show projects whose main-to-develop state matches: synced, not-synced or unavailable
    #[arg(long, value_name = "STATE")]
    pub sync_status: Option<SyncState>,

    /// Sort by project name: asc or desc
    #[arg(long, default_value = "asc")]
    pub sort: SortOrder,

    /// Comma-separated branch list used instead of the configured defaults
    #[arg(short, long, value_name = "LIST")]
    pub branches: Option<String>,

    /// Output format: table or json
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colors in table output
    #[arg(long)]
    pub no_color: bool,

    /// Exit with code 1 when a listed project is not synced
    #[arg(long)]
    pub fail_on_unsynced: bool,

    /// Maximum number of projects fetched at once
    #[arg(long, value_name = "N")]
    pub max_concurrent: Option<usize>,
}

impl StatusArgs {
    pub fn to_request(&self) -> DashboardRequest {
        let filter = DashboardFilter {
            search_query: self.search.clone(),
            min_feature_branches: self.min_feature_branches,
            max_open_change_requests: self.max_open_mrs,
            sync_status: self.sync_status,
            sort_order: self.sort,
        };
        DashboardRequest::new(
            filter,
            self.branches.as_deref().map(parse_branch_list),
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCommand {
    /// List configured projects
    List,

    /// Add a project, or replace the branch list of an existing one
    Add {
        /// Full project path, e.g. group/subgroup/repo
        name: String,

        /// Branch to evaluate; repeat for several (defaults apply when omitted)
        #[arg(short, long = "branch", value_name = "BRANCH")]
        branches: Vec<String>,
    },

    /// Remove a project and forget its cached status
    Remove {
        /// Full project path
        name: String,
    },

    /// Import projects from a JSON list of {"name", "branches"} entries
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Ask a running `serve` instance to drop cached status for the given projects
    Clear {
        /// Project paths to clear
        #[arg(required = true)]
        projects: Vec<String>,

        /// Base URL of the running server
        #[arg(long, default_value = DEFAULT_SERVER_URL, value_name = "URL")]
        server: String,
    },
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: SocketAddr,

    /// Status cache lifetime in seconds
    #[arg(long, value_name = "SECONDS")]
    pub cache_ttl: Option<u64>,

    /// Maximum number of projects fetched at once
    #[arg(long, value_name = "N")]
    pub max_concurrent: Option<usize>,
}

impl Cli {
    /// Command-line values that take precedence over env and config file
    pub fn overrides(&self) -> CliOverrides {
        let (max_concurrent_fetches, cache_ttl_secs) = match &self.command {
            Command::Status(args) => (args.max_concurrent, None),
            Command::Serve(args) => (args.max_concurrent, args.cache_ttl),
            _ => (None, None),
        };
        CliOverrides {
            gitlab_url: self.gitlab_url.clone(),
            registry_path: self.registry.clone(),
            max_concurrent_fetches,
            cache_ttl_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_status_defaults() {
        let cli = parse(&["branch-pulse", "status"]);
        let Command::Status(args) = cli.command else {
            panic!("expected status command");
        };
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.sort, SortOrder::Ascending);
        assert!(!args.fail_on_unsynced);

        let request = args.to_request();
        assert_eq!(request.filter, DashboardFilter::default());
        assert!(request.default_branches.is_none());
    }

    #[test]
    fn test_status_filters_map_to_request() {
        let cli = parse(&[
            "branch-pulse",
            "status",
            "--search",
            "app",
            "--min-feature-branches",
            "2",
            "--max-open-mrs",
            "5",
            "--sync-status",
            "not-synced",
            "--sort",
            "desc",
            "--branches",
            "main, develop",
            "--format",
            "json",
        ]);
        let Command::Status(args) = cli.command else {
            panic!("expected status command");
        };
        assert_eq!(args.format, OutputFormat::Json);

        let request = args.to_request();
        assert_eq!(request.filter.search_query.as_deref(), Some("app"));
        assert_eq!(request.filter.min_feature_branches, Some(2));
        assert_eq!(request.filter.max_open_change_requests, Some(5));
        assert_eq!(request.filter.sync_status, Some(SyncState::NotSynced));
        assert_eq!(request.filter.sort_order, SortOrder::Descending);
        assert_eq!(
            request.default_branches,
            Some(vec!["main".to_string(), "develop".to_string()])
        );
    }

    #[test]
    fn test_invalid_sync_status_is_rejected() {
        let result = Cli::try_parse_from(["branch-pulse", "status", "--sync-status", "maybe"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_projects_add_parses_branches() {
        let cli = parse(&[
            "branch-pulse",
            "projects",
            "add",
            "team/app",
            "--branch",
            "develop",
            "-b",
            "main",
        ]);
        match cli.command {
            Command::Projects(ProjectsCommand::Add { name, branches }) => {
                assert_eq!(name, "team/app");
                assert_eq!(branches, vec!["develop", "main"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cache_clear_requires_projects() {
        assert!(Cli::try_parse_from(["branch-pulse", "cache", "clear"]).is_err());
        let cli = parse(&["branch-pulse", "cache", "clear", "team/app", "team/api"]);
        match cli.command {
            Command::Cache(CacheCommand::Clear { projects, server }) => {
                assert_eq!(projects, vec!["team/app", "team/api"]);
                assert_eq!(server, DEFAULT_SERVER_URL);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_overrides() {
        let cli = parse(&[
            "branch-pulse",
            "serve",
            "--gitlab-url",
            "https://gitlab.example.com",
            "--registry",
            "/tmp/projects.db",
            "--cache-ttl",
            "30",
            "--max-concurrent",
            "2",
        ]);
        let overrides = cli.overrides();
        assert_eq!(
            overrides.gitlab_url.as_deref(),
            Some("https://gitlab.example.com")
        );
        assert_eq!(overrides.registry_path, Some(PathBuf::from("/tmp/projects.db")));
        assert_eq!(overrides.cache_ttl_secs, Some(30));
        assert_eq!(overrides.max_concurrent_fetches, Some(2));
    }

    #[test]
    fn test_serve_default_listen_address() {
        let cli = parse(&["branch-pulse", "serve"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.listen.to_string(), DEFAULT_LISTEN_ADDR);
    }
}
