mod cli;

use anyhow::Context;
use branch_pulse::adapters::inbound::{start_server, AppState};
use branch_pulse::adapters::outbound::cache::InMemoryStatusCache;
use branch_pulse::adapters::outbound::console::{StderrProgressReporter, TracingProgressReporter};
use branch_pulse::adapters::outbound::network::{DashboardServerClient, GitLabClient};
use branch_pulse::adapters::outbound::persistence::SqliteProjectRegistry;
use branch_pulse::application::factories::FormatterFactory;
use branch_pulse::application::use_cases::{
    AggregateStatusesUseCase, FetchProjectStatusUseCase, ManageProjectsUseCase,
    QueryDashboardUseCase,
};
use branch_pulse::config::{discover_config, load_config_from_path, EnvConfig, Settings};
use branch_pulse::logging::{init_logging, LogConfig};
use branch_pulse::ports::inbound::DashboardQueryPort;
use branch_pulse::ports::outbound::{ProgressReporter, ProjectRegistry};
use branch_pulse::shared::error::{DashboardError, ExitCode};
use branch_pulse::shared::Result;
use clap::Parser;
use cli::{CacheCommand, Cli, Command, ProjectsCommand, ServeArgs, StatusArgs};
use std::io::IsTerminal;
use std::process;
use std::sync::Arc;
use tracing::info;

type Dashboard<PR> =
    QueryDashboardUseCase<GitLabClient, InMemoryStatusCache, SqliteProjectRegistry, PR>;

fn main() {
    // clap exits with 2 on invalid arguments and 0 for --help/--version
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    dotenvy::dotenv().ok();
    init_logging(LogConfig::default().verbose(cli.verbose));

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings(&cli)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    match cli.command {
        Command::Status(args) => runtime.block_on(run_status(&settings, &args)),
        Command::Projects(command) => run_projects(&settings, command),
        Command::Cache(CacheCommand::Clear { projects, server }) => {
            runtime.block_on(run_cache_clear(&server, &projects))
        }
        Command::Serve(args) => runtime.block_on(run_serve(&settings, &args)),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let file = match &cli.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => {
            let cwd = std::env::current_dir().context("Failed to read the working directory")?;
            discover_config(&cwd)?
        }
    };

    Settings::resolve(file, EnvConfig::from_env(), cli.overrides())
}

fn open_registry(settings: &Settings) -> Result<Arc<SqliteProjectRegistry>> {
    Ok(Arc::new(SqliteProjectRegistry::open(&settings.registry_path)?))
}

// Wires the adapters into the dashboard use case (dependency injection)
fn build_dashboard<PR: ProgressReporter>(
    settings: &Settings,
    registry: Arc<SqliteProjectRegistry>,
    progress_reporter: PR,
) -> Result<Dashboard<PR>> {
    let platform = GitLabClient::new(
        &settings.gitlab_url,
        settings.private_token.as_deref(),
        settings.request_timeout,
    )?;
    let cache = Arc::new(InMemoryStatusCache::new(settings.cache_capacity));

    let fetcher = FetchProjectStatusUseCase::new(platform, cache, settings.fetch_options());
    let aggregator = AggregateStatusesUseCase::new(
        fetcher,
        progress_reporter,
        settings.max_concurrent_fetches,
    );

    Ok(QueryDashboardUseCase::new(
        aggregator,
        registry,
        settings.default_branches.clone(),
    ))
}

async fn run_status(settings: &Settings, args: &StatusArgs) -> Result<ExitCode> {
    let registry = open_registry(settings)?;
    let dashboard = build_dashboard(settings, registry, StderrProgressReporter::new())?;

    let response = dashboard.query(args.to_request()).await?;

    if response.total_projects == 0 {
        eprintln!("💡 No projects configured yet. Add one with `branch-pulse projects add <group/repo>`.");
    }

    let colored = !args.no_color && std::io::stdout().is_terminal();
    let formatter = FormatterFactory::create(args.format, colored);
    print!("{}", formatter.format(&response)?);

    if args.fail_on_unsynced && response.has_unsynced_projects() {
        eprintln!("\n⚠️  Some listed projects have a primary branch that is not synced.");
        return Ok(ExitCode::UnsyncedProjects);
    }

    Ok(ExitCode::Success)
}

fn run_projects(settings: &Settings, command: ProjectsCommand) -> Result<ExitCode> {
    let projects = ManageProjectsUseCase::new(open_registry(settings)?);

    match command {
        ProjectsCommand::List => {
            let references = projects.list()?;
            if references.is_empty() {
                eprintln!(
                    "No projects configured in {}.",
                    settings.registry_path.display()
                );
            }
            for reference in &references {
                let branches = if reference.configured_branches().is_empty() {
                    format!("{} (defaults)", settings.default_branches.join(","))
                } else {
                    reference.configured_branches().join(",")
                };
                println!("{}\t{}", reference.identifier(), branches);
            }
        }
        ProjectsCommand::Add { name, branches } => {
            let reference = projects.add(&name, branches)?;
            eprintln!("✅ Saved project {}", reference.identifier());
        }
        ProjectsCommand::Remove { name } => {
            if !projects.remove(&name)? {
                return Err(DashboardError::Validation {
                    message: format!("Project '{}' is not configured", name.trim()),
                }
                .into());
            }
            eprintln!("🗑️  Removed project {}", name.trim());
        }
        ProjectsCommand::Import { file } => {
            let count = projects.import_json(&file)?;
            eprintln!("✅ Imported {} project(s) from {}", count, file.display());
        }
    }

    Ok(ExitCode::Success)
}

async fn run_cache_clear(server: &str, projects: &[String]) -> Result<ExitCode> {
    let client = DashboardServerClient::new(server)?;
    let report = client.clear_cache(projects).await?;
    println!(
        "Cleared {} of {} requested project(s) from the cache",
        report.removed, report.requested
    );
    Ok(ExitCode::Success)
}

async fn run_serve(settings: &Settings, args: &ServeArgs) -> Result<ExitCode> {
    let registry = open_registry(settings)?;
    let dashboard = build_dashboard(settings, Arc::clone(&registry), TracingProgressReporter)?;
    let registry_port: Arc<dyn ProjectRegistry> = registry;

    info!(
        gitlab_url = %settings.gitlab_url,
        registry = %settings.registry_path.display(),
        cache_ttl_secs = settings.cache_ttl.as_secs(),
        "starting dashboard server"
    );

    let state = Arc::new(AppState {
        dashboard: Arc::new(dashboard),
        projects: ManageProjectsUseCase::new(registry_port),
    });
    start_server(args.listen, state).await?;

    Ok(ExitCode::Success)
}
