//! branch-pulse - branch and pipeline sync dashboard for GitLab projects
//!
//! This library aggregates, caches and filters the branch status of many
//! GitLab projects, following hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`branch_status`): Status bundles, sync evaluation and filtering
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): GitLab client, cache, registry, formatters, HTTP API
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use branch_pulse::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! let platform = GitLabClient::new("https://gitlab.com", None, Duration::from_secs(30))?;
//! let cache = Arc::new(InMemoryStatusCache::new(100));
//! let registry = Arc::new(SqliteProjectRegistry::open_in_memory()?);
//!
//! let fetcher = FetchProjectStatusUseCase::new(platform, cache, FetchOptions::default());
//! let aggregator = AggregateStatusesUseCase::new(fetcher, StderrProgressReporter::new(), 4);
//! let dashboard = QueryDashboardUseCase::new(
//!     aggregator,
//!     registry,
//!     vec!["develop".to_string(), "main".to_string()],
//! );
//!
//! let response = dashboard.query(DashboardRequest::default()).await?;
//! println!("{}", TableFormatter::new().format(&response)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod branch_status;
pub mod config;
pub mod logging;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::cache::InMemoryStatusCache;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
    pub use crate::adapters::outbound::network::GitLabClient;
    pub use crate::adapters::outbound::persistence::SqliteProjectRegistry;
    pub use crate::application::dto::{DashboardRequest, DashboardResponse, OutputFormat};
    pub use crate::application::use_cases::{
        AggregateStatusesUseCase, FetchOptions, FetchProjectStatusUseCase, QueryDashboardUseCase,
    };
    pub use crate::branch_status::domain::{
        ProjectIdentifier, ProjectReference, ProjectStatus, StatusBundle, SyncState,
    };
    pub use crate::branch_status::services::{DashboardFilter, SortOrder};
    pub use crate::ports::inbound::DashboardQueryPort;
    pub use crate::ports::outbound::{
        DashboardFormatter, ProgressReporter, ProjectRegistry, SourcePlatform, StatusCache,
    };
    pub use crate::shared::Result;
}
