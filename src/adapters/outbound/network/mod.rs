/// Network adapters for external API calls
mod dashboard_server_client;
mod gitlab_client;

pub use dashboard_server_client::DashboardServerClient;
pub use gitlab_client::GitLabClient;
