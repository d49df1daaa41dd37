/// Inbound adapters - HTTP API driving the dashboard query port
mod http_api;
mod http_server;

pub use http_api::{api_router, build_router, ApiError, AppState, DashboardQuery, SharedState};
pub use http_server::{start_server, DEFAULT_LISTEN_ADDR};
