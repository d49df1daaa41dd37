/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (CLI, HTTP API)
/// use to interact with the application core.
pub mod dashboard_query_port;

pub use dashboard_query_port::DashboardQueryPort;
