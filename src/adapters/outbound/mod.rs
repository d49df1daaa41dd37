/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod cache;
pub mod console;
pub mod formatters;
pub mod network;
pub mod persistence;
