/// Shared utilities and error types used across all layers
pub mod error;
mod result;

pub use result::Result;
