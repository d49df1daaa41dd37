/// Domain layer - branch sync status, its policies and pure services
///
/// Nothing in this module performs I/O; platform access and caching
/// live behind the ports.
pub mod domain;
pub mod policies;
pub mod services;
