// Library for tests to access modules

pub mod config;
pub mod dashboard;
pub mod error;
pub mod history_repo;
pub mod ingest;
pub mod models;
pub mod probe_link;
pub mod projection;
pub mod registry;
pub mod route_repo;
pub mod routes;
pub mod session;

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");
