//! Core utilities: configuration, logging, web server, keep-alive.

pub mod config;
pub mod keep_alive;
pub mod logging;
pub mod web_server;

// Re-exports for convenience
pub use config::Config;
pub use logging::init_logger;
pub use web_server::{build_router, serve};
