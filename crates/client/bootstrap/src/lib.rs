//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, content loading and service assembly that
//! can be reused by the CLI or any other front-end crate.
pub mod builder;
pub mod config;
pub mod dirs;

pub use builder::{ServiceBuilder, ServiceSetup};
pub use config::AppConfig;
