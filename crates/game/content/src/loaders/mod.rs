//! Content loaders for reading sheet data from files.
//!
//! Each loader turns one RON/TOML file into a `sheet-core` value. The
//! [`ContentFactory`] ties them to a data directory.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod graph;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use graph::GraphLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
