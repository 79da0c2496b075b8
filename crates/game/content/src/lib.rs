//! Data-driven catalog, rules and node graph loaders.
//!
//! This crate reads the static content a character sheet is built from:
//! - The mod catalog (`catalog.ron`)
//! - Rule constants (`rules.toml`)
//! - An optional node graph layout (`graph.ron`) replacing the built-in one
//!
//! Content is read once at startup and never mutated afterwards. All loaders
//! deserialize `sheet-core` types directly through serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, Content, ContentFactory, GraphLoader, LoadResult,
};
