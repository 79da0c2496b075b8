//! Content factory for building catalog, rules and graph from data files.

use std::path::{Path, PathBuf};

use sheet_core::{NodeGraph, RulesConfig, Schema, StaticCatalog};
use tracing::{debug, info};

use crate::loaders::{CatalogLoader, ConfigLoader, GraphLoader, LoadResult};

/// Everything a [`sheet_core::SheetEngine`] needs besides the schema.
#[derive(Debug)]
pub struct Content {
    pub catalog: StaticCatalog,
    pub rules: RulesConfig,
    /// `None` means the built-in [`NodeGraph::standard`] layout.
    pub graph: Option<NodeGraph>,
}

impl Content {
    pub fn graph(&self) -> &NodeGraph {
        self.graph.as_ref().unwrap_or(NodeGraph::standard())
    }
}

/// Content factory that loads all sheet content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── catalog.ron
/// ├── rules.toml   (optional)
/// └── graph.ron    (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rule constants from `rules.toml`, or the defaults when absent.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no rules file, using defaults");
            return Ok(RulesConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the mod catalog from `catalog.ron`, validated against `schema`.
    pub fn load_catalog(&self, schema: &Schema) -> LoadResult<StaticCatalog> {
        let path = self.data_dir.join("catalog.ron");
        let mods = CatalogLoader::load(&path)?;
        CatalogLoader::build(mods, schema)
    }

    /// Load a custom node graph from `graph.ron`, if the directory has one.
    pub fn load_graph(&self) -> LoadResult<Option<NodeGraph>> {
        let path = self.data_dir.join("graph.ron");
        if !path.exists() {
            return Ok(None);
        }
        GraphLoader::load(&path).map(Some)
    }

    /// Load catalog, rules and graph in one go.
    pub fn load_all(&self) -> LoadResult<Content> {
        let rules = self.load_rules()?;
        let catalog = self.load_catalog(Schema::standard())?;
        let graph = self.load_graph()?;
        info!(
            data_dir = %self.data_dir.display(),
            mods = catalog.len(),
            custom_graph = graph.is_some(),
            "content loaded"
        );
        Ok(Content {
            catalog,
            rules,
            graph,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let factory = ContentFactory::new("/nonexistent/sheet-data");
        let err = factory.load_catalog(Schema::standard()).unwrap_err();
        assert!(err.to_string().contains("catalog.ron"));
        assert_eq!(factory.load_rules().unwrap(), RulesConfig::default());
        assert!(factory.load_graph().unwrap().is_none());
    }
}
