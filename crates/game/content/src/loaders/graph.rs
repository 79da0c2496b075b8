//! Node graph loader.
//!
//! A data directory may carry its own `graph.ron` to replace the built-in
//! sheet layout, for house rules or test fixtures.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sheet_core::{Node, NodeGraph};

use crate::loaders::{LoadResult, read_file};

/// Graph layout structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphLayout {
    nodes: Vec<Node>,
}

/// Loader for node graphs from RON files.
pub struct GraphLoader;

impl GraphLoader {
    pub fn load(path: &Path) -> LoadResult<NodeGraph> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<NodeGraph> {
        let layout: GraphLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse node graph RON: {}", e))?;
        Ok(NodeGraph::new(layout.nodes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_small_layout() {
        let graph = GraphLoader::parse(
            r#"(
                nodes: [
                    (
                        location_id: "breed_n0",
                        display_name: "Breed",
                        category: breed,
                        allowed_types: ["brd"],
                        connections: ["entry_node"],
                    ),
                    (
                        location_id: "trait_n0",
                        display_name: "Trait 1",
                        category: trait,
                        allowed_types: ["trt"],
                        connections: ["breed_n0"],
                        requirement: ["b_hulk"],
                    ),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(graph.len(), 2);
        let node = graph.node("trait_n0").unwrap();
        assert!(node.connections.contains("breed_n0"));
        assert_eq!(node.requirement, ["b_hulk".to_string()]);
        assert!(!node.managed);
    }

    #[test]
    fn dangling_connection_is_an_error() {
        let err = GraphLoader::parse(
            r#"(
                nodes: [
                    (
                        location_id: "trait_n0",
                        display_name: "Trait 1",
                        category: trait,
                        connections: ["nowhere_n0"],
                    ),
                ],
            )"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("nowhere_n0"));
    }
}
