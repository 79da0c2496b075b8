//! The node graph: every slot on a character sheet and its placement rules.
//!
//! A node accepts mods of its category whose type (or id) it lists. A node
//! is *free* when it is empty, reachable, and its hard requirement is met.
//! Reachability is a one-hop check against the currently filled nodes: a
//! node connected to [`ENTRY_NODE`] is always reachable, any other node needs
//! at least one filled neighbour. Nothing is cached; every call re-reads the
//! character's node map.
mod layout;

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::catalog::{Mod, ModCategory};
use crate::error::GraphError;
use crate::sheet::{CharacterRecord, NodeMap};

/// Sentinel connection marking a node as reachable from the start.
pub const ENTRY_NODE: &str = "entry_node";

/// A single slot on the character sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub location_id: String,
    pub display_name: String,
    pub category: ModCategory,
    #[serde(default)]
    pub allowed_types: BTreeSet<String>,
    #[serde(default)]
    pub allowed_mods: BTreeSet<String>,
    /// Secondary type codes accepted in addition to `allowed_types`.
    #[serde(default)]
    pub extra_types: BTreeSet<String>,
    #[serde(default)]
    pub connections: BTreeSet<String>,
    /// Mod ids that must be on the character before this node opens.
    #[serde(default)]
    pub requirement: Vec<String>,
    /// Written only by the housekeeping pass, never by players or replay.
    #[serde(default)]
    pub managed: bool,
}

impl Node {
    pub fn new(
        location_id: impl Into<String>,
        display_name: impl Into<String>,
        category: ModCategory,
    ) -> Self {
        Self {
            location_id: location_id.into(),
            display_name: display_name.into(),
            category,
            allowed_types: BTreeSet::new(),
            allowed_mods: BTreeSet::new(),
            extra_types: BTreeSet::new(),
            connections: BTreeSet::new(),
            requirement: Vec::new(),
            managed: false,
        }
    }

    #[must_use]
    pub fn allow_type(mut self, kind: impl Into<String>) -> Self {
        self.allowed_types.insert(kind.into());
        self
    }

    #[must_use]
    pub fn allow_mod(mut self, mod_id: impl Into<String>) -> Self {
        self.allowed_mods.insert(mod_id.into());
        self
    }

    #[must_use]
    pub fn allow_extra_type(mut self, kind: impl Into<String>) -> Self {
        self.extra_types.insert(kind.into());
        self
    }

    #[must_use]
    pub fn connect(mut self, location: impl Into<String>) -> Self {
        self.connections.insert(location.into());
        self
    }

    #[must_use]
    pub fn from_entry(self) -> Self {
        self.connect(ENTRY_NODE)
    }

    #[must_use]
    pub fn require(mut self, mod_id: impl Into<String>) -> Self {
        self.requirement.push(mod_id.into());
        self
    }

    #[must_use]
    pub fn managed(mut self) -> Self {
        self.managed = true;
        self
    }

    /// Category and type/id check for `candidate` at this node.
    ///
    /// A node that lists no types and no ids accepts any mod of its category.
    pub fn accepts(&self, candidate: &Mod) -> bool {
        if candidate.category != self.category {
            return false;
        }
        if self.allowed_types.is_empty()
            && self.allowed_mods.is_empty()
            && self.extra_types.is_empty()
        {
            return true;
        }
        self.allowed_types.contains(&candidate.kind)
            || self.allowed_mods.contains(&candidate.id)
            || self.extra_types.contains(&candidate.kind)
    }

    /// Reachable from the entry sentinel or from a filled neighbour.
    pub fn is_reachable(&self, nodes: &NodeMap) -> bool {
        self.connections
            .iter()
            .any(|target| target == ENTRY_NODE || nodes.get(target).is_some())
    }

    pub fn requirement_met(&self, present: &[&str]) -> bool {
        self.requirement
            .iter()
            .all(|required| present.contains(&required.as_str()))
    }
}

/// Static definition of every node on a character sheet.
#[derive(Clone, Debug)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

static STANDARD: LazyLock<NodeGraph> = LazyLock::new(|| {
    NodeGraph::new(layout::standard_nodes()).unwrap_or_else(|err| {
        // The layout is generated from constants covered by tests.
        unreachable!("standard node layout is inconsistent: {err}")
    })
});

impl NodeGraph {
    /// Builds a graph, rejecting duplicate locations and dangling connections.
    pub fn new(nodes: Vec<Node>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (slot, node) in nodes.iter().enumerate() {
            if index.insert(node.location_id.clone(), slot).is_some() {
                return Err(GraphError::DuplicateLocation(node.location_id.clone()));
            }
        }
        for node in &nodes {
            if let Some(target) = node
                .connections
                .iter()
                .find(|target| *target != ENTRY_NODE && !index.contains_key(*target))
            {
                return Err(GraphError::DanglingConnection {
                    location: node.location_id.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(Self { nodes, index })
    }

    /// The built-in character sheet layout, constructed once.
    pub fn standard() -> &'static NodeGraph {
        &STANDARD
    }

    pub fn node(&self, location: &str) -> Option<&Node> {
        self.index.get(location).map(|&slot| &self.nodes[slot])
    }

    /// Nodes in declaration order (the replay order).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, location: &str) -> bool {
        self.index.contains_key(location)
    }

    /// True iff `candidate` may occupy `location`.
    pub fn is_allowed(&self, candidate: &Mod, location: &str) -> bool {
        self.node(location)
            .is_some_and(|node| node.accepts(candidate))
    }

    /// Locations the character may fill right now.
    pub fn free_locations(&self, character: &CharacterRecord) -> BTreeSet<String> {
        let present = character.nodes.mod_ids();
        self.nodes
            .iter()
            .filter(|node| !node.managed)
            .filter(|node| character.nodes.get(&node.location_id).is_none())
            .filter(|node| node.is_reachable(&character.nodes))
            .filter(|node| node.requirement_met(&present))
            .map(|node| node.location_id.clone())
            .collect()
    }

    /// Nodes of one category in declaration order.
    pub fn by_category(&self, category: ModCategory) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(move |node| node.category == category)
    }
}
