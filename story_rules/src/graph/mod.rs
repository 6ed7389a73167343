//! The story graph - nodes connected by choices.
//!
//! Edges live inside [`Choice`]s rather than in a separate adjacency list, so a
//! choice may point at a node that was never created or has since been removed.
//! The graph tolerates that; resolution reports it as [`Resolved::Missing`].

mod choice;
mod node;

pub use choice::*;
pub use node::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Resolved;

/// Errors from editing or loading a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("no node id can be issued after {0}")]
    IdsExhausted(NodeId),
}

/// All authored nodes, in authoring order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphDocument")]
pub struct StoryGraph {
    nodes: Vec<Node>,

    /// Explicit entry point chosen by the author.
    start_node: Option<NodeId>,

    next_node_id: NodeAllocator,
}

/// Serialized shape of a graph. Loading always moves the allocator past
/// every node present, whatever the document claims.
#[derive(Deserialize)]
struct GraphDocument {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    start_node: Option<NodeId>,
    #[serde(default)]
    next_node_id: NodeAllocator,
}

impl TryFrom<GraphDocument> for StoryGraph {
    type Error = GraphError;

    fn try_from(doc: GraphDocument) -> Result<Self, Self::Error> {
        let mut next_node_id = doc.next_node_id;
        for node in &doc.nodes {
            next_node_id.reserve(node.id)?;
        }
        Ok(Self {
            nodes: doc.nodes,
            start_node: doc.start_node,
            next_node_id,
        })
    }
}

impl StoryGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with a freshly allocated id and return that id.
    pub fn add_node(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<NodeId, GraphError> {
        let id = self.next_node_id.allocate()?;
        self.nodes
            .push(Node::new(id).with_title(title).with_body(body));
        Ok(id)
    }

    /// Insert a node that already carries an id (e.g. from an import).
    ///
    /// A node with the same id is replaced in place. The allocator is moved
    /// past the id so it is never issued again.
    pub fn insert_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        let id = node.id;
        self.next_node_id.reserve(id)?;
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(existing) => *existing = node,
            None => self.nodes.push(node),
        }
        Ok(id)
    }

    /// Remove a node. Choices pointing at it are left dangling.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        if self.start_node == Some(id) {
            self.start_node = None;
        }
        Some(self.nodes.remove(index))
    }

    /// Look up a node, reporting a dangling id explicitly.
    pub fn resolve(&self, id: NodeId) -> Resolved<&Node> {
        self.get(id).into()
    }

    /// Get node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Check if a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mark the author's preferred entry point.
    pub fn set_start_node(&mut self, id: Option<NodeId>) {
        self.start_node = id;
    }

    pub fn start_node(&self) -> Option<NodeId> {
        self.start_node
    }

    /// The node a fresh run begins at: the marked start node if it still
    /// exists, otherwise the first authored node.
    pub fn entry_node(&self) -> Option<NodeId> {
        self.start_node
            .filter(|id| self.contains(*id))
            .or_else(|| self.nodes.first().map(|n| n.id))
    }

    /// Choices anywhere in the graph whose target does not resolve.
    pub fn dangling_choices(&self) -> Vec<(NodeId, ChoiceId, NodeId)> {
        let mut dangling = Vec::new();
        for node in &self.nodes {
            for choice in node.choices.iter().filter(|c| !self.contains(c.to_node)) {
                dangling.push((node.id, choice.id, choice.to_node));
            }
        }
        dangling
    }
}
