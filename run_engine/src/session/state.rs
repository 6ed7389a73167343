//! Run state - the only thing a run ever mutates.

use serde::{Deserialize, Serialize};
use story_rules::{Confusion, ConfusionStage, NodeId, StoryGraph};

use crate::inventory::Inventory;

/// Where a run currently stands relative to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// The story has no nodes to start from.
    NoStart,
    /// Normal play.
    AtNode(NodeId),
    /// The current id points at no node. Reached through a broken choice or
    /// an explicit start at a missing node.
    Dangling(NodeId),
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::NoStart => f.write_str("the story has no nodes"),
            RunStatus::AtNode(id) => write!(f, "at node {}", id),
            RunStatus::Dangling(id) => write!(f, "node {} is missing", id),
        }
    }
}

/// A player's progress through one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub current_node: Option<NodeId>,
    pub inventory: Inventory,
    pub confusion: Confusion,
}

impl RunState {
    /// Fresh state at `node` with empty pockets and no confusion.
    pub fn at(node: Option<NodeId>) -> Self {
        Self {
            current_node: node,
            inventory: Inventory::new(),
            confusion: Confusion::calm(),
        }
    }

    /// Classify the current node against a graph.
    pub fn status(&self, graph: &StoryGraph) -> RunStatus {
        match self.current_node {
            None => RunStatus::NoStart,
            Some(id) if graph.contains(id) => RunStatus::AtNode(id),
            Some(id) => RunStatus::Dangling(id),
        }
    }

    pub fn confusion_stage(&self) -> ConfusionStage {
        self.confusion.stage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        let mut graph = StoryGraph::new();
        let hall = graph.add_node("Hall", "").unwrap();

        assert_eq!(RunState::at(None).status(&graph), RunStatus::NoStart);
        assert_eq!(RunState::at(Some(hall)).status(&graph), RunStatus::AtNode(hall));
        assert_eq!(
            RunState::at(Some(NodeId(77))).status(&graph),
            RunStatus::Dangling(NodeId(77))
        );
    }

    #[test]
    fn test_fresh_state() {
        let state = RunState::at(Some(NodeId(1)));
        assert!(state.inventory.is_empty());
        assert_eq!(state.confusion.value(), 0);
        assert_eq!(state.confusion_stage(), ConfusionStage::Calm);
    }
}
