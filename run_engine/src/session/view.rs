//! Renderable snapshot of a run for the presentation layer.

use serde::Serialize;
use story_rules::{ChoiceId, ConfusionStage, ItemId, NodeId, Uses};

use crate::inventory::InstanceId;

/// What the player is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scene {
    /// The story has no nodes.
    NoStart,
    /// A regular node.
    Node(NodeView),
    /// The current id resolves to nothing.
    Missing { id: NodeId },
}

impl Scene {
    pub fn node(&self) -> Option<&NodeView> {
        match self {
            Scene::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Scene::Missing { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub title: String,
    pub body: String,
}

impl NodeView {
    /// Title to display, falling back to the padded node id.
    pub fn heading(&self) -> String {
        if self.title.trim().is_empty() {
            format!("Node {}", self.id)
        } else {
            self.title.clone()
        }
    }
}

/// One choice as offered to the player. How a locked choice looks is up to
/// the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub id: ChoiceId,
    pub label: String,
    pub selectable: bool,
}

/// One held item instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryLine {
    pub instance_id: InstanceId,
    pub item_id: ItemId,
    /// Display name, or the item id when the definition is gone or unnamed.
    pub name: String,
    pub uses_left: Uses,
    pub broken: bool,
}

/// Everything needed to draw the current moment of a run.
///
/// Confusion is exposed only as a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunView {
    pub scene: Scene,
    pub choices: Vec<ChoiceView>,
    pub stage: ConfusionStage,
    pub inventory: Vec<InventoryLine>,
}

impl RunView {
    /// A node with nothing left to choose.
    pub fn is_dead_end(&self) -> bool {
        self.scene.node().is_some() && self.choices.is_empty()
    }

    pub fn selectable_choices(&self) -> impl Iterator<Item = &ChoiceView> {
        self.choices.iter().filter(|c| c.selectable)
    }
}
