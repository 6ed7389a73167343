//! The story bundle - a graph plus the items it refers to.

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{NodeId, StoryGraph};
use crate::items::{ItemId, ItemIdError, ItemRegistry};

/// Errors from authoring-time item edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    #[error("unknown item '{0}'")]
    UnknownItem(ItemId),

    #[error("item '{0}' already exists")]
    ItemExists(ItemId),

    #[error("invalid item id: {0}")]
    InvalidId(#[from] ItemIdError),
}

/// Everything authored for one story.
///
/// The run engine reads this and never writes to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub graph: StoryGraph,
    #[serde(default)]
    pub items: ItemRegistry,
}

impl Story {
    /// Create a new empty story.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename an item and rewrite every choice that mentions it.
    ///
    /// Returns the number of choices touched. Issued instances are renamed by
    /// the run side.
    pub fn rename_item(&mut self, old: &ItemId, new: ItemId) -> Result<usize, StoryError> {
        ItemId::parse(new.as_str())?;
        if self.items.contains(&new) {
            return Err(StoryError::ItemExists(new));
        }
        let definition = self
            .items
            .get_mut(old)
            .ok_or_else(|| StoryError::UnknownItem(old.clone()))?;
        definition.item_id = new.clone();

        let mut touched = 0;
        for node in self.graph.nodes_mut() {
            for choice in node.choices.iter_mut().filter(|c| c.mentions_item(old)) {
                if let Some(req) = choice.requirement.as_mut().filter(|r| &r.item_id == old) {
                    req.item_id = new.clone();
                }
                for grant in choice.give.entries.iter_mut().filter(|g| &g.item_id == old) {
                    grant.item_id = new.clone();
                }
                for cost in choice.consume.entries.iter_mut().filter(|c| &c.item_id == old) {
                    cost.item_id = new.clone();
                }
                touched += 1;
            }
        }

        info!("Renamed item {} -> {} ({} choices updated)", old, new, touched);
        Ok(touched)
    }

    /// Delete an item and strip every requirement and effect line naming it.
    ///
    /// Returns the number of choices touched.
    pub fn remove_item(&mut self, item_id: &ItemId) -> Result<usize, StoryError> {
        self.items
            .remove(item_id)
            .ok_or_else(|| StoryError::UnknownItem(item_id.clone()))?;

        let mut touched = 0;
        for node in self.graph.nodes_mut() {
            for choice in node.choices.iter_mut().filter(|c| c.mentions_item(item_id)) {
                if choice
                    .requirement
                    .as_ref()
                    .is_some_and(|r| &r.item_id == item_id)
                {
                    choice.requirement = None;
                }
                choice.give.entries.retain(|g| &g.item_id != item_id);
                choice.consume.entries.retain(|c| &c.item_id != item_id);
                touched += 1;
            }
        }

        info!("Removed item {} ({} choices updated)", item_id, touched);
        Ok(touched)
    }

    /// Shorthand for the graph's entry node.
    pub fn entry_node(&self) -> Option<NodeId> {
        self.graph.entry_node()
    }
}
