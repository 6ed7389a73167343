//! Item instances held by a player.

use serde::{Deserialize, Serialize};
use story_rules::{ItemId, Uses};

/// Identifier of one issued item instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic instance id source. Never hands out the same id twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceAllocator {
    next: u64,
}

impl InstanceAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }
}

impl Default for InstanceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A single copy of an item with its own remaining uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub instance_id: InstanceId,
    pub item_id: ItemId,
    /// Copied from the definition when issued; later definition edits do not
    /// reach existing instances.
    pub uses_left: Uses,
}

impl ItemInstance {
    pub fn new(instance_id: InstanceId, item_id: ItemId, uses_left: Uses) -> Self {
        Self {
            instance_id,
            item_id,
            uses_left,
        }
    }

    /// A finite instance with no uses left.
    pub fn is_broken(&self) -> bool {
        self.uses_left.is_exhausted()
    }
}
