//! The master item registry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ItemDefinition, ItemId, ItemIdError, Uses};
use crate::Resolved;

/// Errors from registering item definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid item id: {0}")]
    InvalidId(#[from] ItemIdError),

    #[error("item '{0}' is already registered")]
    Duplicate(ItemId),

    #[error("item '{0}' must allow at least one use")]
    ZeroMaxUses(ItemId),
}

/// All item definitions known to a story, in authoring order.
///
/// Loaded documents go through [`register`](ItemRegistry::register) one
/// definition at a time, so they are held to the same checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ItemDefinition>", into = "Vec<ItemDefinition>")]
pub struct ItemRegistry {
    definitions: Vec<ItemDefinition>,
}

impl TryFrom<Vec<ItemDefinition>> for ItemRegistry {
    type Error = RegistryError;

    fn try_from(definitions: Vec<ItemDefinition>) -> Result<Self, Self::Error> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }
}

impl From<ItemRegistry> for Vec<ItemDefinition> {
    fn from(registry: ItemRegistry) -> Self {
        registry.definitions
    }
}

impl ItemRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition after checking its id and use count.
    pub fn register(&mut self, definition: ItemDefinition) -> Result<(), RegistryError> {
        ItemId::parse(definition.item_id.as_str())?;
        if definition.max_uses == Uses::Finite(0) {
            return Err(RegistryError::ZeroMaxUses(definition.item_id));
        }
        if self.contains(&definition.item_id) {
            return Err(RegistryError::Duplicate(definition.item_id));
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Look up the rules for an item.
    pub fn resolve(&self, item_id: &ItemId) -> Resolved<&ItemDefinition> {
        self.get(item_id).into()
    }

    pub fn get(&self, item_id: &ItemId) -> Option<&ItemDefinition> {
        self.definitions.iter().find(|d| &d.item_id == item_id)
    }

    pub fn get_mut(&mut self, item_id: &ItemId) -> Option<&mut ItemDefinition> {
        self.definitions.iter_mut().find(|d| &d.item_id == item_id)
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.get(item_id).is_some()
    }

    /// Remove a definition. Callers are responsible for cascading the removal.
    pub fn remove(&mut self, item_id: &ItemId) -> Option<ItemDefinition> {
        let index = self.definitions.iter().position(|d| &d.item_id == item_id)?;
        Some(self.definitions.remove(index))
    }

    pub fn definitions(&self) -> &[ItemDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
