//! Choices - the edges of the story graph and the effects they carry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NodeId;
use crate::items::ItemId;

/// Unique identifier for choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(pub Uuid);

impl ChoiceId {
    /// Create a new random choice ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gate on a choice: the player must hold an item with enough uses left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub item_id: ItemId,
    #[serde(default = "default_min_uses")]
    pub min_uses: u32,
}

fn default_min_uses() -> u32 {
    1
}

impl Requirement {
    /// Require at least one use of `item_id`.
    pub fn item(item_id: ItemId) -> Self {
        Self {
            item_id,
            min_uses: default_min_uses(),
        }
    }

    pub fn with_min_uses(mut self, min_uses: u32) -> Self {
        self.min_uses = min_uses;
        self
    }
}

/// Grant `count` fresh instances of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGrant {
    pub item_id: ItemId,
    pub count: u32,
}

/// Spend `amount` uses of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCost {
    pub item_id: ItemId,
    pub amount: u32,
}

/// A list of effect lines plus the switch that arms it.
///
/// Authors stage entries while the list is disabled; only `enabled` decides
/// whether they apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectList<T> {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,
}

impl<T> EffectList<T> {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            entries: Vec::new(),
        }
    }

    pub fn armed(entries: Vec<T>) -> Self {
        Self {
            enabled: true,
            entries,
        }
    }

    pub fn staged(entries: Vec<T>) -> Self {
        Self {
            enabled: false,
            entries,
        }
    }

    /// Entries that take effect: all of them when enabled, none otherwise.
    pub fn effective(&self) -> &[T] {
        if self.enabled {
            &self.entries
        } else {
            &[]
        }
    }
}

impl<T> Default for EffectList<T> {
    fn default() -> Self {
        Self::disabled()
    }
}

/// An edge from one node to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub id: ChoiceId,
    #[serde(default)]
    pub text: String,
    /// Target node. Not checked at authoring time; may dangle.
    pub to_node: NodeId,
    #[serde(default)]
    pub requirement: Option<Requirement>,
    #[serde(default)]
    pub give: EffectList<ItemGrant>,
    #[serde(default)]
    pub consume: EffectList<ItemCost>,
    #[serde(default)]
    pub confusion_delta: i32,
}

impl Choice {
    /// Create a choice with no requirement and no effects.
    pub fn new(text: impl Into<String>, to_node: NodeId) -> Self {
        Self {
            id: ChoiceId::new(),
            text: text.into(),
            to_node,
            requirement: None,
            give: EffectList::disabled(),
            consume: EffectList::disabled(),
            confusion_delta: 0,
        }
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = Some(requirement);
        self
    }

    /// Arm a give line.
    pub fn with_give(mut self, item_id: ItemId, count: u32) -> Self {
        self.give.enabled = true;
        self.give.entries.push(ItemGrant { item_id, count });
        self
    }

    /// Arm a consume line.
    pub fn with_consume(mut self, item_id: ItemId, amount: u32) -> Self {
        self.consume.enabled = true;
        self.consume.entries.push(ItemCost { item_id, amount });
        self
    }

    /// Replace the give list with entries that are kept but not applied.
    pub fn staged_give(mut self, entries: Vec<ItemGrant>) -> Self {
        self.give = EffectList::staged(entries);
        self
    }

    /// Replace the consume list with entries that are kept but not applied.
    pub fn staged_consume(mut self, entries: Vec<ItemCost>) -> Self {
        self.consume = EffectList::staged(entries);
        self
    }

    pub fn with_confusion_delta(mut self, delta: i32) -> Self {
        self.confusion_delta = delta;
        self
    }

    /// Check if any requirement or effect line refers to `item_id`.
    pub fn mentions_item(&self, item_id: &ItemId) -> bool {
        self.requirement
            .as_ref()
            .is_some_and(|r| &r.item_id == item_id)
            || self.give.entries.iter().any(|g| &g.item_id == item_id)
            || self.consume.entries.iter().any(|c| &c.item_id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ItemId {
        ItemId::parse("key").unwrap()
    }

    #[test]
    fn test_flag_decides_effectiveness() {
        let staged = EffectList::staged(vec![ItemGrant {
            item_id: key(),
            count: 2,
        }]);
        assert!(staged.effective().is_empty());
        assert_eq!(staged.entries.len(), 1);

        let armed: EffectList<ItemGrant> = EffectList::armed(Vec::new());
        assert!(armed.enabled);
        assert!(armed.effective().is_empty());
    }

    #[test]
    fn test_builder_arms_lists() {
        let choice = Choice::new("Take the key", NodeId(2))
            .with_give(key(), 1)
            .with_confusion_delta(2);

        assert!(choice.give.enabled);
        assert!(!choice.consume.enabled);
        assert_eq!(choice.give.effective().len(), 1);
        assert_eq!(choice.confusion_delta, 2);
        assert!(choice.mentions_item(&key()));
    }

    #[test]
    fn test_staged_lists_keep_entries_but_apply_nothing() {
        let choice = Choice::new("Haggle", NodeId(3)).staged_consume(vec![ItemCost {
            item_id: key(),
            amount: 2,
        }]);

        assert!(!choice.consume.enabled);
        assert_eq!(choice.consume.entries.len(), 1);
        assert!(choice.consume.effective().is_empty());
        assert!(choice.mentions_item(&key()));
    }

    #[test]
    fn test_requirement_defaults_to_one_use() {
        let req: Requirement = serde_json::from_str(r#"{ "item_id": "key" }"#).unwrap();
        assert_eq!(req.min_uses, 1);
        assert_eq!(req, Requirement::item(key()));
    }

    #[test]
    fn test_choice_deserializes_with_defaults() {
        let json = r#"{
            "text": "Walk on",
            "to_node": 4,
            "consume": { "entries": [{ "item_id": "key", "amount": 1 }] }
        }"#;
        let choice: Choice = serde_json::from_str(json).unwrap();

        assert_eq!(choice.to_node, NodeId(4));
        assert!(choice.requirement.is_none());
        assert!(!choice.consume.enabled);
        assert_eq!(choice.consume.entries.len(), 1);
        assert_eq!(choice.confusion_delta, 0);
    }
}
