//! Item definitions and use counts.

use serde::{Deserialize, Serialize};

use super::ItemId;

/// A use count that is either a number or unlimited.
///
/// Serialized as a plain number or the string `"infinite"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UsesRepr", into = "UsesRepr")]
pub enum Uses {
    Finite(u32),
    Infinite,
}

impl Uses {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Uses::Infinite)
    }

    /// Finite and at zero.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Uses::Finite(0))
    }

    /// Check if at least `n` uses remain.
    pub fn covers(&self, n: u32) -> bool {
        match self {
            Uses::Finite(left) => *left >= n,
            Uses::Infinite => true,
        }
    }

    /// Spend one use. Infinite counts and zero stay where they are.
    pub fn spend_one(self) -> Self {
        match self {
            Uses::Finite(left) => Uses::Finite(left.saturating_sub(1)),
            Uses::Infinite => Uses::Infinite,
        }
    }
}

impl std::fmt::Display for Uses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Uses::Finite(n) => write!(f, "{}", n),
            Uses::Infinite => f.write_str("infinite"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum UsesRepr {
    Count(u32),
    Word(String),
}

impl TryFrom<UsesRepr> for Uses {
    type Error = String;

    fn try_from(repr: UsesRepr) -> Result<Self, Self::Error> {
        match repr {
            UsesRepr::Count(n) => Ok(Uses::Finite(n)),
            UsesRepr::Word(word) if word == "infinite" => Ok(Uses::Infinite),
            UsesRepr::Word(word) => Err(format!(
                "expected a use count or \"infinite\", found \"{}\"",
                word
            )),
        }
    }
}

impl From<Uses> for UsesRepr {
    fn from(uses: Uses) -> Self {
        match uses {
            Uses::Finite(n) => UsesRepr::Count(n),
            Uses::Infinite => UsesRepr::Word("infinite".to_string()),
        }
    }
}

/// Master entry describing the rules of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub item_id: ItemId,
    #[serde(default)]
    pub display_name: String,
    /// Uses each newly issued instance starts with.
    pub max_uses: Uses,
    /// Consumable instances vanish at zero uses; others stay on as broken.
    #[serde(default)]
    pub consumable: bool,
}

impl ItemDefinition {
    /// Create a consumable definition with the given uses.
    pub fn new(item_id: ItemId, max_uses: Uses) -> Self {
        Self {
            item_id,
            display_name: String::new(),
            max_uses,
            consumable: true,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_consumable(mut self, consumable: bool) -> Self {
        self.consumable = consumable;
        self
    }

    /// The name shown to players, falling back to the id.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            self.item_id.as_str()
        } else {
            &self.display_name
        }
    }
}
