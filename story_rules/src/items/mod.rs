//! Item definitions and the master registry.

mod definition;
mod registry;

pub use definition::*;
pub use registry::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from validating an item id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemIdError {
    #[error("item id is empty")]
    Empty,

    #[error("item id '{0}' may only contain a-z, 0-9, '_' and '-'")]
    InvalidCharacters(String),
}

/// Slug identifying an item definition, e.g. `rusty_key`.
///
/// Deserialization does not validate; ids coming from documents are checked by
/// [`ItemRegistry::register`] and treated as unresolvable otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Validate a slug matching `[a-z0-9_-]+`.
    pub fn parse(raw: &str) -> Result<Self, ItemIdError> {
        if raw.is_empty() {
            return Err(ItemIdError::Empty);
        }
        if !raw.chars().all(is_slug_char) {
            return Err(ItemIdError::InvalidCharacters(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Lowercase and strip everything outside the slug alphabet.
    ///
    /// This is how author input is cleaned while typing; the result may still
    /// be empty.
    pub fn normalize(raw: &str) -> String {
        raw.to_lowercase().chars().filter(|c| is_slug_char(*c)).collect()
    }

    /// Check whether this id is a well-formed slug.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(is_slug_char)
    }

    /// A blank id on a requirement means "no requirement".
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = ItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
