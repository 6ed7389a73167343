//! Story nodes and their identifiers.

use serde::{Deserialize, Serialize};

use super::{Choice, GraphError};

/// Identifier of a story node.
///
/// Ids are positive and handed out by [`NodeAllocator`]; once issued they are
/// never renumbered or reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct NodeId(pub u32);

impl NodeId {
    /// Parse a node id typed by an author, e.g. `"7"` or `"0007"`.
    ///
    /// Blank, non-numeric and zero input yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<u32>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(Self(n)),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for NodeId {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            Err("node ids start at 1".to_string())
        } else {
            Ok(Self(value))
        }
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Monotonic node id source.
///
/// `u32::MAX` is never issued: it only marks an exhausted allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct NodeAllocator {
    next: u32,
}

impl NodeAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next unused id.
    pub fn allocate(&mut self) -> Result<NodeId, GraphError> {
        let id = NodeId(self.next);
        self.next = self
            .next
            .checked_add(1)
            .ok_or(GraphError::IdsExhausted(id))?;
        Ok(id)
    }

    /// Make sure `id` (issued elsewhere, e.g. an import) is never handed out again.
    ///
    /// Fails for an id with no successor.
    pub fn reserve(&mut self, id: NodeId) -> Result<(), GraphError> {
        if id.0 >= self.next {
            self.next = id.0.checked_add(1).ok_or(GraphError::IdsExhausted(id))?;
        }
        Ok(())
    }

    /// The id the next call to [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> NodeId {
        NodeId(self.next)
    }
}

impl TryFrom<u32> for NodeAllocator {
    type Error = String;

    fn try_from(next: u32) -> Result<Self, Self::Error> {
        if next == 0 {
            Err("next node id must be at least 1".to_string())
        } else {
            Ok(Self { next })
        }
    }
}

impl From<NodeAllocator> for u32 {
    fn from(alloc: NodeAllocator) -> Self {
        alloc.next
    }
}

impl Default for NodeAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A single passage of the story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Outgoing edges, in the order the author listed them.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Node {
    /// Create an empty node with the given id.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            title: String::new(),
            body: String::new(),
            choices: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// A node without choices ends the story.
    pub fn is_dead_end(&self) -> bool {
        self.choices.is_empty()
    }

    /// Get a choice on this node by id.
    pub fn choice(&self, id: super::ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }
}
