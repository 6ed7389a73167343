//! # Story Rules
//!
//! The authored side of a branching narrative: the node graph, the choices that
//! connect nodes, the item definitions players can carry, and the confusion
//! mechanic. Everything here is treated as immutable input while a run is in
//! progress; runtime state lives in `run_engine`.

pub mod graph;
pub mod items;
pub mod mechanics;
pub mod story;

pub use graph::*;
pub use items::*;
pub use mechanics::*;
pub use story::*;

/// Outcome of resolving a reference that may dangle.
///
/// Keeps "looked it up and it is gone" distinct from "nothing was asked for".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<T> {
    Found(T),
    Missing,
}

impl<T> Resolved<T> {
    /// Check if the reference resolved.
    pub fn is_found(&self) -> bool {
        matches!(self, Resolved::Found(_))
    }

    /// Check if the reference is broken.
    pub fn is_missing(&self) -> bool {
        matches!(self, Resolved::Missing)
    }

    /// Convert into an `Option`, discarding the distinction.
    pub fn found(self) -> Option<T> {
        match self {
            Resolved::Found(value) => Some(value),
            Resolved::Missing => None,
        }
    }
}

impl<T> From<Option<T>> for Resolved<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Resolved::Found(value),
            None => Resolved::Missing,
        }
    }
}
