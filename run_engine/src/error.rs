//! Errors surfaced by the run engine.
//!
//! Broken references and short supply are not errors; they degrade inside a
//! transition. What ends up here is a call the engine refuses before touching
//! any state.

use story_rules::ChoiceId;
use thiserror::Error;

use crate::session::RunStatus;

/// Rejected session calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("no run in progress - call start first")]
    NoActiveSession,

    #[error("cannot take a choice while {0}")]
    NotAtNode(RunStatus),

    #[error("choice {0} is not offered at the current node")]
    UnknownChoice(ChoiceId),

    #[error("choice {0} is locked")]
    ChoiceLocked(ChoiceId),
}
