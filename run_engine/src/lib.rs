//! # Run Engine
//!
//! Plays a `story_rules::Story`. Given the authored graph and item registry, it
//! keeps one player's run state (current node, inventory, confusion), decides
//! which choices are selectable, applies their effects and hands back a view
//! of where the player stands.
//!
//! ## Core Components
//!
//! - **inventory**: item instances, `give`/`consume` and the depletion policy
//! - **requirement**: the selectability predicate
//! - **session**: the state machine (`RunEngine`, `RunSession`) and its view
//! - **config**: TOML-loadable session settings
//!
//! ## Design Philosophy
//!
//! - **Read-only story**: the engine never writes to the graph or registry
//! - **Explicit state**: a `RunState` is a plain value, so independent runs can
//!   share one story and tests can inspect every step
//! - **Degrade, don't fail**: broken references and short supply are absorbed
//!   inside a transition; only refused calls become errors

pub mod config;
pub mod error;
pub mod inventory;
pub mod requirement;
pub mod session;

pub use config::*;
pub use error::*;
pub use inventory::*;
pub use requirement::is_satisfied;
pub use session::*;
