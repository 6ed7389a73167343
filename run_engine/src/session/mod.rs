//! The run engine - moves a player through a story one choice at a time.
//!
//! A transition runs in a fixed order:
//! 1. **Gate**: the choice must be offered at the current node and selectable
//!    against the state as it is *before* the transition
//! 2. **Confusion**: add the choice's delta, clamped
//! 3. **Give**: issue items, if the give list is enabled
//! 4. **Consume**: spend items, if the consume list is enabled
//! 5. **Move**: jump to the target node, even if it does not exist
//!
//! The gate is the only place a transition can fail, so a rejected call never
//! leaves a half-applied state behind.

mod state;
mod view;

pub use state::*;
pub use view::*;

use log::{debug, info, warn};
use serde::Serialize;
use story_rules::{Choice, ChoiceId, ConfusionStage, ItemId, NodeId, Resolved, Story};

use crate::config::SessionConfig;
use crate::error::RunError;
use crate::inventory::{InstanceId, Inventory};
use crate::requirement;

/// Report of a completed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: NodeId,
    pub choice: ChoiceId,
    pub to: NodeId,
    /// Status after the move; `Dangling` if the target is missing.
    pub status: RunStatus,
    pub stage: ConfusionStage,
    pub issued: Vec<InstanceId>,
    pub consumed_units: u32,
}

/// Stateless rules over a borrowed story. Any number of runs can share one.
#[derive(Debug, Clone)]
pub struct RunEngine<'s> {
    story: &'s Story,
    config: SessionConfig,
}

impl<'s> RunEngine<'s> {
    pub fn new(story: &'s Story, config: SessionConfig) -> Self {
        Self { story, config }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults(story: &'s Story) -> Self {
        Self::new(story, SessionConfig::default())
    }

    pub fn story(&self) -> &'s Story {
        self.story
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The node a run begins at when none is named: the configured start
    /// node, then the author's start node, then the first node.
    pub fn designated_start(&self) -> Option<NodeId> {
        self.config
            .start_node
            .filter(|id| self.story.graph.contains(*id))
            .or_else(|| self.story.entry_node())
    }

    /// Build a fresh run state.
    ///
    /// An explicit node is used as given, even if it does not exist.
    pub fn start(&self, at: Option<NodeId>) -> RunState {
        let node = at.or_else(|| self.designated_start());
        let state = RunState::at(node);
        info!("Run started: {}", state.status(&self.story.graph));
        state
    }

    pub fn status(&self, state: &RunState) -> RunStatus {
        state.status(&self.story.graph)
    }

    /// Check if a choice can be taken from `state`.
    ///
    /// A requirement naming an unregistered item is never met.
    pub fn is_selectable(&self, state: &RunState, choice: &Choice) -> bool {
        if let Some(req) = choice.requirement.as_ref().filter(|r| !r.item_id.is_blank()) {
            if self.story.items.resolve(&req.item_id).is_missing() {
                return false;
            }
        }
        if self.config.lock_dangling_choices && !self.story.graph.contains(choice.to_node) {
            return false;
        }
        requirement::is_satisfied(choice.requirement.as_ref(), &state.inventory)
    }

    /// Take a choice at the current node.
    pub fn activate_choice(
        &self,
        state: &mut RunState,
        choice_id: ChoiceId,
    ) -> Result<Transition, RunError> {
        let from = match self.status(state) {
            RunStatus::AtNode(id) => id,
            other => {
                warn!("Rejected choice {}: {}", choice_id, other);
                return Err(RunError::NotAtNode(other));
            }
        };
        let node = match self.story.graph.resolve(from) {
            Resolved::Found(node) => node,
            Resolved::Missing => return Err(RunError::NotAtNode(RunStatus::Dangling(from))),
        };
        let choice = node
            .choice(choice_id)
            .ok_or(RunError::UnknownChoice(choice_id))?;
        if !self.is_selectable(state, choice) {
            warn!("Rejected choice {} at node {}: locked", choice_id, from);
            return Err(RunError::ChoiceLocked(choice_id));
        }

        state.confusion = state.confusion.apply_delta(choice.confusion_delta);

        let mut issued = Vec::new();
        for grant in choice.give.effective() {
            issued.extend(
                state
                    .inventory
                    .give(&self.story.items, &grant.item_id, grant.count),
            );
        }

        let mut consumed_units = 0;
        for cost in choice.consume.effective() {
            let outcome = state
                .inventory
                .consume(&self.story.items, &cost.item_id, cost.amount);
            if outcome.is_partial() {
                debug!(
                    "Partial consume of {}: {} of {}",
                    cost.item_id, outcome.consumed, outcome.requested
                );
            }
            consumed_units += outcome.consumed;
        }

        state.current_node = Some(choice.to_node);
        let status = self.status(state);
        match status {
            RunStatus::Dangling(to) => {
                warn!("Choice {} at node {} leads to missing node {}", choice_id, from, to)
            }
            _ => info!("Node {} -> {} via \"{}\"", from, choice.to_node, choice.text),
        }

        Ok(Transition {
            from,
            choice: choice_id,
            to: choice.to_node,
            status,
            stage: state.confusion.stage(),
            issued,
            consumed_units,
        })
    }

    /// Derive the renderable view. Pure: never touches `state`.
    pub fn view(&self, state: &RunState) -> RunView {
        let (scene, choices) = match self.status(state) {
            RunStatus::NoStart => (Scene::NoStart, Vec::new()),
            RunStatus::Dangling(id) => (Scene::Missing { id }, Vec::new()),
            RunStatus::AtNode(id) => match self.story.graph.resolve(id) {
                Resolved::Found(node) => {
                    let choices = node
                        .choices
                        .iter()
                        .map(|choice| ChoiceView {
                            id: choice.id,
                            label: choice.text.clone(),
                            selectable: self.is_selectable(state, choice),
                        })
                        .collect();
                    let scene = Scene::Node(NodeView {
                        id: node.id,
                        title: node.title.clone(),
                        body: node.body.clone(),
                    });
                    (scene, choices)
                }
                Resolved::Missing => (Scene::Missing { id }, Vec::new()),
            },
        };

        RunView {
            scene,
            choices,
            stage: state.confusion.stage(),
            inventory: self.inventory_lines(&state.inventory),
        }
    }

    fn inventory_lines(&self, inventory: &Inventory) -> Vec<InventoryLine> {
        inventory
            .instances()
            .iter()
            .map(|instance| {
                let name = match self.story.items.resolve(&instance.item_id) {
                    Resolved::Found(def) => def.label().to_string(),
                    Resolved::Missing => instance.item_id.to_string(),
                };
                InventoryLine {
                    instance_id: instance.instance_id,
                    item_id: instance.item_id.clone(),
                    name,
                    uses_left: instance.uses_left,
                    broken: instance.is_broken(),
                }
            })
            .collect()
    }
}

/// One player's session: an engine plus the single run it owns.
///
/// All mutation goes through `&mut self`, so a session has exactly one writer.
#[derive(Debug, Clone)]
pub struct RunSession<'s> {
    engine: RunEngine<'s>,
    state: Option<RunState>,
}

impl<'s> RunSession<'s> {
    /// Create a session with no run in progress.
    pub fn new(story: &'s Story, config: SessionConfig) -> Self {
        Self {
            engine: RunEngine::new(story, config),
            state: None,
        }
    }

    /// Begin or reset the run. Instance ids keep counting from the previous run.
    pub fn start(&mut self, at: Option<NodeId>) -> &RunState {
        let mut fresh = self.engine.start(at);
        if let Some(previous) = &self.state {
            fresh.inventory = Inventory::continuing(previous.inventory.allocator());
        }
        self.state.insert(fresh)
    }

    /// Reset to the designated start node.
    pub fn restart(&mut self) -> &RunState {
        info!("Run restarted");
        self.start(None)
    }

    pub fn activate_choice(&mut self, choice_id: ChoiceId) -> Result<Transition, RunError> {
        let state = self.state.as_mut().ok_or(RunError::NoActiveSession)?;
        self.engine.activate_choice(state, choice_id)
    }

    pub fn view(&self) -> Result<RunView, RunError> {
        let state = self.state.as_ref().ok_or(RunError::NoActiveSession)?;
        Ok(self.engine.view(state))
    }

    pub fn status(&self) -> Result<RunStatus, RunError> {
        let state = self.state.as_ref().ok_or(RunError::NoActiveSession)?;
        Ok(self.engine.status(state))
    }

    /// Presentation-only confusion bucket.
    pub fn confusion_stage(&self) -> Result<ConfusionStage, RunError> {
        let state = self.state.as_ref().ok_or(RunError::NoActiveSession)?;
        Ok(state.confusion_stage())
    }

    pub fn state(&self) -> Option<&RunState> {
        self.state.as_ref()
    }

    pub fn engine(&self) -> &RunEngine<'s> {
        &self.engine
    }

    /// Follow an author's item rename into held instances.
    pub fn rename_item(&mut self, old: &ItemId, new: &ItemId) -> usize {
        self.state
            .as_mut()
            .map(|s| s.inventory.rename_item(old, new))
            .unwrap_or(0)
    }

    /// Follow an author's item deletion into held instances.
    pub fn forget_item(&mut self, item_id: &ItemId) -> usize {
        self.state
            .as_mut()
            .map(|s| s.inventory.forget_item(item_id))
            .unwrap_or(0)
    }

    /// End the session.
    pub fn end(&mut self) -> Option<RunState> {
        self.state.take()
    }
}
