use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::role::{
    Role,
    Roles,
};

mod definition;
mod engine;
mod impls;

pub use definition::{
    ActionPermit,
    Definition,
    TransitionPermit,
};
pub use engine::StateMachine;

/// A workflow state.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct State(String);

/// A legal edge between two declared states of a workflow.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Transition {
    pub source: State,
    /// The target workflow state
    pub target: State,
    /// A description of the goal of this transition
    #[serde(default)]
    pub description: String,
}

/// The static definition of a workflow.
///
/// Implementations declare the states (the first one being the initial
/// state) and the legal transitions between them.  The two permission
/// hooks provide the built-in rules; by default they have no opinion,
/// leaving everything to the stored permission records.
pub trait Blueprint: Send + Sync {
    /// Identifies the blueprint independently of the attribute it is
    /// bound to.
    fn name(&self) -> &str;
    fn states(&self) -> Vec<State>;
    fn transitions(&self) -> Vec<Transition>;

    /// Built-in decision for `role` moving from `source` to `target`.
    /// `None` defers to the stored records.
    fn transition_permission(
        &self,
        _source: &State,
        _target: &State,
        _role: &Role,
    ) -> Option<bool> {
        None
    }

    /// Built-in roles permitted to perform `action` while in `state`.
    fn action_permissions(
        &self,
        _action: &str,
        _state: &State,
    ) -> Option<Roles> {
        None
    }
}

/// A validated blueprint bound to the attribute holding its state.
#[derive(Clone)]
pub struct Workflow {
    attribute: String,
    blueprint: Arc<dyn Blueprint>,
    states: Vec<State>,
    transitions: Vec<Transition>,
}
