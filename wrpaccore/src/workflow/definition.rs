use serde::{Deserialize, Serialize};

use crate::role::{
    Role,
    Roles,
};
use super::{
    Blueprint,
    State,
    Transition,
};

/// A built-in rule for a transition.  A `granted` of `false` is an
/// explicit denial for the role, which is distinct from having no rule.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TransitionPermit {
    pub source: State,
    pub target: State,
    pub role: Role,
    pub granted: bool,
}

/// A built-in grant for a non-transition action at a given state.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ActionPermit {
    pub action: String,
    pub state: State,
    pub role: Role,
}

/// A data driven blueprint, typically deserialized from configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Definition {
    pub name: String,
    pub states: Vec<State>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
    #[serde(default)]
    pub transition_permits: Vec<TransitionPermit>,
    #[serde(default)]
    pub action_permits: Vec<ActionPermit>,
}

impl Blueprint for Definition {
    fn name(&self) -> &str {
        &self.name
    }

    fn states(&self) -> Vec<State> {
        self.states.clone()
    }

    fn transitions(&self) -> Vec<Transition> {
        self.transitions.clone()
    }

    fn transition_permission(
        &self,
        source: &State,
        target: &State,
        role: &Role,
    ) -> Option<bool> {
        self.transition_permits.iter()
            .find(|p| &p.source == source && &p.target == target && &p.role == role)
            .map(|p| p.granted)
    }

    fn action_permissions(
        &self,
        action: &str,
        state: &State,
    ) -> Option<Roles> {
        let roles = self.action_permits.iter()
            .filter(|p| p.action == action && &p.state == state)
            .map(|p| p.role.clone())
            .collect::<Roles>();
        (!roles.is_empty()).then_some(roles)
    }
}
