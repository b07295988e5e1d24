use std::{
    collections::HashSet,
    fmt,
};

use crate::{
    entity::Entity,
    error::ConfigError,
};
use super::*;

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for State {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        state.0
    }
}

impl PartialEq<str> for State {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for State {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Transition {
    pub fn new(source: impl Into<State>, target: impl Into<State>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            description: String::new(),
        }
    }

    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.description = val.into();
        self
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

impl Workflow {
    /// Binds the blueprint to the attribute, validating its declared
    /// states and transitions.
    pub fn new(
        attribute: impl Into<String>,
        blueprint: impl Blueprint + 'static,
    ) -> Result<Self, ConfigError> {
        Self::from_arc(attribute, Arc::new(blueprint))
    }

    pub fn from_arc(
        attribute: impl Into<String>,
        blueprint: Arc<dyn Blueprint>,
    ) -> Result<Self, ConfigError> {
        let attribute = attribute.into();
        let states = blueprint.states();
        if states.is_empty() {
            return Err(ConfigError::EmptyStates(attribute));
        }
        let mut seen = HashSet::new();
        for state in states.iter() {
            if !seen.insert(state) {
                return Err(ConfigError::DuplicateState {
                    workflow: attribute,
                    state: state.to_string(),
                });
            }
        }
        let transitions = blueprint.transitions();
        for transition in transitions.iter() {
            for endpoint in [&transition.source, &transition.target] {
                if !seen.contains(endpoint) {
                    return Err(ConfigError::UndeclaredState {
                        workflow: attribute,
                        state: endpoint.to_string(),
                    });
                }
            }
        }
        log::trace!(
            "workflow `{attribute}` ({}) bound with {} states and {} transitions",
            blueprint.name(),
            states.len(),
            transitions.len(),
        );
        Ok(Self {
            attribute,
            blueprint,
            states,
            transitions,
        })
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute
    }

    pub fn name(&self) -> &str {
        self.blueprint.name()
    }

    pub fn blueprint(&self) -> &dyn Blueprint {
        self.blueprint.as_ref()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_declared(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    pub fn is_legal(&self, source: &State, target: &State) -> bool {
        self.transitions.iter()
            .any(|t| &t.source == source && &t.target == target)
    }

    /// Transitions originating from `source`, in declaration order.
    pub fn transitions_from<'a>(
        &'a self,
        source: &'a State,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions.iter()
            .filter(move |t| &t.source == source)
    }

    pub fn bind<'a>(&'a self, entity: &'a dyn Entity) -> StateMachine<'a> {
        StateMachine::new(self, entity)
    }
}

impl fmt::Debug for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("attribute", &self.attribute)
            .field("blueprint", &self.blueprint.name())
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .finish()
    }
}
