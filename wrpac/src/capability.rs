use wrpaccore::{
    actor::Actor,
    entity::Entity,
    workflow::{
        StateMachine,
        Transition,
    },
};

use crate::policy::Policy;

/// Workflow access for entities, available to every [`Entity`].
pub trait WorkflowEntity {
    /// The named workflow bound to this entity, or the first declared
    /// workflow when no name is provided.
    fn workflow(&self, what: Option<&str>) -> Option<StateMachine<'_>>;

    /// Every workflow bound to this entity, in declaration order.
    fn workflow_listing(&self) -> Vec<StateMachine<'_>>;

    /// The transitions of the named workflow (or of the first declared
    /// one) the actor is authorized to perform from its current state.
    fn authorized_transitions(
        &self,
        policy: &Policy,
        actor: Option<&dyn Actor>,
        what: Option<&str>,
    ) -> Vec<Transition>;
}

impl<T: Entity> WorkflowEntity for T {
    fn workflow(&self, what: Option<&str>) -> Option<StateMachine<'_>> {
        self.model()
            .workflow(what)
            .map(|workflow| workflow.bind(self))
    }

    fn workflow_listing(&self) -> Vec<StateMachine<'_>> {
        self.model()
            .workflows()
            .iter()
            .map(|workflow| workflow.bind(self))
            .collect()
    }

    fn authorized_transitions(
        &self,
        policy: &Policy,
        actor: Option<&dyn Actor>,
        what: Option<&str>,
    ) -> Vec<Transition> {
        let transitions = policy.transitions(actor, self);
        let listed = match what {
            Some(what) => self.model()
                .workflow(Some(what))
                .and_then(|workflow| transitions.get(workflow.attribute_name())),
            None => transitions.first(),
        };
        listed.map(<[Transition]>::to_vec)
            .unwrap_or_default()
    }
}
