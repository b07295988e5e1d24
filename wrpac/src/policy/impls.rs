use wrpaccore::{
    actor::{
        applicable_roles,
        Actor,
    },
    entity::Entity,
    error::Error,
    model::Model,
    role::Roles,
    signature::Signature,
    workflow::{
        State,
        StateMachine,
        Workflow,
    },
};

use super::*;

impl AuthorizedTransitions {
    pub fn get(&self, workflow: &str) -> Option<&[Transition]> {
        self.0.iter()
            .find(|(name, _)| name == workflow)
            .map(|(_, transitions)| transitions.as_slice())
    }

    /// Transitions for the first declared workflow.
    pub fn first(&self) -> Option<&[Transition]> {
        self.0.first()
            .map(|(_, transitions)| transitions.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Transition])> {
        self.0.iter()
            .map(|(name, transitions)| (name.as_str(), transitions.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for AuthorizedTransitions {
    type Item = (String, Vec<Transition>);
    type IntoIter = std::vec::IntoIter<(String, Vec<Transition>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Policy {
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn transit_action(&self) -> &str {
        &self.transit_action
    }

    /// Roles the actor carries irrespective of any entity.
    pub fn actor_roles(&self, actor: Option<&dyn Actor>) -> Roles {
        applicable_roles(
            actor,
            self.guest_role.as_str(),
            self.member_role.as_str(),
        )
    }

    fn stored_roles(&self, signature: &Signature) -> Roles {
        let signature = signature.to_string();
        let roles = self.permissions.roles_for(&signature)
            .cloned()
            .unwrap_or_default();
        log::trace!("stored roles for {signature}: {roles}");
        roles
    }

    /// All roles permitted to perform `action`, with the built-in grants
    /// merged with the stored ones.  When a workflow is provided the
    /// roles are those for the workflow being at `state`.
    pub fn permitted_roles(
        &self,
        model: &Model,
        action: &str,
        context: Option<(&Workflow, &State)>,
    ) -> Roles {
        match context {
            Some((workflow, state)) => {
                let mut roles = workflow.blueprint()
                    .action_permissions(action, state)
                    .unwrap_or_default();
                roles |= self.stored_roles(&Signature::state(
                    model.namespace(),
                    workflow.attribute_name(),
                    state.clone(),
                    action,
                ));
                roles
            }
            None => {
                let mut roles = model.permits(action)
                    .cloned()
                    .unwrap_or_default();
                roles |= self.stored_roles(&model.action_signature(action));
                roles
            }
        }
    }

    /// Whether the permitted roles admit the actor for this entity.
    ///
    /// Relationship names among the permitted roles are only satisfied
    /// through the entity, and are resolved only once none of the
    /// actor's own roles matched.
    pub(crate) fn admits(
        &self,
        roles: &Roles,
        permitted: &Roles,
        actor: Option<&dyn Actor>,
        entity: &dyn Entity,
    ) -> bool {
        let model = entity.model();
        if permitted.has_wildcard() {
            return true;
        }
        if permitted.iter()
            .any(|role| !model.is_relationship(role.as_str()) && roles.contains(role.as_str()))
        {
            return true;
        }
        match actor {
            Some(actor) => permitted.iter()
                .filter(|role| model.is_relationship(role.as_str()))
                .any(|role| entity.is_related(role.as_str(), actor.identity())),
            None => false,
        }
    }

    /// Whether the actor may perform `action` on the entity.
    ///
    /// Any failure during evaluation results in a denial.
    pub fn authorize(
        &self,
        action: &str,
        actor: Option<&dyn Actor>,
        entity: &dyn Entity,
    ) -> bool {
        self.check(action, actor, entity)
            .unwrap_or_else(|e| {
                log::warn!("denying {action} on {}: {e}", entity.model().namespace());
                false
            })
    }

    /// The fallible form of [`authorize`](Self::authorize).
    ///
    /// An entity without workflows is checked against the plain action
    /// signature.  Otherwise every workflow is checked at its current
    /// state, and it is sufficient for any one of them to grant access.
    pub fn check(
        &self,
        action: &str,
        actor: Option<&dyn Actor>,
        entity: &dyn Entity,
    ) -> Result<bool, Error> {
        let model = entity.model();
        let roles = self.actor_roles(actor);
        if !model.has_workflows() {
            let permitted = self.permitted_roles(model, action, None);
            return Ok(self.admits(&roles, &permitted, actor, entity));
        }
        for workflow in model.workflows() {
            let state = workflow.bind(entity).current_state()?;
            let permitted = self.permitted_roles(model, action, Some((workflow, &state)));
            if self.admits(&roles, &permitted, actor, entity) {
                log::trace!(
                    "{action} on {} granted through {}:{state}",
                    model.namespace(),
                    workflow.attribute_name(),
                );
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether the actor may move the named workflow of the entity from
    /// its current state to `target`.
    ///
    /// Unknown workflows and illegal transitions are denied like any
    /// other unauthorized request; use
    /// [`check_transition`](Self::check_transition) to tell them apart.
    pub fn authorize_transition(
        &self,
        actor: Option<&dyn Actor>,
        entity: &dyn Entity,
        workflow: &str,
        target: &str,
    ) -> bool {
        deny_on_error(entity, self.check_transition(actor, entity, workflow, target))
    }

    /// The fallible form of [`authorize_transition`](Self::authorize_transition).
    ///
    /// The transition must be legal for the current state before the
    /// actor is considered at all.  Any built-in rule for the actor's
    /// roles is then final - a grant for any role allows, otherwise a
    /// denial for any role denies.  Only when no built-in rule applies
    /// are the stored records for the transition signature consulted.
    pub fn check_transition(
        &self,
        actor: Option<&dyn Actor>,
        entity: &dyn Entity,
        workflow: &str,
        target: &str,
    ) -> Result<bool, Error> {
        let workflow = entity.model()
            .workflow(Some(workflow))
            .ok_or_else(|| Error::NoSuchWorkflow(workflow.to_string()))?;
        self.check_bound_transition(actor, entity, &workflow.bind(entity), target)
    }

    fn check_bound_transition(
        &self,
        actor: Option<&dyn Actor>,
        entity: &dyn Entity,
        machine: &StateMachine<'_>,
        target: &str,
    ) -> Result<bool, Error> {
        let model = entity.model();
        let target = State::from(target);
        let source = machine.transit_source(&target)?;

        let roles = self.actor_roles(actor);
        if let Some(decision) = self.builtin_transition(
            machine, &source, &target, &roles, actor, entity,
        ) {
            log::debug!(
                "built-in rule for {}({}:{source}) -> {target}: {decision}",
                model.namespace(),
                machine.attribute_name(),
            );
            return Ok(decision);
        }

        let permitted = self.stored_roles(&Signature::transition(
            model.namespace(),
            machine.attribute_name(),
            source,
            &*self.transit_action,
            target,
        ));
        Ok(self.admits(&roles, &permitted, actor, entity))
    }

    fn builtin_transition(
        &self,
        machine: &StateMachine<'_>,
        source: &State,
        target: &State,
        roles: &Roles,
        actor: Option<&dyn Actor>,
        entity: &dyn Entity,
    ) -> Option<bool> {
        let model = entity.model();
        let mut denied = false;
        let wildcard = Role::wildcard();
        let direct = roles.iter()
            .filter(|role| !model.is_relationship(role.as_str()))
            .chain(Some(&wildcard));
        for role in direct {
            match machine.transition_permission(source, target, role) {
                Some(true) => return Some(true),
                Some(false) => denied = true,
                None => (),
            }
        }
        if let Some(actor) = actor {
            for relationship in model.relationships() {
                let role = Role::from(relationship.as_str());
                // membership is only resolved when there is a rule for it
                match machine.transition_permission(source, target, &role) {
                    Some(granted) if entity.is_related(relationship, actor.identity()) => {
                        if granted {
                            return Some(true);
                        }
                        denied = true;
                    }
                    _ => (),
                }
            }
        }
        denied.then_some(false)
    }

    /// The transitions leaving the current state of each workflow that
    /// the actor is authorized to perform.  A workflow whose state
    /// cannot be determined lists no transitions.
    pub fn transitions(
        &self,
        actor: Option<&dyn Actor>,
        entity: &dyn Entity,
    ) -> AuthorizedTransitions {
        AuthorizedTransitions(entity.model()
            .workflows()
            .iter()
            .map(|workflow| {
                let name = workflow.attribute_name();
                let machine = workflow.bind(entity);
                let transitions = machine.relevant_transitions()
                    .unwrap_or_else(|e| {
                        log::warn!("no transitions listed for {name}: {e}");
                        Vec::new()
                    })
                    .into_iter()
                    .filter(|transition| deny_on_error(
                        entity,
                        self.check_bound_transition(
                            actor,
                            entity,
                            &machine,
                            transition.target.as_str(),
                        ),
                    ))
                    .cloned()
                    .collect();
                (name.to_string(), transitions)
            })
            .collect())
    }
}

fn deny_on_error(entity: &dyn Entity, result: Result<bool, Error>) -> bool {
    match result {
        Ok(result) => result,
        Err(e @ (Error::NoSuchWorkflow(_) | Error::IllegalTransition { .. })) => {
            log::debug!("denying transition on {}: {e}", entity.model().namespace());
            false
        }
        Err(e) => {
            log::warn!("denying transition on {}: {e}", entity.model().namespace());
            false
        }
    }
}
