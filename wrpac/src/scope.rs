//! Listing scopes
//!
//! Rather than checking entities one at a time, the scope builder
//! decides up front, for every declared state of every workflow, how
//! the actor is admitted to entities at that state, and folds those
//! decisions into a single [`Filter`] to be applied to the listing.
//!
//! For instance, an actor who may view every published article but
//! only their own drafts gets
//!
//! ```text
//! (status = "published" OR (status = "draft" AND owner("alice")))
//! ```

use wrpaccore::{
    actor::Actor,
    filter::Filter,
    model::Model,
    role::Roles,
    workflow::{
        State,
        Workflow,
    },
};

use crate::policy::Policy;

/// How an actor is admitted to the entities at some state.
#[derive(Clone, Debug, PartialEq)]
pub enum Admission {
    /// Every entity, through a non-model role or the wildcard.
    Full,
    /// Only the entities the actor is related to through any of these
    /// relationships.
    Related(Vec<String>),
    Denied,
}

pub struct ScopeBuilder<'a> {
    policy: &'a Policy,
    model: &'a Model,
}

impl<'a> ScopeBuilder<'a> {
    pub fn new(policy: &'a Policy, model: &'a Model) -> Self {
        Self { policy, model }
    }

    fn admission_for(
        &self,
        roles: &Roles,
        permitted: &Roles,
        actor: Option<&dyn Actor>,
    ) -> Admission {
        let model = self.model;
        if permitted.has_wildcard() || permitted.iter()
            .any(|role| !model.is_relationship(role.as_str()) && roles.contains(role.as_str()))
        {
            return Admission::Full;
        }
        if actor.is_none() {
            return Admission::Denied;
        }
        let relationships = model.relationships()
            .iter()
            .filter(|relationship| permitted.contains(relationship))
            .cloned()
            .collect::<Vec<_>>();
        if relationships.is_empty() {
            Admission::Denied
        } else {
            Admission::Related(relationships)
        }
    }

    /// The admission of the actor to entities with the workflow at the
    /// given state, or to all entities when no workflow is provided.
    pub fn admission(
        &self,
        action: &str,
        actor: Option<&dyn Actor>,
        context: Option<(&Workflow, &State)>,
    ) -> Admission {
        let roles = self.policy.actor_roles(actor);
        let permitted = self.policy.permitted_roles(self.model, action, context);
        self.admission_for(&roles, &permitted, actor)
    }

    /// Build the filter admitting exactly the entities the actor may
    /// perform `action` on.  When nothing admits the actor the result
    /// is [`Filter::Nothing`], never an absent filter.
    pub fn build(
        &self,
        action: &str,
        actor: Option<&dyn Actor>,
    ) -> Filter {
        let filter = if self.model.has_workflows() {
            self.build_workflows(action, actor)
        } else {
            self.build_plain(action, actor)
        };
        log::debug!(
            "scope for {action} on {}: {filter}",
            self.model.namespace(),
        );
        filter
    }

    fn related(&self, relationships: Vec<String>, actor: Option<&dyn Actor>) -> Vec<Filter> {
        match actor {
            Some(actor) => relationships.into_iter()
                .map(|relationship| Filter::related(relationship, actor.identity()))
                .collect(),
            None => Vec::new(),
        }
    }

    fn build_plain(
        &self,
        action: &str,
        actor: Option<&dyn Actor>,
    ) -> Filter {
        match self.admission(action, actor, None) {
            Admission::Full => Filter::All,
            Admission::Related(relationships) =>
                Filter::any_of(self.related(relationships, actor)),
            Admission::Denied => Filter::Nothing,
        }
    }

    fn build_workflows(
        &self,
        action: &str,
        actor: Option<&dyn Actor>,
    ) -> Filter {
        let mut clauses = Vec::new();
        for workflow in self.model.workflows() {
            let attribute = workflow.attribute_name();
            for state in workflow.states() {
                let admission = self.admission(action, actor, Some((workflow, state)));
                log::trace!("{action} at {attribute}:{state}: {admission:?}");
                match admission {
                    Admission::Full => clauses.push(Filter::equals(attribute, state.as_str())),
                    Admission::Related(relationships) => clauses.extend(
                        self.related(relationships, actor)
                            .into_iter()
                            .map(|related| Filter::all_of(vec![
                                Filter::equals(attribute, state.as_str()),
                                related,
                            ]))
                    ),
                    Admission::Denied => (),
                }
            }
        }
        Filter::any_of(clauses)
    }
}

impl Policy {
    /// The filter restricting a listing of `model` entities to those the
    /// actor may perform `action` on.
    pub fn scope(
        &self,
        model: &Model,
        action: &str,
        actor: Option<&dyn Actor>,
    ) -> Filter {
        ScopeBuilder::new(self, model).build(action, actor)
    }
}
