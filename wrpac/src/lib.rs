//! Workflow aware role and relationship based access control.
//!
//! The [`Policy`] resolves whether an actor may perform an action on an
//! entity, taking into account the current state of every workflow the
//! entity owns, and builds the [`Filter`](wrpaccore::Filter) restricting
//! listings to the entities the actor may act upon.

pub mod builder;
pub mod capability;
pub mod policy;
pub mod scope;

pub mod error {
    pub use wrpaccore::error::*;
}

pub use crate::{
    builder::Builder,
    capability::WorkflowEntity,
    policy::{
        AuthorizedTransitions,
        Policy,
    },
    scope::{
        Admission,
        ScopeBuilder,
    },
};
