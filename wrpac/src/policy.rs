use std::sync::Arc;
use wrpaccore::{
    permission::PermissionSet,
    role::Role,
    workflow::Transition,
};

/// Resolves authorization requests against the built-in rules of the
/// models and a snapshot of the stored permission records.
///
/// Built-in rules take precedence: a transition rule that is present
/// for any of the actor's roles is final, while built-in action grants
/// are merged with the stored records.  Nothing is granted without a
/// rule, and no failure during evaluation ever grants access.
#[derive(Clone, Debug)]
pub struct Policy {
    pub(crate) permissions: Arc<PermissionSet>,
    pub(crate) guest_role: Role,
    pub(crate) member_role: Role,
    pub(crate) transit_action: Box<str>,
}

/// The transitions an actor may perform, grouped by workflow attribute
/// in the order the workflows are declared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthorizedTransitions(Vec<(String, Vec<Transition>)>);

mod impls;
