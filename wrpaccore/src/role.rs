use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An opaque role identifier.
///
/// Roles are either assigned to an actor directly (e.g. `admin`), or
/// are the name of a relationship between an actor and an entity (e.g.
/// `owner`).  Which kind a given role is depends on the relationships
/// declared by the model under evaluation.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Role(String);

/// A set of roles.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Roles(BTreeSet<Role>);

impl Role {
    /// Matches every actor, anonymous ones included.
    pub const WILDCARD: &'static str = "*";
    /// Carried by the anonymous actor.
    pub const GUEST: &'static str = "guest";
    /// Carried by every actor that is present.
    pub const ANY: &'static str = "any";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn wildcard() -> Self {
        Self::new(Self::WILDCARD)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

mod impls;
