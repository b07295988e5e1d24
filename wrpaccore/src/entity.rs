use crate::{
    error::Error,
    model::Model,
};

/// A single entity instance subject to authorization.
///
/// Implementations adapt whatever storage the host uses; the
/// authorization core only ever reads through this trait.
pub trait Entity {
    /// The model describing this entity's type.
    fn model(&self) -> &Model;
    /// Current value of the named attribute, failing with
    /// [`Error::AttributeMissing`] when the entity has no such field.
    fn attribute(&self, name: &str) -> Result<String, Error>;
    /// Whether the actor identified by `actor` is a member of the named
    /// relationship with this entity (e.g. is its `owner`).
    fn is_related(&self, relationship: &str, actor: &str) -> bool;
}
