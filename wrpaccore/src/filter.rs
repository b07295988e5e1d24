use serde::{Deserialize, Serialize};

/// A composable predicate restricting a listing of entities.
///
/// The value is produced per query and carries no hidden state; it is
/// up to the caller to apply it, either in memory via `matches` or by
/// rendering it into a query builder through a [`FilterSink`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Unrestricted; every row is admitted.
    All,
    /// No row is admitted.
    Nothing,
    /// The attribute holds exactly this value.
    Eq {
        attribute: String,
        value: String,
    },
    /// The actor is a member of the named relationship with the row.
    Related {
        relationship: String,
        actor: String,
    },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

/// Translates a [`Filter`] into some other query representation.
pub trait FilterSink {
    type Output;

    fn all(&mut self) -> Self::Output;
    fn nothing(&mut self) -> Self::Output;
    fn equals(&mut self, attribute: &str, value: &str) -> Self::Output;
    fn related(&mut self, relationship: &str, actor: &str) -> Self::Output;
    fn and(&mut self, parts: Vec<Self::Output>) -> Self::Output;
    fn or(&mut self, parts: Vec<Self::Output>) -> Self::Output;
}

mod display;
mod impls;
