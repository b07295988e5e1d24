//! Fixtures modelled on a small publishing application.
//!
//! Articles carry a `status` workflow (draft, review, published) and a
//! `flag` workflow (normal, archived), and may be related to users as
//! their `owner` or `author`.  Comments carry no workflow.

use std::sync::Arc;
use wrpaccore::{
    actor::Actor,
    entity::Entity,
    error::Error,
    model::Model,
    role::{
        Role,
        Roles,
    },
    workflow::{
        Blueprint,
        Definition,
        State,
        Transition,
    },
};

pub const ARTICLE: &str = "App\\Models\\Article";
pub const COMMENT: &str = "App\\Models\\Comment";

/// The publication workflow.
///
/// Administrators may always publish from review and interns may never
/// move an article; everything else is left to the stored records.
/// Published articles may be viewed by everybody.
pub struct Status;

impl Blueprint for Status {
    fn name(&self) -> &str {
        "publication"
    }

    fn states(&self) -> Vec<State> {
        ["draft", "review", "published"].into_iter()
            .map(State::from)
            .collect()
    }

    fn transitions(&self) -> Vec<Transition> {
        vec![
            Transition::new("draft", "review").description("Submit for review"),
            Transition::new("review", "draft").description("Send back"),
            Transition::new("review", "published").description("Publish"),
            Transition::new("published", "draft").description("Withdraw"),
        ]
    }

    fn transition_permission(
        &self,
        source: &State,
        target: &State,
        role: &Role,
    ) -> Option<bool> {
        match (source.as_str(), target.as_str(), role.as_str()) {
            ("review", "published", "admin") => Some(true),
            (_, _, "intern") => Some(false),
            _ => None,
        }
    }

    fn action_permissions(
        &self,
        action: &str,
        state: &State,
    ) -> Option<Roles> {
        (action == "view" && state == "published")
            .then(|| Roles::from([Role::WILDCARD]))
    }
}

/// The archival workflow, defined through configuration.
pub fn flag() -> Definition {
    serde_json::from_str(r#"{
        "name": "archival",
        "states": ["normal", "archived"],
        "transitions": [
            {"source": "normal", "target": "archived", "description": "Archive"},
            {"source": "archived", "target": "normal", "description": "Restore"}
        ]
    }"#)
        .expect("archival definition is valid")
}

/// Articles with only the `status` workflow.
pub fn status_model() -> Arc<Model> {
    Arc::new(Model::builder(ARTICLE)
        .relationship("owner")
        .relationship("author")
        .workflow("status", Status)
        .build()
        .expect("status model is valid"))
}

/// Articles with both the `status` and the `flag` workflows.
pub fn article_model() -> Arc<Model> {
    Arc::new(Model::builder(ARTICLE)
        .relationship("owner")
        .relationship("author")
        .workflow("status", Status)
        .workflow("flag", flag())
        .build()
        .expect("article model is valid"))
}

/// Comments have no workflow; moderators may always delete them.
pub fn comment_model() -> Arc<Model> {
    Arc::new(Model::builder(COMMENT)
        .relationship("author")
        .permit("delete", "moderator")
        .build()
        .expect("comment model is valid"))
}

#[derive(Clone, Debug)]
pub struct User {
    pub name: String,
    pub roles: Roles,
}

impl User {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            roles: Roles::new(),
        }
    }

    pub fn with_roles<const N: usize>(name: &str, roles: [&str; N]) -> Self {
        Self {
            name: name.to_string(),
            roles: Roles::from(roles),
        }
    }
}

impl Actor for User {
    fn identity(&self) -> &str {
        &self.name
    }

    fn roles(&self) -> Roles {
        self.roles.clone()
    }
}

/// An in-memory row of some model.
#[derive(Clone, Debug)]
pub struct Record {
    pub id: i64,
    pub model: Arc<Model>,
    pub attributes: Vec<(String, String)>,
    pub relations: Vec<(String, String)>,
}

impl Record {
    pub fn new(id: i64, model: Arc<Model>) -> Self {
        Self {
            id,
            model,
            attributes: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn set(mut self, attribute: &str, value: &str) -> Self {
        self.attributes.retain(|(name, _)| name != attribute);
        self.attributes.push((attribute.to_string(), value.to_string()));
        self
    }

    pub fn relate(mut self, relationship: &str, actor: &str) -> Self {
        self.relations.push((relationship.to_string(), actor.to_string()));
        self
    }
}

impl Entity for Record {
    fn model(&self) -> &Model {
        &self.model
    }

    fn attribute(&self, name: &str) -> Result<String, Error> {
        self.attributes.iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| Error::AttributeMissing(name.to_string()))
    }

    fn is_related(&self, relationship: &str, actor: &str) -> bool {
        self.relations.iter()
            .any(|(r, a)| r == relationship && a == actor)
    }
}

/// An article at the given states, owned by `owner`.
pub fn article(id: i64, status: &str, flag: &str, owner: &str) -> Record {
    Record::new(id, article_model())
        .set("status", status)
        .set("flag", flag)
        .relate("owner", owner)
}
