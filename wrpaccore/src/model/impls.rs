use crate::{
    error::ConfigError,
    role::Role,
    signature::Signature,
};
use super::*;

impl Builder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            .. Default::default()
        }
    }

    /// Declare a relationship whose name may be used as a model role.
    pub fn relationship(mut self, val: impl Into<String>) -> Self {
        self.relationships.push(val.into());
        self
    }

    /// Built-in grant of a plain (non-workflow) action to a role.
    pub fn permit(
        mut self,
        action: impl Into<String>,
        role: impl Into<Role>,
    ) -> Self {
        self.permits.entry(action.into())
            .or_default()
            .insert(role);
        self
    }

    pub fn workflow(
        mut self,
        attribute: impl Into<String>,
        blueprint: impl Blueprint + 'static,
    ) -> Self {
        self.workflows.push((attribute.into(), Arc::new(blueprint)));
        self
    }

    pub fn build(self) -> Result<Model, ConfigError> {
        let mut workflows: Vec<Workflow> = Vec::with_capacity(self.workflows.len());
        for (attribute, blueprint) in self.workflows.into_iter() {
            if workflows.iter().any(|w| w.attribute_name() == attribute) {
                return Err(ConfigError::DuplicateWorkflow {
                    namespace: self.namespace,
                    workflow: attribute,
                });
            }
            workflows.push(Workflow::from_arc(attribute, blueprint)?);
        }
        // a blueprint name must not shadow the attribute of another workflow
        for workflow in workflows.iter() {
            if workflows.iter().any(|other| {
                other.attribute_name() != workflow.attribute_name()
                    && other.attribute_name() == workflow.name()
            }) {
                return Err(ConfigError::AmbiguousWorkflow {
                    namespace: self.namespace,
                    workflow: workflow.name().to_string(),
                });
            }
        }
        log::debug!(
            "model `{}` built with {} relationship(s) and {} workflow(s)",
            self.namespace,
            self.relationships.len(),
            workflows.len(),
        );
        Ok(Model {
            namespace: self.namespace,
            relationships: self.relationships,
            permits: self.permits,
            workflows,
        })
    }
}

impl Model {
    pub fn builder(namespace: impl Into<String>) -> Builder {
        Builder::new(namespace)
    }

    /// The fully-qualified type identifier used in signatures.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn relationships(&self) -> &[String] {
        &self.relationships
    }

    /// Whether the role names one of the declared relationships, i.e.
    /// whether it is a model role rather than a non-model role.
    pub fn is_relationship(&self, role: &str) -> bool {
        self.relationships.iter().any(|r| r == role)
    }

    pub fn permits(&self, action: &str) -> Option<&Roles> {
        self.permits.get(action)
    }

    pub fn has_workflows(&self) -> bool {
        !self.workflows.is_empty()
    }

    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    /// Look up a workflow by attribute name, falling back to the
    /// blueprint name; the first declared workflow is returned when no
    /// name is provided.
    pub fn workflow(&self, what: Option<&str>) -> Option<&Workflow> {
        match what {
            Some(what) => self.workflows.iter()
                .find(|w| w.attribute_name() == what)
                .or_else(|| self.workflows.iter().find(|w| w.name() == what)),
            None => self.workflows.first(),
        }
    }

    pub fn action_signature(&self, action: &str) -> Signature {
        Signature::action(&self.namespace, action)
    }

    /// Every signature the action may be checked under, one for each
    /// declared state of each workflow.
    pub fn state_signatures(&self, action: &str) -> Vec<Signature> {
        self.workflows.iter()
            .flat_map(|workflow| workflow.states()
                .iter()
                .map(move |state| Signature::state(
                    &self.namespace,
                    workflow.attribute_name(),
                    state.clone(),
                    action,
                ))
            )
            .collect()
    }

    /// Every signature a transition may be checked under.
    pub fn transition_signatures(&self, transit_action: &str) -> Vec<Signature> {
        self.workflows.iter()
            .flat_map(|workflow| workflow.transitions()
                .iter()
                .map(move |transition| Signature::transition(
                    &self.namespace,
                    workflow.attribute_name(),
                    transition.source.clone(),
                    transit_action,
                    transition.target.clone(),
                ))
            )
            .collect()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: Model) -> Result<Arc<Model>, ConfigError> {
        if self.index.contains_key(model.namespace()) {
            return Err(ConfigError::DuplicateModel(model.namespace));
        }
        log::debug!("registering model `{}`", model.namespace());
        let model = Arc::new(model);
        self.index.insert(model.namespace.clone(), self.models.len());
        self.models.push(model.clone());
        Ok(model)
    }

    pub fn get(&self, namespace: &str) -> Option<&Arc<Model>> {
        self.index.get(namespace)
            .map(|i| &self.models[*i])
    }

    /// Registered models, in registration order.
    pub fn models(&self) -> impl Iterator<Item = &Arc<Model>> {
        self.models.iter()
    }

    /// Registered models that own at least one workflow.
    pub fn workflow_models(&self) -> impl Iterator<Item = &Arc<Model>> {
        self.models.iter()
            .filter(|model| model.has_workflows())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod test {
    use crate::workflow::Definition;
    use super::*;

    fn status() -> anyhow::Result<Definition> {
        Ok(serde_json::from_str(r#"{
            "name": "publication",
            "states": ["draft", "review", "published"],
            "transitions": [
                {"source": "draft", "target": "review"},
                {"source": "review", "target": "published"}
            ]
        }"#)?)
    }

    fn flag() -> anyhow::Result<Definition> {
        Ok(serde_json::from_str(r#"{
            "name": "archival",
            "states": ["normal", "archived"],
            "transitions": [
                {"source": "normal", "target": "archived"}
            ]
        }"#)?)
    }

    #[test]
    fn builder() -> anyhow::Result<()> {
        let model = Model::builder("Article")
            .relationship("owner")
            .relationship("author")
            .permit("list", "admin")
            .permit("list", "owner")
            .workflow("status", status()?)
            .workflow("flag", flag()?)
            .build()?;
        assert_eq!(model.namespace(), "Article");
        assert!(model.is_relationship("owner"));
        assert!(!model.is_relationship("admin"));
        assert_eq!(model.permits("list"), Some(&Roles::from(["admin", "owner"])));
        assert_eq!(model.permits("view"), None);
        assert!(model.has_workflows());
        assert_eq!(model.workflow(None).map(Workflow::attribute_name), Some("status"));
        assert_eq!(model.workflow(Some("flag")).map(Workflow::attribute_name), Some("flag"));
        assert_eq!(model.workflow(Some("archival")).map(Workflow::attribute_name), Some("flag"));
        assert!(model.workflow(Some("missing")).is_none());
        Ok(())
    }

    #[test]
    fn builder_errors() -> anyhow::Result<()> {
        assert_eq!(
            Model::builder("Article")
                .workflow("status", status()?)
                .workflow("status", flag()?)
                .build()
                .expect_err("duplicated workflow"),
            ConfigError::DuplicateWorkflow {
                namespace: "Article".to_string(),
                workflow: "status".to_string(),
            },
        );
        // the `status` blueprint is named after the `flag` workflow
        let mut misnamed = status()?;
        misnamed.name = "flag".to_string();
        assert_eq!(
            Model::builder("Article")
                .workflow("status", misnamed)
                .workflow("flag", flag()?)
                .build()
                .expect_err("blueprint shadows a workflow"),
            ConfigError::AmbiguousWorkflow {
                namespace: "Article".to_string(),
                workflow: "flag".to_string(),
            },
        );
        // a blueprint may share the name of its own workflow
        let mut own = status()?;
        own.name = "status".to_string();
        let model = Model::builder("Article")
            .workflow("status", own)
            .workflow("flag", flag()?)
            .build()?;
        assert_eq!(model.workflow(Some("status")).map(Workflow::attribute_name), Some("status"));

        let mut broken = status()?;
        broken.states.pop();
        assert!(matches!(
            Model::builder("Article")
                .workflow("status", broken)
                .build(),
            Err(ConfigError::UndeclaredState { state, .. }) if state == "published",
        ));
        Ok(())
    }

    #[test]
    fn signatures() -> anyhow::Result<()> {
        let model = Model::builder("Article")
            .workflow("status", status()?)
            .workflow("flag", flag()?)
            .build()?;
        assert_eq!(model.action_signature("view").to_string(), "Article:view");
        assert_eq!(
            model.state_signatures("view")
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            [
                "Article(status:draft):view",
                "Article(status:review):view",
                "Article(status:published):view",
                "Article(flag:normal):view",
                "Article(flag:archived):view",
            ],
        );
        assert_eq!(
            model.transition_signatures("transit")
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            [
                "Article(status:draft):transit(review)",
                "Article(status:review):transit(published)",
                "Article(flag:normal):transit(archived)",
            ],
        );
        Ok(())
    }

    #[test]
    fn registry() -> anyhow::Result<()> {
        let mut registry = Registry::new();
        registry.register(Model::builder("Comment").build()?)?;
        registry.register(Model::builder("Article")
            .workflow("status", status()?)
            .build()?)?;
        assert_eq!(
            registry.register(Model::builder("Comment").build()?)
                .expect_err("duplicated model"),
            ConfigError::DuplicateModel("Comment".to_string()),
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.models()
                .map(|m| m.namespace())
                .collect::<Vec<_>>(),
            ["Comment", "Article"],
        );
        assert_eq!(
            registry.workflow_models()
                .map(|m| m.namespace())
                .collect::<Vec<_>>(),
            ["Article"],
        );
        assert!(registry.get("Article").is_some());
        assert!(registry.get("Missing").is_none());
        Ok(())
    }
}
