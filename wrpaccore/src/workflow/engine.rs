use crate::{
    entity::Entity,
    error::Error,
    role::Role,
};
use super::{
    State,
    Transition,
    Workflow,
};

/// A workflow bound to one entity instance.
pub struct StateMachine<'a> {
    workflow: &'a Workflow,
    entity: &'a dyn Entity,
}

impl<'a> StateMachine<'a> {
    pub fn new(workflow: &'a Workflow, entity: &'a dyn Entity) -> Self {
        Self { workflow, entity }
    }

    pub fn workflow(&self) -> &'a Workflow {
        self.workflow
    }

    pub fn attribute_name(&self) -> &'a str {
        self.workflow.attribute_name()
    }

    /// Reads the state off the entity; the value must be one of the
    /// declared states.
    pub fn current_state(&self) -> Result<State, Error> {
        let value = self.entity.attribute(self.workflow.attribute_name())?;
        if self.workflow.is_declared(&value) {
            Ok(State::from(value))
        } else {
            Err(Error::UnknownState {
                workflow: self.workflow.attribute_name().to_string(),
                state: value,
            })
        }
    }

    /// All transitions leaving the current state, in declaration order.
    pub fn relevant_transitions(&self) -> Result<Vec<&'a Transition>, Error> {
        let current = self.current_state()?;
        Ok(self.workflow.transitions()
            .iter()
            .filter(|t| t.source == current)
            .collect())
    }

    /// The current state, provided `target` may be reached from it.
    pub fn transit_source(&self, target: &State) -> Result<State, Error> {
        let source = self.current_state()?;
        if self.workflow.is_legal(&source, target) {
            Ok(source)
        } else {
            Err(Error::IllegalTransition {
                workflow: self.workflow.attribute_name().to_string(),
                from: source.into(),
                to: target.to_string(),
            })
        }
    }

    pub fn transition_permission(
        &self,
        source: &State,
        target: &State,
        role: &Role,
    ) -> Option<bool> {
        self.workflow.blueprint().transition_permission(source, target, role)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        model::Model,
        workflow::Definition,
    };
    use super::*;

    struct Row {
        model: Model,
        status: Option<&'static str>,
    }

    impl Entity for Row {
        fn model(&self) -> &Model {
            &self.model
        }

        fn attribute(&self, name: &str) -> Result<String, Error> {
            match (name, self.status) {
                ("status", Some(value)) => Ok(value.to_string()),
                _ => Err(Error::AttributeMissing(name.to_string())),
            }
        }

        fn is_related(&self, _relationship: &str, _actor: &str) -> bool {
            false
        }
    }

    fn row(status: Option<&'static str>) -> anyhow::Result<Row> {
        let definition: Definition = serde_json::from_str(r#"{
            "name": "publication",
            "states": ["draft", "review", "published"],
            "transitions": [
                {"source": "draft", "target": "review"},
                {"source": "review", "target": "draft"},
                {"source": "review", "target": "published"}
            ],
            "transition_permits": [
                {"source": "review", "target": "published", "role": "admin", "granted": true}
            ]
        }"#)?;
        Ok(Row {
            model: Model::builder("App\\Article")
                .workflow("status", definition)
                .build()?,
            status,
        })
    }

    #[test]
    fn current_state() -> anyhow::Result<()> {
        let entity = row(Some("review"))?;
        let machine = entity.model().workflows()[0].bind(&entity);
        assert_eq!(machine.attribute_name(), "status");
        assert_eq!(machine.current_state()?, State::from("review"));

        let entity = row(Some("archived"))?;
        let machine = entity.model().workflows()[0].bind(&entity);
        assert_eq!(
            machine.current_state(),
            Err(Error::UnknownState {
                workflow: "status".to_string(),
                state: "archived".to_string(),
            }),
        );

        let entity = row(None)?;
        let machine = entity.model().workflows()[0].bind(&entity);
        assert_eq!(
            machine.current_state(),
            Err(Error::AttributeMissing("status".to_string())),
        );
        Ok(())
    }

    #[test]
    fn relevant_transitions() -> anyhow::Result<()> {
        let entity = row(Some("review"))?;
        let machine = entity.model().workflows()[0].bind(&entity);
        let transitions = machine.relevant_transitions()?;
        assert_eq!(transitions.len(), 2);
        assert!(transitions.iter().all(|t| t.source == "review"));
        assert_eq!(transitions[0].target, "draft");
        assert_eq!(transitions[1].target, "published");
        // restartable
        assert_eq!(machine.relevant_transitions()?, transitions);

        assert_eq!(machine.transit_source(&"published".into())?, State::from("review"));
        assert_eq!(
            machine.transit_source(&"review".into()),
            Err(Error::IllegalTransition {
                workflow: "status".to_string(),
                from: "review".to_string(),
                to: "review".to_string(),
            }),
        );

        let entity = row(Some("published"))?;
        let machine = entity.model().workflows()[0].bind(&entity);
        assert!(machine.relevant_transitions()?.is_empty());
        Ok(())
    }

    #[test]
    fn transition_permission() -> anyhow::Result<()> {
        let entity = row(Some("review"))?;
        let machine = entity.model().workflows()[0].bind(&entity);
        let (review, published) = (State::from("review"), State::from("published"));
        assert_eq!(
            machine.transition_permission(&review, &published, &Role::from("admin")),
            Some(true),
        );
        assert_eq!(
            machine.transition_permission(&review, &published, &Role::from("editor")),
            None,
        );
        Ok(())
    }
}
