use crate::entity::Entity;
use super::*;

impl Filter {
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn related(relationship: impl Into<String>, actor: impl Into<String>) -> Self {
        Self::Related {
            relationship: relationship.into(),
            actor: actor.into(),
        }
    }

    /// Disjunction of the clauses; no clause at all admits nothing.
    pub fn any_of(mut clauses: Vec<Filter>) -> Self {
        match clauses.len() {
            0 => Self::Nothing,
            1 => clauses.remove(0),
            _ => Self::Or(clauses),
        }
    }

    /// Conjunction of the clauses; no clause at all admits everything.
    pub fn all_of(mut clauses: Vec<Filter>) -> Self {
        match clauses.len() {
            0 => Self::All,
            1 => clauses.remove(0),
            _ => Self::And(clauses),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Evaluate the filter against a single entity.  A missing
    /// attribute never matches.
    pub fn matches(&self, entity: &dyn Entity) -> bool {
        match self {
            Self::All => true,
            Self::Nothing => false,
            Self::Eq { attribute, value } => entity.attribute(attribute)
                .map(|v| &v == value)
                .unwrap_or(false),
            Self::Related { relationship, actor } =>
                entity.is_related(relationship, actor),
            Self::And(parts) => parts.iter().all(|p| p.matches(entity)),
            Self::Or(parts) => parts.iter().any(|p| p.matches(entity)),
        }
    }

    pub fn render<S: FilterSink>(&self, sink: &mut S) -> S::Output {
        match self {
            Self::All => sink.all(),
            Self::Nothing => sink.nothing(),
            Self::Eq { attribute, value } => sink.equals(attribute, value),
            Self::Related { relationship, actor } => sink.related(relationship, actor),
            Self::And(parts) => {
                let parts: Vec<S::Output> = parts.iter()
                    .map(|p| p.render(sink))
                    .collect();
                sink.and(parts)
            }
            Self::Or(parts) => {
                let parts: Vec<S::Output> = parts.iter()
                    .map(|p| p.render(sink))
                    .collect();
                sink.or(parts)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        error::Error,
        model::Model,
    };
    use super::*;

    struct Row {
        model: Model,
        status: &'static str,
        owner: &'static str,
    }

    impl Entity for Row {
        fn model(&self) -> &Model {
            &self.model
        }

        fn attribute(&self, name: &str) -> Result<String, Error> {
            match name {
                "status" => Ok(self.status.to_string()),
                _ => Err(Error::AttributeMissing(name.to_string())),
            }
        }

        fn is_related(&self, relationship: &str, actor: &str) -> bool {
            relationship == "owner" && self.owner == actor
        }
    }

    fn row(status: &'static str, owner: &'static str) -> anyhow::Result<Row> {
        Ok(Row {
            model: Model::builder("Article").relationship("owner").build()?,
            status,
            owner,
        })
    }

    fn sample() -> Filter {
        Filter::any_of(vec![
            Filter::equals("status", "published"),
            Filter::all_of(vec![
                Filter::equals("status", "draft"),
                Filter::related("owner", "alice"),
            ]),
        ])
    }

    #[test]
    fn matches() -> anyhow::Result<()> {
        let filter = sample();
        assert!(filter.matches(&row("published", "bob")?));
        assert!(filter.matches(&row("draft", "alice")?));
        assert!(!filter.matches(&row("draft", "bob")?));
        assert!(!filter.matches(&row("review", "alice")?));
        assert!(!Filter::equals("flag", "normal").matches(&row("draft", "alice")?));
        assert!(Filter::All.matches(&row("review", "bob")?));
        assert!(!Filter::Nothing.matches(&row("review", "bob")?));
        Ok(())
    }

    #[test]
    fn collapse() {
        assert_eq!(Filter::any_of(vec![]), Filter::Nothing);
        assert_eq!(Filter::all_of(vec![]), Filter::All);
        assert_eq!(
            Filter::any_of(vec![Filter::equals("status", "draft")]),
            Filter::equals("status", "draft"),
        );
        assert!(Filter::any_of(vec![]).is_nothing());
        assert!(Filter::all_of(vec![]).is_unrestricted());
    }

    #[test]
    fn display() {
        assert_eq!(
            sample().to_string(),
            r#"(status = "published" OR (status = "draft" AND owner("alice")))"#,
        );
    }

    struct Sql {
        params: Vec<String>,
    }

    impl FilterSink for Sql {
        type Output = String;

        fn all(&mut self) -> String {
            "1 = 1".to_string()
        }

        fn nothing(&mut self) -> String {
            "id = 0".to_string()
        }

        fn equals(&mut self, attribute: &str, value: &str) -> String {
            self.params.push(value.to_string());
            format!("{attribute} = ?{}", self.params.len())
        }

        fn related(&mut self, relationship: &str, actor: &str) -> String {
            self.params.push(actor.to_string());
            format!("{relationship}_id = ?{}", self.params.len())
        }

        fn and(&mut self, parts: Vec<String>) -> String {
            format!("({})", parts.join(" AND "))
        }

        fn or(&mut self, parts: Vec<String>) -> String {
            format!("({})", parts.join(" OR "))
        }
    }

    #[test]
    fn render() {
        let mut sql = Sql { params: vec![] };
        assert_eq!(
            sample().render(&mut sql),
            "(status = ?1 OR (status = ?2 AND owner_id = ?3))",
        );
        assert_eq!(sql.params, ["published", "draft", "alice"]);
        assert_eq!(Filter::Nothing.render(&mut sql), "id = 0");
    }
}
