use std::{
    fmt,
    str::FromStr,
};

use crate::error::ValueError;
use super::*;

impl Signature {
    pub fn action(
        namespace: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self::Action {
            namespace: namespace.into(),
            action: action.into(),
        }
    }

    pub fn state(
        namespace: impl Into<String>,
        workflow: impl Into<String>,
        state: impl Into<State>,
        action: impl Into<String>,
    ) -> Self {
        Self::State {
            namespace: namespace.into(),
            workflow: workflow.into(),
            state: state.into(),
            action: action.into(),
        }
    }

    pub fn transition(
        namespace: impl Into<String>,
        workflow: impl Into<String>,
        state: impl Into<State>,
        action: impl Into<String>,
        target: impl Into<State>,
    ) -> Self {
        Self::Transition {
            namespace: namespace.into(),
            workflow: workflow.into(),
            state: state.into(),
            action: action.into(),
            target: target.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Self::Action { namespace, .. } |
            Self::State { namespace, .. } |
            Self::Transition { namespace, .. } => namespace,
        }
    }

    pub fn action_name(&self) -> &str {
        match self {
            Self::Action { action, .. } |
            Self::State { action, .. } |
            Self::Transition { action, .. } => action,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Action { namespace, action } =>
                write!(f, "{namespace}:{action}"),
            Self::State { namespace, workflow, state, action } =>
                write!(f, "{namespace}({workflow}:{state}):{action}"),
            Self::Transition { namespace, workflow, state, action, target } =>
                write!(f, "{namespace}({workflow}:{state}):{action}({target})"),
        }
    }
}

impl From<&Signature> for String {
    fn from(signature: &Signature) -> Self {
        signature.to_string()
    }
}

fn non_empty<'a>(part: &'a str, s: &str) -> Result<&'a str, ValueError> {
    (!part.is_empty())
        .then_some(part)
        .ok_or_else(|| ValueError::Signature(s.to_string()))
}

impl FromStr for Signature {
    type Err = ValueError;

    // Parsed from the right, as namespaces may themselves contain `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValueError::Signature(s.to_string());
        let (rest, target) = match s.strip_suffix(')') {
            Some(head) => {
                let (rest, target) = head.rsplit_once('(')
                    .ok_or_else(malformed)?;
                (rest, Some(non_empty(target, s)?))
            }
            None => (s, None),
        };
        match rest.rsplit_once("):") {
            Some((head, action)) => {
                let action = non_empty(action, s)?;
                let (namespace, inner) = head.rsplit_once('(')
                    .ok_or_else(malformed)?;
                let (workflow, state) = inner.split_once(':')
                    .ok_or_else(malformed)?;
                let namespace = non_empty(namespace, s)?;
                let workflow = non_empty(workflow, s)?;
                let state = non_empty(state, s)?;
                Ok(match target {
                    Some(target) => Self::transition(
                        namespace, workflow, state, action, target,
                    ),
                    None => Self::state(namespace, workflow, state, action),
                })
            }
            None => {
                // a target is only meaningful with a workflow state
                if target.is_some() {
                    return Err(malformed());
                }
                let (namespace, action) = rest.rsplit_once(':')
                    .ok_or_else(malformed)?;
                Ok(Self::action(non_empty(namespace, s)?, non_empty(action, s)?))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats() {
        assert_eq!(
            Signature::action("App\\Article", "view").to_string(),
            "App\\Article:view",
        );
        assert_eq!(
            Signature::state("App\\Article", "status", "draft", "edit").to_string(),
            "App\\Article(status:draft):edit",
        );
        assert_eq!(
            Signature::transition("Article", "status", "draft", "transit", "review")
                .to_string(),
            "Article(status:draft):transit(review)",
        );
    }

    #[test]
    fn parse() -> anyhow::Result<()> {
        assert_eq!(
            Signature::from_str("Article(status:draft):transit(review)")?,
            Signature::transition("Article", "status", "draft", "transit", "review"),
        );
        assert_eq!(
            Signature::from_str("blog::Article(status:draft):edit")?,
            Signature::state("blog::Article", "status", "draft", "edit"),
        );
        assert_eq!(
            Signature::from_str("blog::Article:view")?,
            Signature::action("blog::Article", "view"),
        );
        let signature = Signature::from_str("App\\Article(flag:normal):view")?;
        assert_eq!(signature.namespace(), "App\\Article");
        assert_eq!(signature.action_name(), "view");
        Ok(())
    }

    #[test]
    fn parse_malformed() {
        for s in [
            "",
            "Article",
            "Article:",
            ":view",
            "Article:transit(review)",
            "Article(status:draft):",
            "Article(status):edit",
            "Article(:draft):edit",
            "Article(status:draft):transit()",
            "(status:draft):edit",
        ] {
            assert_eq!(
                Signature::from_str(s),
                Err(ValueError::Signature(s.to_string())),
                "{s:?} should be rejected",
            );
        }
    }
}
