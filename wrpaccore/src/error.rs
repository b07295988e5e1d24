use thiserror::Error;

/// Errors raised while evaluating a single authorization request.
///
/// None of these are meant to escape the public authorization entry
/// points; they are converted into a denial there.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("entity has no attribute `{0}`")]
    AttributeMissing(String),
    #[error("workflow `{workflow}` has no state `{state}`")]
    UnknownState {
        workflow: String,
        state: String,
    },
    #[error("no such workflow: {0}")]
    NoSuchWorkflow(String),
    #[error("workflow `{workflow}` has no transition from `{from}` to `{to}`")]
    IllegalTransition {
        workflow: String,
        from: String,
        to: String,
    },
}

/// Errors raised while registering blueprints and models.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("workflow `{0}` declares no states")]
    EmptyStates(String),
    #[error("workflow `{workflow}` declares state `{state}` more than once")]
    DuplicateState {
        workflow: String,
        state: String,
    },
    #[error("workflow `{workflow}` transition references undeclared state `{state}`")]
    UndeclaredState {
        workflow: String,
        state: String,
    },
    #[error("model `{namespace}` declares workflow `{workflow}` more than once")]
    DuplicateWorkflow {
        namespace: String,
        workflow: String,
    },
    #[error("model `{namespace}` has a blueprint named after its workflow `{workflow}`")]
    AmbiguousWorkflow {
        namespace: String,
        workflow: String,
    },
    #[error("model `{0}` is already registered")]
    DuplicateModel(String),
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("malformed signature: {0}")]
    Signature(String),
    #[error("malformed permission line: {0}")]
    PermissionLine(String),
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Value(#[from] ValueError),
    /// Denotes a failure reported by the external record store.
    #[error("permission source unavailable: {0}")]
    Unavailable(String),
    #[error("unknown error")]
    Unknown,
}
