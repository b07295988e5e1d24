use std::{
    collections::HashMap,
    sync::Arc,
};

use crate::{
    role::Roles,
    workflow::{
        Blueprint,
        Workflow,
    },
};

/// Describes one entity type to the authorization core: the namespace
/// used in signatures, the relationships that may act as model roles,
/// the built-in permits for plain actions and the workflows it owns.
///
/// Workflow bearing types are described explicitly through this struct
/// and registered with the [`Registry`] at startup.
#[derive(Clone, Debug)]
pub struct Model {
    namespace: String,
    relationships: Vec<String>,
    permits: HashMap<String, Roles>,
    workflows: Vec<Workflow>,
}

/// Builds a [`Model`].
///
/// Methods can be chained in order to set the configuration values,
/// with the blueprints only validated once [`build`](Builder::build) is
/// called.
#[derive(Default)]
pub struct Builder {
    namespace: String,
    relationships: Vec<String>,
    permits: HashMap<String, Roles>,
    workflows: Vec<(String, Arc<dyn Blueprint>)>,
}

/// The set of models known to the application.
#[derive(Debug, Default)]
pub struct Registry {
    models: Vec<Arc<Model>>,
    index: HashMap<String, usize>,
}

mod impls;
