use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    error::BackendError,
    role::{
        Role,
        Roles,
    },
};

/// A stored permission record - the role is permitted to perform what
/// the signature describes.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Permission {
    pub signature: String,
    pub role: Role,
}

/// A read-only snapshot of the stored permission records, indexed by
/// signature.
///
/// The snapshot is passed explicitly into every evaluation; the core
/// never modifies it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "Vec<Permission>", into = "Vec<Permission>")]
pub struct PermissionSet {
    records: Vec<Permission>,
    index: HashMap<String, Roles>,
}

/// The external store of permission records.
pub trait PermissionSource {
    /// Produce a snapshot of the records as currently stored.
    fn snapshot(&self) -> Result<PermissionSet, BackendError>;
}

mod impls;
