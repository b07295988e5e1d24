use std::sync::Arc;
use wrpaccore::{
    error::BackendError,
    permission::{
        PermissionSet,
        PermissionSource,
    },
    role::Role,
};

use crate::policy::Policy;

/// The action name under which transitions are checked.
pub const TRANSIT: &str = "transit";

/// Builds a [`Policy`] for a single evaluation context.
///
/// Methods can be chained in order to set the configuration values.
/// The `Policy` is constructed by calling [`build`](Builder::build), or
/// with [`build_from`](Builder::build_from) to take a fresh snapshot
/// from the external permission store.
///
/// `Builder::new` (or `Builder::default`) starts with an empty set of
/// stored permissions, the `guest` and `any` pseudo roles and `transit`
/// as the transition action.
#[derive(Clone, Debug)]
pub struct Builder {
    pub(crate) permissions: Arc<PermissionSet>,
    pub(crate) guest_role: Role,
    pub(crate) member_role: Role,
    pub(crate) transit_action: Box<str>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            permissions: Default::default(),
            guest_role: Role::new(Role::GUEST),
            member_role: Role::new(Role::ANY),
            transit_action: TRANSIT.into(),
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn permissions(mut self, val: PermissionSet) -> Self {
        self.permissions = Arc::new(val);
        self
    }

    pub fn shared_permissions(mut self, val: Arc<PermissionSet>) -> Self {
        self.permissions = val;
        self
    }

    /// The sole role carried by the anonymous actor.
    pub fn guest_role(mut self, val: &str) -> Self {
        self.guest_role = val.into();
        self
    }

    /// The role carried by every actor that is present.
    pub fn member_role(mut self, val: &str) -> Self {
        self.member_role = val.into();
        self
    }

    pub fn transit_action(mut self, val: &str) -> Self {
        self.transit_action = val.into();
        self
    }

    pub fn build(&self) -> Policy {
        log::trace!(
            "building a Policy with {} stored permissions",
            self.permissions.len(),
        );
        Policy {
            permissions: self.permissions.clone(),
            guest_role: self.guest_role.clone(),
            member_role: self.member_role.clone(),
            transit_action: self.transit_action.clone(),
        }
    }

    pub fn build_from(
        &self,
        source: &dyn PermissionSource,
    ) -> Result<Policy, BackendError> {
        let permissions = source.snapshot()?;
        Ok(self.clone()
            .permissions(permissions)
            .build())
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use super::*;

    #[test]
    fn defaults() {
        let policy = Builder::new().build();
        assert!(policy.permissions().is_empty());
        assert_eq!(policy.transit_action(), "transit");
    }

    #[test]
    fn configured() -> anyhow::Result<()> {
        let records = PermissionSet::from_str("Article:view, *")?;
        let policy = Builder::new()
            .transit_action("move")
            .build_from(&records)?;
        assert_eq!(policy.permissions().len(), 1);
        assert_eq!(policy.transit_action(), "move");
        Ok(())
    }
}
