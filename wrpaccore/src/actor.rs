use crate::role::{
    Role,
    Roles,
};

/// The party requesting access.
///
/// The anonymous actor is not represented by an implementation of this
/// trait; it is the `None` in the `Option<&dyn Actor>` accepted by the
/// policy.
pub trait Actor {
    /// Stable identity used by relationship resolution, e.g. a user id.
    fn identity(&self) -> &str;
    /// The non-model roles assigned directly to this actor.
    fn roles(&self) -> Roles;
}

/// The roles an actor carries irrespective of any entity, with the
/// pseudo roles applied: the anonymous actor only carries `guest_role`,
/// while every other actor additionally carries `member_role`.
pub fn applicable_roles(
    actor: Option<&dyn Actor>,
    guest_role: &str,
    member_role: &str,
) -> Roles {
    match actor {
        None => Roles::from([guest_role]),
        Some(actor) => {
            let mut roles = actor.roles();
            roles.insert(Role::from(member_role));
            roles
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Alice;

    impl Actor for Alice {
        fn identity(&self) -> &str {
            "alice"
        }

        fn roles(&self) -> Roles {
            Roles::from(["editor"])
        }
    }

    #[test]
    fn pseudo_roles() {
        assert_eq!(
            applicable_roles(None, Role::GUEST, Role::ANY),
            Roles::from(["guest"]),
        );
        assert_eq!(
            applicable_roles(Some(&Alice), Role::GUEST, Role::ANY),
            Roles::from(["any", "editor"]),
        );
        assert_eq!(
            applicable_roles(Some(&Alice), "anonymous", "member"),
            Roles::from(["editor", "member"]),
        );
    }
}
