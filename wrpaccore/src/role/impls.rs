use std::{
    borrow::Borrow,
    fmt,
    ops::BitOrAssign,
};
use super::*;

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Roles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, role: impl Into<Role>) -> bool {
        self.0.insert(role.into())
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    pub fn has_wildcard(&self) -> bool {
        self.0.contains(Role::WILDCARD)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}

impl BitOrAssign<Roles> for Roles {
    fn bitor_assign(&mut self, rhs: Roles) {
        self.0.extend(rhs.0);
    }
}

impl BitOrAssign<&Roles> for Roles {
    fn bitor_assign(&mut self, rhs: &Roles) {
        self.0.extend(rhs.0.iter().cloned());
    }
}

impl<R: Into<Role>> FromIterator<R> for Roles {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<R: Into<Role>, const N: usize> From<[R; N]> for Roles {
    fn from(roles: [R; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl IntoIterator for Roles {
    type Item = Role;
    type IntoIter = std::collections::btree_set::IntoIter<Role>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Roles {
    type Item = &'a Role;
    type IntoIter = std::collections::btree_set::Iter<'a, Role>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;
        for (i, role) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{role}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn smoke() -> anyhow::Result<()> {
        let role = Role::from("editor");
        assert_eq!(role.to_string(), "editor");
        assert_eq!(Role::wildcard().as_str(), Role::WILDCARD);

        let roles: Roles = serde_json::from_str(r#"["owner", "editor", "owner"]"#)?;
        assert_eq!(roles.len(), 2);
        assert!(roles.contains("owner"));
        assert_eq!(roles.to_string(), "[editor, owner]");
        Ok(())
    }

    #[test]
    fn union() {
        let mut roles = Roles::from(["admin"]);
        roles |= Roles::from(["owner"]);
        roles |= &Roles::from(["admin", "editor"]);
        assert_eq!(roles, Roles::from(["admin", "editor", "owner"]));
    }
}
