use std::str::FromStr;

use crate::{
    error::ValueError,
    signature::Signature,
};
use super::*;

impl Permission {
    pub fn new(signature: impl Into<String>, role: impl Into<Role>) -> Self {
        Self {
            signature: signature.into(),
            role: role.into(),
        }
    }
}

impl From<(&str, &str)> for Permission {
    fn from((signature, role): (&str, &str)) -> Self {
        Self::new(signature, role)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut records: Vec<Permission> = Vec::new();
        let mut index: HashMap<String, Roles> = HashMap::new();
        for permission in iter {
            if index.entry(permission.signature.clone())
                .or_default()
                .insert(permission.role.clone())
            {
                records.push(permission);
            }
        }
        log::debug!("permission snapshot loaded with {} records", records.len());
        Self { records, index }
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(records: Vec<Permission>) -> Self {
        records.into_iter().collect()
    }
}

impl From<PermissionSet> for Vec<Permission> {
    fn from(set: PermissionSet) -> Self {
        set.records
    }
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Permission] {
        &self.records
    }

    /// Records matching the signature and the role exactly, where
    /// provided.
    pub fn filter<'a>(
        &'a self,
        signature: Option<&'a str>,
        role: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Permission> + 'a {
        self.records.iter()
            .filter(move |p| signature.map_or(true, |s| p.signature == s))
            .filter(move |p| role.map_or(true, |r| p.role.as_str() == r))
    }

    /// All roles stored against the signature.
    pub fn roles_for(&self, signature: &str) -> Option<&Roles> {
        self.index.get(signature)
    }

    pub fn from_json(s: &str) -> Result<Self, BackendError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Parses the line-oriented form, with each line being
///
/// ```text
/// signature, role  # optional comment
/// ```
///
/// Whitespace around the comma is optional.  Blank lines and
/// comment-only lines are skipped.  Every signature is
/// validated.
impl FromStr for PermissionSet {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.lines()
            .filter_map(|line| {
                let line = line.split('#')
                    .next()
                    .unwrap_or_default()
                    .trim();
                (!line.is_empty()).then_some(line)
            })
            .map(|line| -> Result<Permission, ValueError> {
                let (signature, role) = line.split_once(',')
                    .map(|(s, r)| (s.trim(), r.trim()))
                    .filter(|(s, r)| !s.is_empty() && !r.is_empty() && !r.contains(','))
                    .ok_or_else(|| ValueError::PermissionLine(line.to_string()))?;
                Signature::from_str(signature)?;
                Ok(Permission::new(signature, role))
            })
            .collect()
    }
}

impl PermissionSource for PermissionSet {
    fn snapshot(&self) -> Result<PermissionSet, BackendError> {
        Ok(self.clone())
    }
}
