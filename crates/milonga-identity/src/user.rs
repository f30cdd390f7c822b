//! # Identity
//!
//! The identity descriptor the policy layer compiles abilities from.
//! Produced by the session subsystem; this crate neither authenticates
//! nor persists anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Numeric member id.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// An authenticated member's identity descriptor.
///
/// Carries everything role resolution needs: the member id, the legacy
/// single `role` string older records still have, the explicit
/// `primaryRole` newer records set, and the full `roles` tag list
/// (tier names plus additive tags like `curator` and `dancer`).
///
/// A guest is the *absence* of an `Identity`, not a variant of it.
///
/// # Example
///
/// ```
/// use milonga_identity::Identity;
///
/// let user = Identity::new(7).with_roles(["organizer", "curator"]);
/// assert!(user.has_role("curator"));
/// assert!(!user.has_role("admin"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// The member id ownership conditions compare against.
    pub id: UserId,

    /// Legacy single-role field, still present on older records.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,

    /// Explicit primary role; takes precedence over everything else.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub primary_role: Option<String>,

    /// Role tags: tier names and additive tags, unordered.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Identity {
    /// Create an identity with no role information (resolves to the
    /// default member tier).
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            role: None,
            primary_role: None,
            roles: Vec::new(),
        }
    }

    /// Set the legacy single `role` field.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the explicit primary role.
    pub fn with_primary_role(mut self, role: impl Into<String>) -> Self {
        self.primary_role = Some(role.into());
        self
    }

    /// Set the role tag list.
    pub fn with_roles<S>(mut self, roles: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether any of the identity's role fields carries `name`.
    ///
    /// Additive policy rules (curator, trust tags) key off this, so it
    /// consults the tag list and both single-role fields.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role == name)
            || self.role.as_deref() == Some(name)
            || self.primary_role.as_deref() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_round_trips() {
        let id = UserId::new(7);
        assert_eq!(id.value(), 7);
        assert_eq!(i64::from(id), 7);
        assert_eq!("7".parse::<UserId>().unwrap(), id);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_has_role_consults_all_fields() {
        let tagged = Identity::new(1).with_roles(["curator"]);
        assert!(tagged.has_role("curator"));

        let legacy = Identity::new(2).with_role("organizer");
        assert!(legacy.has_role("organizer"));

        let primary = Identity::new(3).with_primary_role("moderator");
        assert!(primary.has_role("moderator"));

        assert!(!Identity::new(4).has_role("anything"));
    }

    #[test]
    fn test_serde_wire_shape() {
        let user = Identity::new(7)
            .with_primary_role("organizer")
            .with_roles(["organizer", "curator"]);
        let encoded = serde_json::to_value(&user).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "id": 7,
                "primaryRole": "organizer",
                "roles": ["organizer", "curator"]
            })
        );
        let decoded: Identity = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn test_serde_tolerates_sparse_records() {
        let decoded: Identity = serde_json::from_value(serde_json::json!({"id": 9})).unwrap();
        assert_eq!(decoded, Identity::new(9));
    }
}
