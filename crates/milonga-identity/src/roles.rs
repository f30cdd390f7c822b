//! Role tiers
//!
//! This module defines the platform's role-tier hierarchy and the
//! resolution from an [`Identity`]'s role fields to exactly one tier.
//!
//! Tiers are mutually exclusive: policy compilation selects one tier
//! per identity and layers additive tag rules on top of it. The
//! hierarchy is: User < Teacher < Organizer < Moderator < Admin.

use serde::{Deserialize, Serialize};

use crate::user::Identity;

/// A member's role tier.
///
/// # Resolution
///
/// [`RoleTier::for_identity`] consults, in order: the explicit
/// `primaryRole`, the legacy `role` field, then the highest tier named
/// in the `roles` tag list. Unknown role strings resolve to the default
/// `User` tier rather than failing. This is the platform's historical
/// behavior: a stray tag never locks a member out of baseline access.
/// Callers that want to fail closed on unknown strings can use the
/// strict [`RoleTier::parse`] instead.
///
/// # Examples
///
/// ```
/// use milonga_identity::{Identity, RoleTier};
///
/// let user = Identity::new(7).with_roles(["teacher", "moderator"]);
/// assert_eq!(RoleTier::for_identity(&user), RoleTier::Moderator);
///
/// let explicit = Identity::new(8).with_primary_role("organizer");
/// assert_eq!(RoleTier::for_identity(&explicit), RoleTier::Organizer);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoleTier {
    /// Default authenticated member
    User = 0,

    /// Can publish educational content and moderate their groups
    Teacher = 1,

    /// Can create and manage events and groups
    Organizer = 2,

    /// Can moderate all content
    Moderator = 3,

    /// Full platform control
    Admin = 4,
}

impl RoleTier {
    /// Parse a tier from a role string, strictly.
    ///
    /// Recognizes tier names and their aliases (`super_admin` is the
    /// admin tier, `dancer` is the default member tier).
    ///
    /// # Examples
    ///
    /// ```
    /// use milonga_identity::RoleTier;
    ///
    /// assert_eq!(RoleTier::parse("super_admin"), Some(RoleTier::Admin));
    /// assert_eq!(RoleTier::parse("dancer"), Some(RoleTier::User));
    /// assert_eq!(RoleTier::parse("unknown"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" | "super_admin" => Some(Self::Admin),
            "moderator" => Some(Self::Moderator),
            "organizer" => Some(Self::Organizer),
            "teacher" => Some(Self::Teacher),
            "user" | "dancer" => Some(Self::User),
            _ => None,
        }
    }

    /// Parse a tier from a role string, defaulting unknown strings to
    /// the `User` tier (the platform's permissive historical default).
    pub fn from_name(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::User)
    }

    /// Resolve the effective tier for an identity.
    ///
    /// Fallback order: explicit `primaryRole`, then the legacy `role`
    /// field, then the highest tier named in the `roles` tag list.
    pub fn for_identity(identity: &Identity) -> Self {
        if let Some(name) = identity.primary_role.as_deref() {
            return Self::from_name(name);
        }
        if let Some(name) = identity.role.as_deref() {
            return Self::from_name(name);
        }
        Self::from_memberships(&identity.roles)
    }

    /// Resolve the highest tier named in a role tag list.
    ///
    /// Non-tier tags (e.g. `curator`) resolve to `User` and therefore
    /// never raise the result.
    pub fn from_memberships(roles: &[String]) -> Self {
        roles
            .iter()
            .map(|role| Self::from_name(role))
            .max()
            .unwrap_or(Self::User)
    }

    /// Get string representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Teacher => "teacher",
            Self::Organizer => "organizer",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }

    /// Get a human-readable display name for the tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::User => "Member",
            Self::Teacher => "Teacher",
            Self::Organizer => "Organizer",
            Self::Moderator => "Moderator",
            Self::Admin => "Admin",
        }
    }

    /// Check if this tier has moderation privileges.
    pub fn can_moderate(&self) -> bool {
        *self >= RoleTier::Moderator
    }

    /// Check if this tier can host events and groups.
    pub fn can_host(&self) -> bool {
        *self >= RoleTier::Teacher
    }
}

impl Default for RoleTier {
    fn default() -> Self {
        Self::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_hierarchy() {
        assert!(RoleTier::Admin > RoleTier::Moderator);
        assert!(RoleTier::Moderator > RoleTier::Organizer);
        assert!(RoleTier::Organizer > RoleTier::Teacher);
        assert!(RoleTier::Teacher > RoleTier::User);
    }

    #[test]
    fn test_parse() {
        assert_eq!(RoleTier::parse("admin"), Some(RoleTier::Admin));
        assert_eq!(RoleTier::parse("super_admin"), Some(RoleTier::Admin));
        assert_eq!(RoleTier::parse("MODERATOR"), Some(RoleTier::Moderator));
        assert_eq!(RoleTier::parse("dancer"), Some(RoleTier::User));
        assert_eq!(RoleTier::parse("curator"), None);
    }

    #[test]
    fn test_from_name_is_permissive() {
        assert_eq!(RoleTier::from_name("organizer"), RoleTier::Organizer);
        // unknown strings get the baseline tier, not a lockout
        assert_eq!(RoleTier::from_name("curator"), RoleTier::User);
        assert_eq!(RoleTier::from_name(""), RoleTier::User);
    }

    #[test]
    fn test_primary_role_wins() {
        let user = Identity::new(1)
            .with_primary_role("moderator")
            .with_role("admin")
            .with_roles(["admin"]);
        assert_eq!(RoleTier::for_identity(&user), RoleTier::Moderator);
    }

    #[test]
    fn test_legacy_role_beats_memberships() {
        let user = Identity::new(1).with_role("teacher").with_roles(["admin"]);
        assert_eq!(RoleTier::for_identity(&user), RoleTier::Teacher);
    }

    #[test]
    fn test_membership_precedence() {
        let user = Identity::new(1).with_roles(["teacher", "organizer", "curator"]);
        assert_eq!(RoleTier::for_identity(&user), RoleTier::Organizer);

        let admin = Identity::new(2).with_roles(["dancer", "super_admin"]);
        assert_eq!(RoleTier::for_identity(&admin), RoleTier::Admin);
    }

    #[test]
    fn test_no_roles_is_default_member() {
        assert_eq!(RoleTier::for_identity(&Identity::new(1)), RoleTier::User);
    }

    #[test]
    fn test_tier_privileges() {
        assert!(RoleTier::Admin.can_moderate());
        assert!(RoleTier::Moderator.can_moderate());
        assert!(!RoleTier::Organizer.can_moderate());
        assert!(RoleTier::Teacher.can_host());
        assert!(!RoleTier::User.can_host());
    }
}
