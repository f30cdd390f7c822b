//! # Actions
//!
//! Defines all actions (verbs) that can be checked against an ability.
//! An action names what a caller is trying to do to a subject: the CRUD
//! verbs plus the platform's domain verbs (moderation, RSVPs, group
//! membership, page access).
//!
//! `Manage` is the wildcard verb: a rule declared with `Manage` applies
//! to a check for **any** action on the same subject.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BuildError;

/// Actions that can be checked against an ability.
///
/// - **Manage**: wildcard; matches any action in a check
/// - **Create/Read/Update/Delete**: the CRUD verbs
/// - **View/Edit**: profile-surface verbs (distinct from Read/Update)
/// - **Publish/Moderate/Approve/Ban/Unban**: content moderation verbs
/// - **Access**: page/surface access (admin panel, billing, analytics)
/// - **Subscribe/Rsvp/Join/Leave/Invite**: membership verbs
/// - **Filter**: applying saved content filters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Wildcard verb; a `Manage` rule matches a check for any action.
    Manage,
    /// Create a new resource instance.
    Create,
    /// Read/view resource data.
    Read,
    /// Modify existing resource data.
    Update,
    /// Permanently remove a resource.
    Delete,
    /// View a profile surface.
    View,
    /// Edit a profile surface.
    Edit,
    /// Publish content to the public feed.
    Publish,
    /// Moderate content (hide, flag, resolve reports).
    Moderate,
    /// Access a gated page or surface.
    Access,
    /// Approve pending content or membership requests.
    Approve,
    /// Subscribe to updates for a resource.
    Subscribe,
    /// RSVP to an event.
    Rsvp,
    /// Join a group or community.
    Join,
    /// Leave a group or community.
    Leave,
    /// Invite another member.
    Invite,
    /// Ban a member from a group.
    Ban,
    /// Lift a ban on a member.
    Unban,
    /// Apply a saved content filter.
    Filter,
}

impl Action {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Manage => "manage",
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::View => "view",
            Action::Edit => "edit",
            Action::Publish => "publish",
            Action::Moderate => "moderate",
            Action::Access => "access",
            Action::Approve => "approve",
            Action::Subscribe => "subscribe",
            Action::Rsvp => "rsvp",
            Action::Join => "join",
            Action::Leave => "leave",
            Action::Invite => "invite",
            Action::Ban => "ban",
            Action::Unban => "unban",
            Action::Filter => "filter",
        }
    }

    /// Parse an action from its string representation.
    ///
    /// Parsing is case-insensitive and tolerates common aliases.
    ///
    /// # Example
    ///
    /// ```
    /// use milonga_ability::Action;
    ///
    /// assert_eq!(Action::parse("read"), Some(Action::Read));
    /// assert_eq!(Action::parse("remove"), Some(Action::Delete)); // Alias
    /// assert_eq!(Action::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "manage" | "administer" => Some(Action::Manage),
            "create" | "add" | "new" => Some(Action::Create),
            "read" | "get" => Some(Action::Read),
            "update" | "modify" | "patch" => Some(Action::Update),
            "delete" | "remove" | "destroy" => Some(Action::Delete),
            "view" => Some(Action::View),
            "edit" => Some(Action::Edit),
            "publish" => Some(Action::Publish),
            "moderate" => Some(Action::Moderate),
            "access" => Some(Action::Access),
            "approve" | "accept" => Some(Action::Approve),
            "subscribe" => Some(Action::Subscribe),
            "rsvp" => Some(Action::Rsvp),
            "join" => Some(Action::Join),
            "leave" => Some(Action::Leave),
            "invite" => Some(Action::Invite),
            "ban" => Some(Action::Ban),
            "unban" => Some(Action::Unban),
            "filter" => Some(Action::Filter),
            _ => None,
        }
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![
            Action::Manage,
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::View,
            Action::Edit,
            Action::Publish,
            Action::Moderate,
            Action::Access,
            Action::Approve,
            Action::Subscribe,
            Action::Rsvp,
            Action::Join,
            Action::Leave,
            Action::Invite,
            Action::Ban,
            Action::Unban,
            Action::Filter,
        ]
    }

    /// Check whether a rule declared with this action covers a check
    /// for `requested`.
    ///
    /// Only `Manage` widens: every other action covers itself alone.
    /// Note that a check *for* `Manage` is only covered by a `Manage`
    /// rule, never the other way around.
    ///
    /// # Example
    ///
    /// ```
    /// use milonga_ability::Action;
    ///
    /// assert!(Action::Manage.grants(Action::Delete));
    /// assert!(Action::Read.grants(Action::Read));
    /// assert!(!Action::Read.grants(Action::Update));
    /// assert!(!Action::Delete.grants(Action::Manage));
    /// ```
    pub fn grants(&self, requested: Action) -> bool {
        *self == requested || *self == Action::Manage
    }

    /// Check if this is a mutating action.
    ///
    /// Mutating actions create, change, or remove data; callers
    /// typically gate them harder than read-side verbs.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Action::Manage
                | Action::Create
                | Action::Update
                | Action::Delete
                | Action::Edit
                | Action::Publish
                | Action::Ban
                | Action::Unban
        )
    }
}

impl FromStr for Action {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| BuildError::UnknownAction(s.to_string()))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parsing() {
        assert_eq!(Action::parse("read"), Some(Action::Read));
        assert_eq!(Action::parse("get"), Some(Action::Read));
        assert_eq!(Action::parse("create"), Some(Action::Create));
        assert_eq!(Action::parse("RSVP"), Some(Action::Rsvp));
        assert_eq!(Action::parse("moderate"), Some(Action::Moderate));
        assert_eq!(Action::parse("filter"), Some(Action::Filter));
        assert_eq!(Action::parse("invalid"), None);

        // view and edit are distinct verbs, not read/update aliases
        assert_eq!(Action::parse("view"), Some(Action::View));
        assert_eq!(Action::parse("edit"), Some(Action::Edit));
    }

    #[test]
    fn test_action_from_str_rejects_unknown() {
        let err = "frobnicate".parse::<Action>().unwrap_err();
        assert_eq!(err, BuildError::UnknownAction("frobnicate".to_string()));
    }

    #[test]
    fn test_manage_grants_everything() {
        for action in Action::all() {
            assert!(Action::Manage.grants(action));
        }
    }

    #[test]
    fn test_specific_actions_grant_only_themselves() {
        assert!(Action::Read.grants(Action::Read));
        assert!(!Action::Read.grants(Action::Update));
        assert!(!Action::Update.grants(Action::Read));
        assert!(!Action::Delete.grants(Action::Manage));
    }

    #[test]
    fn test_as_str_round_trips() {
        for action in Action::all() {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_is_mutating() {
        assert!(Action::Delete.is_mutating());
        assert!(Action::Publish.is_mutating());
        assert!(!Action::Read.is_mutating());
        assert!(!Action::Rsvp.is_mutating());
    }
}
