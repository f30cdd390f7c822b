//! # Subjects
//!
//! Defines the resource types a rule can target. Subjects cover the
//! platform's content types (posts, events, groups, memories, messages,
//! communities), its profile surfaces, and the gated admin surfaces
//! (admin panel, billing, analytics, Life CEO assistant).
//!
//! `All` is the wildcard subject: a rule declared with `All` applies to
//! a check for any subject.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BuildError;

/// Resource types that rules can target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// Wildcard subject; a rule on `All` matches a check for any subject.
    All,
    /// Member accounts.
    User,
    /// Feed posts.
    Post,
    /// Events (milongas, practicas, workshops).
    Event,
    /// Member-run groups.
    Group,
    /// Direct messages.
    Message,
    /// Shared memories (photos, stories).
    Memory,
    /// City communities.
    Community,
    /// Public member profiles.
    UserProfile,
    /// Analytics dashboards (scoped by `type`).
    Analytics,
    /// The admin panel surface.
    AdminPanel,
    /// The billing surface.
    BillingPage,
    /// Saved memory filters.
    MemoryFilter,
    /// The Life CEO assistant surface.
    LifeCeo,
}

impl Subject {
    /// Get the string representation of the subject.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::All => "all",
            Subject::User => "user",
            Subject::Post => "post",
            Subject::Event => "event",
            Subject::Group => "group",
            Subject::Message => "message",
            Subject::Memory => "memory",
            Subject::Community => "community",
            Subject::UserProfile => "user_profile",
            Subject::Analytics => "analytics",
            Subject::AdminPanel => "admin_panel",
            Subject::BillingPage => "billing_page",
            Subject::MemoryFilter => "memory_filter",
            Subject::LifeCeo => "life_ceo",
        }
    }

    /// Parse a subject from its string representation.
    ///
    /// Parsing is case-insensitive and tolerates plural forms.
    ///
    /// # Example
    ///
    /// ```
    /// use milonga_ability::Subject;
    ///
    /// assert_eq!(Subject::parse("post"), Some(Subject::Post));
    /// assert_eq!(Subject::parse("events"), Some(Subject::Event));
    /// assert_eq!(Subject::parse("all"), Some(Subject::All));
    /// assert_eq!(Subject::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Subject::All),
            "user" | "users" => Some(Subject::User),
            "post" | "posts" => Some(Subject::Post),
            "event" | "events" => Some(Subject::Event),
            "group" | "groups" => Some(Subject::Group),
            "message" | "messages" => Some(Subject::Message),
            "memory" | "memories" => Some(Subject::Memory),
            "community" | "communities" => Some(Subject::Community),
            "user_profile" | "userprofile" | "profile" | "profiles" => Some(Subject::UserProfile),
            "analytics" => Some(Subject::Analytics),
            "admin_panel" | "adminpanel" => Some(Subject::AdminPanel),
            "billing_page" | "billingpage" | "billing" => Some(Subject::BillingPage),
            "memory_filter" | "memoryfilter" | "memory_filters" => Some(Subject::MemoryFilter),
            "life_ceo" | "lifeceo" => Some(Subject::LifeCeo),
            _ => None,
        }
    }

    /// Get all subjects (the wildcard included).
    pub fn all() -> Vec<Self> {
        vec![
            Subject::All,
            Subject::User,
            Subject::Post,
            Subject::Event,
            Subject::Group,
            Subject::Message,
            Subject::Memory,
            Subject::Community,
            Subject::UserProfile,
            Subject::Analytics,
            Subject::AdminPanel,
            Subject::BillingPage,
            Subject::MemoryFilter,
            Subject::LifeCeo,
        ]
    }

    /// Check if this subject is a gated admin-tier surface rather than
    /// a content type.
    pub fn is_surface(&self) -> bool {
        matches!(
            self,
            Subject::AdminPanel | Subject::BillingPage | Subject::Analytics | Subject::LifeCeo
        )
    }
}

impl FromStr for Subject {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| BuildError::UnknownSubject(s.to_string()))
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_parsing() {
        assert_eq!(Subject::parse("post"), Some(Subject::Post));
        assert_eq!(Subject::parse("posts"), Some(Subject::Post));
        assert_eq!(Subject::parse("memories"), Some(Subject::Memory));
        assert_eq!(Subject::parse("profile"), Some(Subject::UserProfile));
        assert_eq!(Subject::parse("admin_panel"), Some(Subject::AdminPanel));
        assert_eq!(Subject::parse("billing"), Some(Subject::BillingPage));
        assert_eq!(Subject::parse("life_ceo"), Some(Subject::LifeCeo));
        assert_eq!(Subject::parse("invalid"), None);
    }

    #[test]
    fn test_subject_from_str_rejects_unknown() {
        let err = "widget".parse::<Subject>().unwrap_err();
        assert_eq!(err, BuildError::UnknownSubject("widget".to_string()));
    }

    #[test]
    fn test_as_str_round_trips() {
        for subject in Subject::all() {
            assert_eq!(Subject::parse(subject.as_str()), Some(subject));
        }
    }

    #[test]
    fn test_is_surface() {
        assert!(Subject::AdminPanel.is_surface());
        assert!(Subject::BillingPage.is_surface());
        assert!(Subject::Analytics.is_surface());
        assert!(Subject::LifeCeo.is_surface());
        assert!(!Subject::Post.is_surface());
        assert!(!Subject::All.is_surface());
    }
}
