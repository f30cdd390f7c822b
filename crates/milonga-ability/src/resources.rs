//! # Resources
//!
//! Concrete resource records and their typed field projections.
//!
//! Each record implements [`FieldView`] by projecting its fields under
//! the camelCase names the stored documents use (`userId`, `organizerId`,
//! `isPublic`, ...), and [`Resource`] to name its [`Subject`]. Absent
//! optional fields project as missing, so conditions over them fail
//! closed.
//!
//! The engine never fetches these records; the data-access layer builds
//! them (or hands the evaluator a `serde_json::Value` row directly via
//! [`Ability::can_with`](crate::Ability::can_with)).

use serde::{Deserialize, Serialize};

use crate::condition::{FieldValue, FieldView};
use crate::subjects::Subject;

/// A resource instance that knows its own subject type.
///
/// The subject discriminator is what lets the evaluator resolve an
/// instance check without callers naming the subject twice.
pub trait Resource: FieldView {
    /// The subject this resource belongs to.
    fn subject(&self) -> Subject;
}

/// A feed post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_public: Option<bool>,
}

impl Post {
    pub fn new(id: i64, user_id: i64) -> Self {
        Self {
            id,
            user_id,
            ..Self::default()
        }
    }
}

impl FieldView for Post {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "userId" => Some(FieldValue::Int(self.user_id)),
            "groupId" => self.group_id.map(FieldValue::Int),
            "isPublic" => self.is_public.map(FieldValue::Bool),
            _ => None,
        }
    }
}

impl Resource for Post {
    fn subject(&self) -> Subject {
        Subject::Post
    }
}

/// An event (milonga, practica, workshop).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub organizer_id: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_public: Option<bool>,
}

impl Event {
    pub fn new(id: i64, organizer_id: i64) -> Self {
        Self {
            id,
            organizer_id,
            ..Self::default()
        }
    }
}

impl FieldView for Event {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "organizerId" => Some(FieldValue::Int(self.organizer_id)),
            "isPublic" => self.is_public.map(FieldValue::Bool),
            _ => None,
        }
    }
}

impl Resource for Event {
    fn subject(&self) -> Subject {
        Subject::Event
    }
}

/// A member-run group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: i64,
    pub owner_id: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_public: Option<bool>,
}

impl Group {
    pub fn new(id: i64, owner_id: i64) -> Self {
        Self {
            id,
            owner_id,
            ..Self::default()
        }
    }
}

impl FieldView for Group {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "ownerId" => Some(FieldValue::Int(self.owner_id)),
            "isPublic" => self.is_public.map(FieldValue::Bool),
            _ => None,
        }
    }
}

impl Resource for Group {
    fn subject(&self) -> Subject {
        Subject::Group
    }
}

/// A direct message between two members.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
}

impl Message {
    pub fn new(id: i64, sender_id: i64, recipient_id: i64) -> Self {
        Self {
            id,
            sender_id,
            recipient_id,
        }
    }
}

impl FieldView for Message {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "senderId" => Some(FieldValue::Int(self.sender_id)),
            "recipientId" => Some(FieldValue::Int(self.recipient_id)),
            _ => None,
        }
    }
}

impl Resource for Message {
    fn subject(&self) -> Subject {
        Subject::Message
    }
}

/// A shared memory (photo, story).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trust_level: Option<i64>,
}

impl Memory {
    pub fn new(id: i64, user_id: i64) -> Self {
        Self {
            id,
            user_id,
            ..Self::default()
        }
    }
}

impl FieldView for Memory {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "userId" => Some(FieldValue::Int(self.user_id)),
            "groupId" => self.group_id.map(FieldValue::Int),
            "isPublic" => self.is_public.map(FieldValue::Bool),
            "trustLevel" => self.trust_level.map(FieldValue::Int),
            _ => None,
        }
    }
}

impl Resource for Memory {
    fn subject(&self) -> Subject {
        Subject::Memory
    }
}

/// A city community.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: i64,
    pub admin_id: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_public: Option<bool>,
}

impl Community {
    pub fn new(id: i64, admin_id: i64) -> Self {
        Self {
            id,
            admin_id,
            ..Self::default()
        }
    }
}

impl FieldView for Community {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "adminId" => Some(FieldValue::Int(self.admin_id)),
            "isPublic" => self.is_public.map(FieldValue::Bool),
            _ => None,
        }
    }
}

impl Resource for Community {
    fn subject(&self) -> Subject {
        Subject::Community
    }
}

/// A member's public profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
}

impl UserProfile {
    pub fn new(id: i64, user_id: i64) -> Self {
        Self { id, user_id }
    }
}

impl FieldView for UserProfile {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "userId" => Some(FieldValue::Int(self.user_id)),
            _ => None,
        }
    }
}

impl Resource for UserProfile {
    fn subject(&self) -> Subject {
        Subject::UserProfile
    }
}

/// An analytics dashboard, scoped by kind (`"event"`, `"moderation"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Analytics {
    /// Dashboard scope; stored under the wire name `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
}

impl Analytics {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
        }
    }
}

impl FieldView for Analytics {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "type" => self.kind.clone().map(FieldValue::Str),
            _ => None,
        }
    }
}

impl Resource for Analytics {
    fn subject(&self) -> Subject {
        Subject::Analytics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_projection_uses_wire_names() {
        let post = Post {
            id: 1,
            user_id: 7,
            group_id: Some(3),
            is_public: Some(true),
        };
        assert_eq!(post.field("userId"), Some(FieldValue::Int(7)));
        assert_eq!(post.field("groupId"), Some(FieldValue::Int(3)));
        assert_eq!(post.field("isPublic"), Some(FieldValue::Bool(true)));
        assert_eq!(post.field("user_id"), None);
    }

    #[test]
    fn test_absent_optionals_project_as_missing() {
        let post = Post::new(1, 7);
        assert_eq!(post.field("groupId"), None);
        assert_eq!(post.field("isPublic"), None);
    }

    #[test]
    fn test_subject_discriminators() {
        assert_eq!(Post::new(1, 2).subject(), Subject::Post);
        assert_eq!(Event::new(1, 2).subject(), Subject::Event);
        assert_eq!(Group::new(1, 2).subject(), Subject::Group);
        assert_eq!(Message::new(1, 2, 3).subject(), Subject::Message);
        assert_eq!(Memory::new(1, 2).subject(), Subject::Memory);
        assert_eq!(Community::new(1, 2).subject(), Subject::Community);
        assert_eq!(UserProfile::new(1, 2).subject(), Subject::UserProfile);
        assert_eq!(Analytics::new("event").subject(), Subject::Analytics);
    }

    #[test]
    fn test_analytics_projects_type() {
        let analytics = Analytics::new("moderation");
        assert_eq!(
            analytics.field("type"),
            Some(FieldValue::Str("moderation".to_string()))
        );
        assert_eq!(Analytics::default().field("type"), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let event = Event {
            id: 5,
            organizer_id: 7,
            is_public: Some(true),
        };
        let encoded = serde_json::to_value(&event).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({"id": 5, "organizerId": 7, "isPublic": true})
        );
    }
}
