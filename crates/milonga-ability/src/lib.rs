//! # Milonga Ability Engine
//!
//! Rule-based authorization for the Milonga platform: the rule
//! representation, the condition grammar, and the evaluator that answers
//! `can(action, subject)` for a compiled rule set.
//!
//! ## Overview
//!
//! This crate handles:
//! - **Actions**: the verbs being checked (`read`, `update`, `moderate`,
//!   ...); `manage` is the wildcard verb
//! - **Subjects**: the resource types rules target; `all` is the
//!   wildcard subject
//! - **Conditions**: declarative field predicates scoping a rule to
//!   matching instances
//! - **Rules**: action + subject + optional condition + polarity
//!   (allow/deny)
//! - **Abilities**: frozen, ordered rule lists with a pure evaluator
//!
//! The role-to-rule compiler that turns an identity into an ability
//! lives in `milonga-policy`; this crate only evaluates.
//!
//! ## Evaluation model
//!
//! ```text
//! Rule = Action + Subject [+ Condition] + polarity
//!
//! can(action, subject[, instance]):
//!   scan rules newest-first
//!   first rule whose action/subject/condition all apply decides
//!   allow rule -> true, deny rule -> false
//!   no rule applies -> false (fail closed)
//! ```
//!
//! Last-match-wins makes declaration order the only priority mechanism:
//! a `deny` declared after an `allow` overrides it, and vice versa.
//!
//! ## Usage
//!
//! ```rust
//! use milonga_ability::{Ability, Action, Condition, Post, Subject};
//!
//! let mut rules = Ability::builder();
//! rules.allow(Action::Read, Subject::Post);
//! rules.deny_when(Action::Read, Subject::Post, Condition::eq("isPublic", false));
//! let ability = rules.build();
//!
//! let hidden = Post { id: 1, user_id: 9, group_id: None, is_public: Some(false) };
//! let public = Post { id: 2, user_id: 9, group_id: None, is_public: Some(true) };
//! assert!(ability.cannot_on(Action::Read, &hidden));
//! assert!(ability.can_on(Action::Read, &public));
//! ```
//!
//! ## Failure semantics
//!
//! Evaluation is total: missing fields, type-incompatible comparisons,
//! and unknown payload shapes all resolve to a denial, never an error.
//! The only fallible surface is rule construction ([`BuildError`]),
//! which rejects unknown symbols and malformed condition documents
//! before an [`Ability`] ever exists.

pub mod ability;
pub mod actions;
pub mod condition;
pub mod error;
pub mod resources;
pub mod rule;
pub mod subjects;

// Re-export main types for convenience
pub use ability::{Ability, AbilityBuilder};
pub use actions::Action;
pub use condition::{Condition, FieldOp, FieldValue, FieldView};
pub use error::{BuildError, BuildResult};
pub use resources::{
    Analytics, Community, Event, Group, Memory, Message, Post, Resource, UserProfile,
};
pub use rule::Rule;
pub use subjects::Subject;
