//! # Milonga Policy
//!
//! The role-to-rule compiler for the Milonga platform: turns an
//! [`Identity`] (or its absence, a guest) into a compiled
//! [`Ability`] that route handlers and UI guards query.
//!
//! ## Architecture
//!
//! ```text
//! Identity ──> abilities_for ──> Ability ──> can(action, subject) -> bool
//!   (session layer)   (this crate)   (milonga-ability)     (callers)
//! ```
//!
//! Exactly one role-tier template is selected per identity (admin,
//! moderator, organizer/teacher, or default member); additive tag rules
//! (curator, trust tags) are appended after it. The compiled ability is
//! immutable; recompile and replace it when roles change.
//!
//! The ability is handed to call sites explicitly; there is no ambient
//! or global ability context. That keeps the security boundary visible
//! and testable.
//!
//! ## Usage
//!
//! ```rust
//! use milonga_ability::{Action, Subject};
//! use milonga_identity::Identity;
//! use milonga_policy::abilities_for;
//!
//! let moderator = Identity::new(3).with_roles(["moderator"]);
//! let ability = abilities_for(Some(&moderator));
//!
//! assert!(ability.can(Action::Moderate, Subject::Post));
//! assert!(ability.cannot(Action::Access, Subject::AdminPanel));
//!
//! // Guests get the fixed public read-only rule set.
//! let guest = abilities_for(None);
//! assert!(guest.cannot(Action::Update, Subject::Post));
//! ```

pub mod resolver;

pub use resolver::abilities_for;
