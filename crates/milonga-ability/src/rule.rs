//! # Rules
//!
//! A rule pairs an action/subject pattern with an optional condition and
//! a polarity. Rules are plain immutable values; ordering and evaluation
//! live in [`Ability`](crate::Ability).

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::condition::{Condition, FieldView};
use crate::subjects::Subject;

/// A single authorization rule.
///
/// - `inverted = false` is an **allow** rule (`can` in the builder DSL)
/// - `inverted = true` is a **deny** rule (`cannot`)
///
/// A rule with no condition applies to every instance of its subject; a
/// conditional rule applies only to instances whose fields match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    /// The verb this rule covers; `Manage` covers every verb.
    pub action: Action,
    /// The subject this rule covers; `All` covers every subject.
    pub subject: Subject,
    /// Optional predicate scoping the rule to matching instances.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub condition: Option<Condition>,
    /// Polarity: `true` denies, `false` allows.
    #[serde(default)]
    pub inverted: bool,
}

impl Rule {
    /// Create a rule.
    pub fn new(
        action: Action,
        subject: Subject,
        condition: Option<Condition>,
        inverted: bool,
    ) -> Self {
        Self {
            action,
            subject,
            condition,
            inverted,
        }
    }

    /// Create an unconditional allow rule.
    pub fn allow(action: Action, subject: Subject) -> Self {
        Self::new(action, subject, None, false)
    }

    /// Create an unconditional deny rule.
    pub fn deny(action: Action, subject: Subject) -> Self {
        Self::new(action, subject, None, true)
    }

    /// Check whether this rule applies to a check.
    ///
    /// The rule applies when its action covers the requested action
    /// (exactly, or via the `Manage` wildcard), its subject covers the
    /// resolved subject (exactly, or via `All`), and its condition, if
    /// present, matches the candidate instance. A bare-name check
    /// carries no instance (`view = None`); conditional rules never
    /// apply to it.
    pub fn applies_to(
        &self,
        action: Action,
        subject: Subject,
        view: Option<&dyn FieldView>,
    ) -> bool {
        if !self.action.grants(action) {
            return false;
        }
        if self.subject != subject && self.subject != Subject::All {
            return false;
        }
        match (&self.condition, view) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(condition), Some(view)) => condition.matches(view),
        }
    }

    /// Check if this is an allow rule.
    pub fn is_allow(&self) -> bool {
        !self.inverted
    }

    /// Check if this is a deny rule.
    pub fn is_deny(&self) -> bool {
        self.inverted
    }
}
