//! # Ability
//!
//! The frozen, ordered rule store and its evaluator, plus the
//! append-only builder DSL that populates it.
//!
//! ## Evaluation order
//!
//! Checks scan the rule list from the **most recently declared** rule to
//! the least recently declared and return the polarity of the first rule
//! that applies (last-match-wins). An exhausted scan is a denial:
//! the engine fails closed.
//!
//! Because declaration order is the only notion of priority, a `deny`
//! declared after an `allow` overrides it for overlapping checks, and a
//! later `allow` can just as well re-open an earlier `deny`. Policy
//! authors order their calls accordingly.
//!
//! ## Immutability
//!
//! An [`Ability`] never changes after [`AbilityBuilder::build`]; checks
//! take `&self` and are safe from any number of threads without locking.
//! Role changes compile a fresh `Ability` and replace the old value.

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::condition::{Condition, FieldView};
use crate::resources::Resource;
use crate::rule::Rule;
use crate::subjects::Subject;

/// An immutable, ordered rule store compiled for one identity.
///
/// # Example
///
/// ```
/// use milonga_ability::{Ability, Action, Condition, Subject};
/// use serde_json::json;
///
/// let mut rules = Ability::builder();
/// rules.allow(Action::Read, Subject::Post);
/// rules.deny_when(Action::Read, Subject::Post, Condition::eq("isPublic", false));
/// let ability = rules.build();
///
/// let public = json!({"isPublic": true});
/// let hidden = json!({"isPublic": false});
/// assert!(ability.can_with(Action::Read, Subject::Post, &public));
/// assert!(ability.cannot_with(Action::Read, Subject::Post, &hidden));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Ability {
    rules: Vec<Rule>,
}

impl Ability {
    /// Start building a new ability.
    pub fn builder() -> AbilityBuilder {
        AbilityBuilder::new()
    }

    /// Check an action against a bare subject name.
    ///
    /// With no instance to inspect, conditional rules are vacuously
    /// unmatched: only unconditional rules can decide the check.
    pub fn can(&self, action: Action, subject: Subject) -> bool {
        self.check(action, subject, None)
    }

    /// Negation of [`can`](Self::can).
    pub fn cannot(&self, action: Action, subject: Subject) -> bool {
        !self.can(action, subject)
    }

    /// Check an action against a concrete resource instance.
    ///
    /// The instance supplies both its subject discriminator and the
    /// field view conditions match against.
    pub fn can_on<R: Resource>(&self, action: Action, resource: &R) -> bool {
        self.check(action, resource.subject(), Some(resource))
    }

    /// Negation of [`can_on`](Self::can_on).
    pub fn cannot_on<R: Resource>(&self, action: Action, resource: &R) -> bool {
        !self.can_on(action, resource)
    }

    /// Check an action against an explicit subject and field view.
    ///
    /// This is the adapter seam: callers with loosely-typed payloads
    /// (e.g. a `serde_json::Value` row) name the subject themselves.
    pub fn can_with(&self, action: Action, subject: Subject, view: &dyn FieldView) -> bool {
        self.check(action, subject, Some(view))
    }

    /// Negation of [`can_with`](Self::can_with).
    pub fn cannot_with(&self, action: Action, subject: Subject, view: &dyn FieldView) -> bool {
        !self.can_with(action, subject, view)
    }

    /// The rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the ability holds no rules (denies everything).
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn check(&self, action: Action, subject: Subject, view: Option<&dyn FieldView>) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.applies_to(action, subject, view))
            .map(|rule| rule.is_allow())
            .unwrap_or(false)
    }
}

/// Append-only builder DSL for an [`Ability`].
///
/// `allow`/`deny` calls append rules in declaration order; nothing is
/// deduplicated or reordered. `build` consumes the builder, so a buffer
/// can only be frozen once.
#[derive(Debug, Default)]
pub struct AbilityBuilder {
    rules: Vec<Rule>,
}

impl AbilityBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unconditional allow rule.
    pub fn allow(&mut self, action: Action, subject: Subject) -> &mut Self {
        self.push(Rule::allow(action, subject))
    }

    /// Append an allow rule scoped by a condition.
    pub fn allow_when(&mut self, action: Action, subject: Subject, condition: Condition) -> &mut Self {
        self.push(Rule::new(action, subject, Some(condition), false))
    }

    /// Append an unconditional deny rule.
    pub fn deny(&mut self, action: Action, subject: Subject) -> &mut Self {
        self.push(Rule::deny(action, subject))
    }

    /// Append a deny rule scoped by a condition.
    pub fn deny_when(&mut self, action: Action, subject: Subject, condition: Condition) -> &mut Self {
        self.push(Rule::new(action, subject, Some(condition), true))
    }

    /// Append an already-constructed rule.
    pub fn push(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Freeze the buffer into an immutable [`Ability`].
    pub fn build(self) -> Ability {
        Ability { rules: self.rules }
    }
}
