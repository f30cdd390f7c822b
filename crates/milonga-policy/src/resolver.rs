//! # Role resolver
//!
//! Compiles an identity into an [`Ability`]: one role-tier rule
//! template, then the additive tag rules, in that order.
//!
//! Rule order matters. The evaluator is last-match-wins, so the
//! additive rules appended after a tier can only ever *widen* what the
//! tier granted; they can also re-open a predicate the tier's own
//! `deny` rules withheld if they overlap one. Templates keep their
//! denials subject-disjoint from the additive grants for that reason.
//!
//! Resolution is pure and allocation-cheap. Callers compile once per
//! session and recompile on role changes; a published ability is never
//! mutated in place.

use milonga_ability::{Ability, AbilityBuilder, Action, Condition, Subject};
use milonga_identity::{Identity, RoleTier};

/// Role tags that mark a member as trusted to browse shared memories
/// up to trust level 2.
const TRUST_TAGS: [&str; 3] = ["dancer", "teacher", "organizer"];

/// Compile the ability for an identity; `None` is a guest.
///
/// # Example
///
/// ```
/// use milonga_ability::{Action, Event, Subject};
/// use milonga_identity::Identity;
/// use milonga_policy::abilities_for;
///
/// let organizer = Identity::new(7).with_roles(["organizer"]);
/// let ability = abilities_for(Some(&organizer));
///
/// let own_event = Event::new(1, 7);
/// let other_event = Event::new(2, 8);
/// assert!(ability.can_on(Action::Update, &own_event));
/// assert!(ability.cannot_on(Action::Update, &other_event));
/// assert!(ability.cannot(Action::Access, Subject::AdminPanel));
/// ```
pub fn abilities_for(identity: Option<&Identity>) -> Ability {
    let mut rules = Ability::builder();

    let Some(user) = identity else {
        guest_rules(&mut rules);
        return rules.build();
    };

    match RoleTier::for_identity(user) {
        RoleTier::Admin => admin_rules(&mut rules),
        RoleTier::Moderator => moderator_rules(&mut rules),
        tier @ (RoleTier::Organizer | RoleTier::Teacher) => host_rules(&mut rules, user, tier),
        RoleTier::User => member_rules(&mut rules, user),
    }

    // Additive tag rules, always appended after the tier template.
    tag_rules(&mut rules, user);

    rules.build()
}

/// Guests see public content and public profiles, nothing else.
fn guest_rules(rules: &mut AbilityBuilder) {
    for subject in [
        Subject::Post,
        Subject::Event,
        Subject::Group,
        Subject::Community,
        Subject::Memory,
    ] {
        rules.allow_when(Action::Read, subject, Condition::eq("isPublic", true));
    }
    rules.allow(Action::View, Subject::UserProfile);
}

/// Admins and super admins: unrestricted, plus the gated surfaces.
fn admin_rules(rules: &mut AbilityBuilder) {
    rules.allow(Action::Manage, Subject::All);
    rules.allow(Action::Access, Subject::AdminPanel);
    rules.allow(Action::Access, Subject::BillingPage);
    rules.allow(Action::Access, Subject::Analytics);
}

/// Moderators: read everything, moderate content, manage group bans.
/// The admin panel and billing stay off limits.
fn moderator_rules(rules: &mut AbilityBuilder) {
    rules.allow(Action::Read, Subject::All);

    for subject in [
        Subject::Post,
        Subject::Event,
        Subject::Group,
        Subject::Memory,
        Subject::Community,
    ] {
        rules.allow(Action::Moderate, subject);
    }

    rules.allow(Action::Ban, Subject::Group);
    rules.allow(Action::Unban, Subject::Group);

    rules.allow_when(
        Action::Access,
        Subject::Analytics,
        Condition::eq("type", "moderation"),
    );

    rules.deny(Action::Manage, Subject::AdminPanel);
    rules.deny(Action::Access, Subject::BillingPage);
}

/// Organizers and teachers: ownership-scoped control over their own
/// posts, events, groups, and memories, on top of member-level reads.
fn host_rules(rules: &mut AbilityBuilder, user: &Identity, tier: RoleTier) {
    let id = user.id.value();
    let owns = Condition::eq("userId", id);
    let organizes = Condition::eq("organizerId", id);
    let heads = Condition::eq("ownerId", id);

    rules.allow(Action::Create, Subject::Post);
    rules.allow(Action::Read, Subject::Post);
    rules.allow_when(Action::Update, Subject::Post, owns.clone());
    rules.allow_when(Action::Delete, Subject::Post, owns.clone());

    rules.allow(Action::Create, Subject::Event);
    rules.allow(Action::Read, Subject::Event);
    rules.allow_when(Action::Update, Subject::Event, organizes.clone());
    rules.allow_when(Action::Delete, Subject::Event, organizes.clone());
    rules.allow_when(Action::Moderate, Subject::Event, organizes);

    rules.allow(Action::Create, Subject::Group);
    rules.allow_when(Action::Update, Subject::Group, heads.clone());
    rules.allow_when(Action::Delete, Subject::Group, heads.clone());
    rules.allow_when(Action::Invite, Subject::Group, heads);

    rules.allow(Action::Create, Subject::Memory);
    rules.allow(Action::Read, Subject::Memory);
    rules.allow_when(Action::Update, Subject::Memory, owns.clone());
    rules.allow_when(Action::Delete, Subject::Memory, owns);

    match tier {
        // Organizers get event-scoped analytics.
        RoleTier::Organizer => {
            rules.allow_when(
                Action::View,
                Subject::Analytics,
                Condition::eq("type", "event"),
            );
        }
        // Teachers publish educational content and moderate within
        // their own groups.
        RoleTier::Teacher => {
            let in_their_groups = Condition::is_in("groupId", [id]);
            rules.allow_when(Action::Moderate, Subject::Post, in_their_groups.clone());
            rules.allow_when(Action::Moderate, Subject::Memory, in_their_groups);
            rules.allow(Action::Publish, Subject::Post);
            rules.allow(Action::Publish, Subject::Memory);
        }
        _ => {}
    }

    rules.deny(Action::Access, Subject::AdminPanel);
    rules.deny(Action::Access, Subject::LifeCeo);
}

/// Default authenticated members: own-content CRUD, public
/// participation verbs, and no admin-tier surfaces at all.
fn member_rules(rules: &mut AbilityBuilder, user: &Identity) {
    let id = user.id.value();
    let owns = Condition::eq("userId", id);

    rules.allow(Action::Create, Subject::Post);
    rules.allow(Action::Read, Subject::Post);
    rules.allow_when(Action::Update, Subject::Post, owns.clone());
    rules.allow_when(Action::Delete, Subject::Post, owns.clone());

    rules.allow(Action::Create, Subject::Memory);
    rules.allow(Action::Read, Subject::Memory);
    rules.allow_when(Action::Update, Subject::Memory, owns.clone());
    rules.allow_when(Action::Delete, Subject::Memory, owns.clone());

    rules.allow(Action::Read, Subject::Event);
    rules.allow(Action::Rsvp, Subject::Event);

    rules.allow(Action::Read, Subject::Group);
    rules.allow(Action::Join, Subject::Group);
    rules.allow(Action::Leave, Subject::Group);

    rules.allow(Action::Create, Subject::Message);
    rules.allow_when(
        Action::Read,
        Subject::Message,
        Condition::any_of([
            Condition::eq("senderId", id),
            Condition::eq("recipientId", id),
        ]),
    );

    rules.allow(Action::Read, Subject::Community);
    rules.allow(Action::Join, Subject::Community);

    rules.allow(Action::View, Subject::UserProfile);
    rules.allow_when(Action::Edit, Subject::UserProfile, owns);

    rules.deny(Action::Access, Subject::AdminPanel);
    rules.deny(Action::Access, Subject::Analytics);
    rules.deny(Action::Access, Subject::BillingPage);
    rules.deny(Action::Access, Subject::LifeCeo);
}

/// Additive tag rules, independent of the selected tier.
fn tag_rules(rules: &mut AbilityBuilder, user: &Identity) {
    if user.has_role("curator") {
        rules.allow(Action::Filter, Subject::MemoryFilter);
        rules.allow(Action::Read, Subject::Memory);
    }

    if TRUST_TAGS.iter().any(|tag| user.has_role(tag)) {
        rules.allow_when(
            Action::Read,
            Subject::Memory,
            Condition::lte("trustLevel", 2),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milonga_ability::{Memory, Post};

    #[test]
    fn test_guest_ability_is_fixed_and_read_only() {
        let ability = abilities_for(None);
        // five public-content reads plus the profile view
        assert_eq!(ability.len(), 6);
        assert!(ability.rules().iter().all(|rule| rule.is_allow()));
    }

    #[test]
    fn test_tier_template_is_exclusive() {
        // a moderator does not also get the member template's grants
        let moderator = Identity::new(1).with_roles(["moderator"]);
        let ability = abilities_for(Some(&moderator));
        assert!(ability.cannot(Action::Create, Subject::Post));
        assert!(ability.cannot(Action::Rsvp, Subject::Event));
    }

    #[test]
    fn test_additive_rules_follow_the_tier() {
        let curator = Identity::new(1).with_roles(["curator"]);
        let ability = abilities_for(Some(&curator));
        let last = ability.rules().last().unwrap();
        assert_eq!(last.action, Action::Read);
        assert_eq!(last.subject, Subject::Memory);
    }

    #[test]
    fn test_trust_tag_bounds_memory_reads() {
        // "dancer" is both a member-tier alias and a trust tag; the
        // additive rule widens reads up to trust level 2
        let dancer = Identity::new(5).with_roles(["dancer"]);
        let ability = abilities_for(Some(&dancer));

        let mut trusted = Memory::new(1, 9);
        trusted.trust_level = Some(2);
        let mut inner_circle = Memory::new(2, 9);
        inner_circle.trust_level = Some(3);

        assert!(ability.can_on(Action::Read, &trusted));
        // the member tier's unconditional Memory read still applies
        assert!(ability.can_on(Action::Read, &inner_circle));
    }

    #[test]
    fn test_recompilation_is_deterministic() {
        let user = Identity::new(7).with_roles(["organizer", "curator"]);
        let first = abilities_for(Some(&user));
        let second = abilities_for(Some(&user));
        assert_eq!(first, second);

        let post = Post::new(1, 7);
        assert_eq!(
            first.can_on(Action::Update, &post),
            second.can_on(Action::Update, &post)
        );
    }
}
