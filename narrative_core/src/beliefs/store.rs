//! Belief set - the typed store behind every character's mind.

use std::collections::BTreeMap;
use story_world::ActorId;

use super::{Belief, BeliefKind, Goal, ItemLocation};

/// A character's beliefs, at most one per (subject, kind).
///
/// Ordered by key so enumeration is stable from run to run; seeded simulations depend on it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BeliefSet {
    beliefs: BTreeMap<(ActorId, BeliefKind), Belief>,
}

impl BeliefSet {
    /// Create a new empty belief set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a belief, replacing any belief of the same kind about the same subject.
    pub fn add(&mut self, belief: impl Into<Belief>) {
        let belief = belief.into();
        self.beliefs.insert(belief.key(), belief);
    }

    /// Forget the belief of `kind` about `subject`. Forgetting nothing is fine.
    pub fn remove(&mut self, kind: BeliefKind, subject: ActorId) -> Option<Belief> {
        self.beliefs.remove(&(subject, kind))
    }

    pub fn get(&self, kind: BeliefKind, subject: ActorId) -> Option<&Belief> {
        self.beliefs.get(&(subject, kind))
    }

    /// Every actor this set holds at least one belief about.
    pub fn subjects(&self) -> Vec<ActorId> {
        let mut subjects: Vec<_> = self.beliefs.keys().map(|(subject, _)| *subject).collect();
        subjects.dedup();
        subjects
    }

    /// Every belief held about `subject`.
    pub fn beliefs_for(&self, subject: ActorId) -> impl Iterator<Item = &Belief> {
        self.beliefs
            .range((subject, BeliefKind::ItemLocation)..=(subject, BeliefKind::SuspicionOfHiding))
            .map(|(_, belief)| belief)
    }

    /// Every belief of one kind.
    pub fn beliefs_of_kind(&self, kind: BeliefKind) -> impl Iterator<Item = &Belief> {
        self.beliefs.values().filter(move |b| b.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Belief> {
        self.beliefs.values()
    }

    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }

    /// Where we think `subject` is.
    pub fn location_of(&self, subject: ActorId) -> Option<&ItemLocation> {
        match self.get(BeliefKind::ItemLocation, subject) {
            Some(Belief::ItemLocation(belief)) => Some(belief),
            _ => None,
        }
    }

    /// What we have decided to do about `subject`.
    pub fn goal_for(&self, subject: ActorId) -> Option<&Goal> {
        match self.get(BeliefKind::Goal, subject) {
            Some(Belief::Goal(goal)) => Some(goal),
            _ => None,
        }
    }

    pub fn desires(&self, subject: ActorId) -> bool {
        self.get(BeliefKind::Desire, subject).is_some()
    }

    pub fn suspects_hidden(&self, subject: ActorId) -> bool {
        self.get(BeliefKind::SuspicionOfHiding, subject).is_some()
    }

    /// Subjects we suspect someone of hiding.
    pub fn suspicions(&self) -> Vec<ActorId> {
        self.beliefs_of_kind(BeliefKind::SuspicionOfHiding)
            .map(Belief::subject)
            .collect()
    }

    /// What we think `other` believes, if we have formed any opinion.
    pub fn nested(&self, other: ActorId) -> Option<&BeliefSet> {
        match self.get(BeliefKind::BeliefsBelief, other) {
            Some(Belief::BeliefsBelief { beliefs, .. }) => Some(beliefs),
            _ => None,
        }
    }

    /// What we think `other` believes, created empty on first use.
    pub fn nested_mut(&mut self, other: ActorId) -> &mut BeliefSet {
        let entry = self
            .beliefs
            .entry((other, BeliefKind::BeliefsBelief))
            .or_insert_with(|| Belief::BeliefsBelief {
                subject: other,
                beliefs: BeliefSet::new(),
            });
        match entry {
            Belief::BeliefsBelief { beliefs, .. } => beliefs,
            _ => unreachable!("beliefs are keyed by their own kind"),
        }
    }
}
