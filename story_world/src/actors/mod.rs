//! Actor definitions: everything that exists in the world.

mod grammar;

pub use grammar::*;

use serde::{Deserialize, Serialize};

/// Unique identifier for every actor in a [`World`](crate::World).
///
/// Ids are dense indices handed out in creation order, so any ordered collection keyed by
/// them iterates the same way on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an item is good for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemClass {
    Plain,
    Treasure,
    Weapon,
}

/// The capability set of an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    /// A place. Never inside anything; connected to other places by one-way exits.
    Location {
        /// Display noun: "room", "driveway", "shed".
        noun: String,
        exits: Vec<ActorId>,
    },
    /// Something that can be carried.
    Item(ItemClass),
    /// Something things can be hidden in.
    Container,
    /// Something dreadful to come across.
    Horror,
    /// Takes turns, holds beliefs, converses.
    Animate,
}

/// An entity in the world graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub grammar: Grammar,
    pub(crate) location: Option<ActorId>,
    pub(crate) contents: Vec<ActorId>,
}

impl Actor {
    pub(crate) fn new(id: ActorId, name: impl Into<String>, kind: ActorKind, grammar: Grammar) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            grammar,
            location: None,
            contents: Vec::new(),
        }
    }

    /// The container or location currently holding this actor.
    pub fn location(&self) -> Option<ActorId> {
        self.location
    }

    /// Everything this actor currently holds, in arrival order.
    pub fn contents(&self) -> &[ActorId] {
        &self.contents
    }

    pub fn is_location(&self) -> bool {
        matches!(self.kind, ActorKind::Location { .. })
    }

    pub fn is_treasure(&self) -> bool {
        self.kind == ActorKind::Item(ItemClass::Treasure)
    }

    pub fn is_weapon(&self) -> bool {
        self.kind == ActorKind::Item(ItemClass::Weapon)
    }

    pub fn is_horror(&self) -> bool {
        self.kind == ActorKind::Horror
    }

    pub fn is_takeable(&self) -> bool {
        matches!(self.kind, ActorKind::Item(_))
    }

    pub fn is_animate(&self) -> bool {
        self.kind == ActorKind::Animate
    }

    pub fn is_container(&self) -> bool {
        self.kind == ActorKind::Container
    }

    /// Worth mentioning when seen: treasure, weapons, people and horrors.
    pub fn is_notable(&self) -> bool {
        self.is_treasure() || self.is_weapon() || self.is_animate() || self.is_horror()
    }

    /// Display noun for a location; empty for anything else.
    pub fn noun(&self) -> &str {
        match &self.kind {
            ActorKind::Location { noun, .. } => noun,
            _ => "",
        }
    }

    /// Exits of a location; empty for anything else.
    pub fn exits(&self) -> &[ActorId] {
        match &self.kind {
            ActorKind::Location { exits, .. } => exits,
            _ => &[],
        }
    }

    /// Render the name for a sentence whose initiator is `subject`.
    ///
    /// A name containing the subject's possessive ("Bob's bed") uses the subject's
    /// possessive pronoun instead ("his bed") when Bob is the one acting.
    pub fn render(&self, subject: Option<&Actor>) -> String {
        let mut name = self.name.clone();
        if let Some(subject) = subject {
            let possessive = format!("{}'s", subject.name);
            name = name.replace(&possessive, subject.grammar.possessive());
        }
        match self.grammar.article() {
            Some(article) => format!("{} {}", article, name),
            None => name,
        }
    }

    pub fn indefinite(&self) -> String {
        self.grammar.indefinite(&self.name)
    }
}
