//! Event Model - templated happenings bound to participants and a place.
//!
//! A phrase is a template in a tiny placeholder language. For participant `n` (1-based):
//!
//! | token       | replaced with                          |
//! |-------------|----------------------------------------|
//! | `<n>`       | name with article ("the revolver")     |
//! | `<indef-n>` | indefinite form ("a revolver")         |
//! | `<his-n>`   | possessive ("his", "their")            |
//! | `<him-n>`   | accusative ("him", "them")             |
//! | `<he-n>`    | pronoun ("he", "they")                 |
//! | `<was-n>`   | "was" / "were"                         |
//! | `<is-n>`    | "is" / "are"                           |

mod collector;

pub use collector::*;

use serde::{Deserialize, Serialize};
use story_world::{ActorId, World};

/// Phrase templates the editor recognises structurally.
pub mod phrases {
    pub const WAS_IN: &str = "<1> <was-1> in <2>";
    pub const WENT_TO: &str = "<1> went to <2>";
    pub const HE_WENT_TO: &str = "<he-1> went to <2>";
    pub const MADE_WAY_TO: &str = "<1> made <his-1> way to <2>";
    pub const SUBJECT: &str = "<1>";
    pub const PRONOUN: &str = "<he-1>";
    pub const TWICE: &str = ", twice";
    pub const SEVERAL_TIMES: &str = ", several times";
}

/// Something that happened. `participants[0]` is always the initiator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub phrase: String,
    pub participants: Vec<ActorId>,
    /// Where the initiator was when this was emitted.
    pub location: ActorId,
    pub excl: bool,
}

impl Event {
    /// Create an event that happened at `location`.
    ///
    /// # Panics
    ///
    /// Panics if there are no participants; every event has an initiator.
    pub fn new(
        phrase: impl Into<String>,
        participants: Vec<ActorId>,
        location: ActorId,
        excl: bool,
    ) -> Self {
        assert!(!participants.is_empty(), "an event needs an initiator");
        Self {
            phrase: phrase.into(),
            participants,
            location,
            excl,
        }
    }

    pub fn initiator(&self) -> ActorId {
        self.participants[0]
    }

    /// A copy of this event with a different phrase.
    pub fn rephrase(&self, phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            ..self.clone()
        }
    }

    /// Substitute every placeholder, without final punctuation.
    pub fn render_phrase(&self, world: &World) -> String {
        let subject = world.actor(self.initiator());
        let mut phrase = self.phrase.clone();
        for (i, id) in self.participants.iter().enumerate() {
            let n = i + 1;
            let actor = world.actor(*id);
            let grammar = &actor.grammar;
            phrase = phrase
                .replace(&format!("<{}>", n), &actor.render(Some(subject)))
                .replace(&format!("<indef-{}>", n), &actor.indefinite())
                .replace(&format!("<his-{}>", n), grammar.possessive())
                .replace(&format!("<him-{}>", n), grammar.accusative())
                .replace(&format!("<he-{}>", n), grammar.pronoun())
                .replace(&format!("<was-{}>", n), grammar.was())
                .replace(&format!("<is-{}>", n), grammar.is());
        }
        phrase
    }

    /// Render as a finished sentence: substituted, punctuated and capitalised.
    pub fn render(&self, world: &World) -> String {
        let mut sentence = self.render_phrase(world);
        sentence.push(if self.excl { '!' } else { '.' });
        capitalize(&sentence)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
