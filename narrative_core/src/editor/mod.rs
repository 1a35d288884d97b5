//! Editor - compiles a chapter's event log into limited third-person prose.
//!
//! The editor walks the log once, front to back, handing out paragraphs to the point-of-view
//! characters in turn:
//! 1. **Filtering**: only events that happen where the current POV character is are kept
//! 2. **Anchoring**: a paragraph that opens somewhere the reader hasn't seen the POV
//!    character gets a leading "was in" sentence
//! 3. **Optimization**: the kept events go through the peephole pass in [`optimize`]
//! 4. **Rendering**: sentences are joined into a paragraph and written out

mod optimize;

pub use optimize::*;

use rand::Rng;
use std::collections::{BTreeMap, VecDeque};
use std::io::Write;
use story_world::{ActorId, World};

use crate::config::EditorConfig;
use crate::error::{NarrativeError, Result};
use crate::events::{phrases, Event, EventCollector};

/// Sentence separator within a paragraph.
const SENTENCE_BREAK: &str = "  ";

/// Consumes one chapter's log and writes it as paragraphs.
pub struct Editor {
    events: VecDeque<Event>,
    pov: Vec<ActorId>,
    pov_index: usize,
    config: EditorConfig,
    /// Where each character is, according to every event seen so far, shown or not.
    known_location: BTreeMap<ActorId, ActorId>,
    /// Where the reader last saw each character.
    last_shown: BTreeMap<ActorId, ActorId>,
}

impl Editor {
    /// Create an editor over `collector`'s log, following `pov` in round-robin order.
    pub fn new(collector: EventCollector, pov: Vec<ActorId>) -> Result<Self> {
        if pov.is_empty() {
            return Err(NarrativeError::NoPointOfView);
        }
        Ok(Self {
            events: collector.into_events().into(),
            pov,
            pov_index: 0,
            config: EditorConfig::default(),
            known_location: BTreeMap::new(),
            last_shown: BTreeMap::new(),
        })
    }

    /// Use `config`'s paragraph sizing, provided its range is not empty.
    pub fn with_config(mut self, config: EditorConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Whether every event has been consumed.
    pub fn is_finished(&self) -> bool {
        self.events.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// Where the narrator knows `who` to be so far.
    pub fn known_location(&self, who: ActorId) -> Option<ActorId> {
        self.known_location.get(&who).copied()
    }

    /// Pull events off the log for one paragraph told from `pov`'s point of view.
    ///
    /// Every event consumed updates the narrator's knowledge, but only those happening
    /// where `pov` is are returned. Stops at a random length within the configured range,
    /// or when the log runs out.
    pub fn generate_paragraph_events<R: Rng>(&mut self, pov: ActorId, rng: &mut R) -> Vec<Event> {
        let quota = rng.gen_range(self.config.min_paragraph..=self.config.max_paragraph);
        let mut paragraph = Vec::new();

        while paragraph.len() < quota {
            let Some(event) = self.events.pop_front() else {
                break;
            };

            self.known_location.insert(event.initiator(), event.location);
            if self.known_location.get(&pov) != Some(&event.location) {
                continue;
            }

            if paragraph.is_empty()
                && self.last_shown.get(&pov) != Some(&event.location)
                && !establishes_location(&event.phrase)
            {
                paragraph.push(Event::new(
                    phrases::WAS_IN,
                    vec![pov, event.location],
                    event.location,
                    false,
                ));
                self.last_shown.insert(pov, event.location);
            }

            self.last_shown.insert(event.initiator(), event.location);
            paragraph.push(event);
        }

        paragraph
    }

    /// The next paragraph, optimized, advancing to the next POV character.
    pub fn next_paragraph<R: Rng>(&mut self, world: &World, rng: &mut R) -> Vec<Event> {
        let pov = self.pov[self.pov_index];
        self.pov_index = (self.pov_index + 1) % self.pov.len();

        let events = self.generate_paragraph_events(pov, rng);
        tracing::trace!(pov = %world.name(pov), events = events.len(), "paragraph");
        optimize_paragraph_events(world, events)
    }

    /// Write the whole log out as paragraphs. Paragraphs with nothing in them are skipped.
    pub fn publish<R: Rng, W: Write>(&mut self, world: &World, rng: &mut R, out: &mut W) -> Result<()> {
        while !self.is_finished() {
            let paragraph = self.next_paragraph(world, rng);
            if paragraph.is_empty() {
                continue;
            }
            let text: Vec<String> = paragraph.iter().map(|event| event.render(world)).collect();
            write!(out, "{}\n\n", text.join(SENTENCE_BREAK))?;
        }
        Ok(())
    }
}

/// Whether a phrase already tells the reader where its subject is.
fn establishes_location(phrase: &str) -> bool {
    phrase.contains("went to") || phrase.contains("made <his-1> way to") || phrase == phrases::WAS_IN
}
