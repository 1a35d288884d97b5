//! Agent Engine - characters who act on what they believe.
//!
//! The [`Stage`] owns the world, every character's mind and the chapter's event collector,
//! and runs turns strictly one at a time. A character's turn may reach into another
//! character's mind (handing over an item, telling them where something is, leaving them a
//! topic to respond to) but always through the explicit operations here.
//!
//! Structural preconditions (moving to where you already are, handing over something you do
//! not hold) are asserted: if they fail the engine's own bookkeeping is broken.

mod conversation;
mod senses;
mod turn;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use story_world::{ActorId, World};

use crate::beliefs::{Belief, BeliefKind, BeliefSet, ItemLocation};
use crate::config::{StoryConfig, Weights};
use crate::error::{NarrativeError, Result};
use crate::events::{Event, EventCollector};

/// What one character has just put to another and now awaits a response to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicKind {
    Greet,
    Speech,
    Question,
    WhereQuestion,
    ThreatGiveMe,
    ThreatTellMe,
    ThreatAgree,
}

/// A pending conversational obligation, consumed by the addressee's next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub kind: TopicKind,
    pub originator: ActorId,
    pub subject: Option<ActorId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nerves {
    #[default]
    Calm,
    Shaken,
}

/// The particular items a character knows to reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyItems {
    /// Threatens with it when carrying it; always retrieves it when found.
    pub weapon: Option<ActorId>,
    /// Calms shaken nerves.
    pub remedy: Option<ActorId>,
    /// Something that, once seen, must be talked about.
    pub alarm: Option<ActorId>,
}

/// Everything a character carries in its head.
#[derive(Debug, Clone, Default)]
pub struct Mind {
    pub beliefs: BeliefSet,
    pub topic: Option<Topic>,
    pub nerves: Nerves,
    pub items: KeyItems,
}

/// The world plus everyone's minds, the chapter log and the one source of randomness.
pub struct Stage<R> {
    world: World,
    minds: BTreeMap<ActorId, Mind>,
    collector: Option<EventCollector>,
    weights: Weights,
    rng: R,
}

impl Stage<StdRng> {
    /// A stage seeded and weighted as `config` says.
    pub fn from_config(world: World, config: &StoryConfig) -> Result<Self> {
        Stage::new(world, config.rng()).with_weights(config.weights)
    }
}

impl<R: Rng> Stage<R> {
    pub fn new(world: World, rng: R) -> Self {
        Self {
            world,
            minds: BTreeMap::new(),
            collector: None,
            weights: Weights::default(),
            rng,
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Result<Self> {
        self.set_weights(weights)?;
        Ok(self)
    }

    /// Replace the behaviour weights, rejecting any that would leave a roll with no outcome.
    pub fn set_weights(&mut self, weights: Weights) -> Result<()> {
        weights.validate()?;
        self.weights = weights;
        Ok(())
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Give an animate actor a mind, so it can take turns.
    pub fn add_character(&mut self, id: ActorId, items: KeyItems) -> Result<()> {
        let actor = self
            .world
            .get(id)
            .ok_or(story_world::WorldError::UnknownActor(id))?;
        if !actor.is_animate() {
            return Err(NarrativeError::NotAnimate {
                name: actor.name.clone(),
            });
        }
        self.minds.insert(
            id,
            Mind {
                items,
                ..Mind::default()
            },
        );
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for scene setup. Don't use it to move characters mid-chapter.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn mind(&self, id: ActorId) -> Option<&Mind> {
        self.minds.get(&id)
    }

    pub fn characters(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.minds.keys().copied()
    }

    /// Start logging into a fresh collector and drop any conversation left over.
    pub fn begin_chapter(&mut self) {
        self.collector = Some(EventCollector::new());
        for mind in self.minds.values_mut() {
            mind.topic = None;
        }
    }

    /// Detach the current collector. Until the next chapter, events go nowhere.
    pub fn take_collector(&mut self) -> Option<EventCollector> {
        self.collector.take()
    }

    pub fn collector(&self) -> Option<&EventCollector> {
        self.collector.as_ref()
    }

    pub fn events_logged(&self) -> usize {
        self.collector.as_ref().map_or(0, EventCollector::len)
    }

    /// Borrow the world and the random source together, e.g. to run the editor.
    pub fn world_and_rng(&mut self) -> (&World, &mut R) {
        (&self.world, &mut self.rng)
    }

    /// A JSON view of a character's state for debugging.
    pub fn dump_mind(&self, id: ActorId) -> Value {
        let Some(mind) = self.minds.get(&id) else {
            return Value::Null;
        };
        let beliefs: Vec<String> = mind
            .beliefs
            .iter()
            .flat_map(|belief| belief.describe(&self.world))
            .collect();
        json!({
            "name": self.world.name(id),
            "nerves": format!("{:?}", mind.nerves),
            "topic": mind.topic.map(|t| format!("{:?} from {}", t.kind, self.world.name(t.originator))),
            "beliefs": beliefs,
        })
    }

    // ------------------------------------------------------------------
    // Plumbing shared by the behaviour modules
    // ------------------------------------------------------------------

    fn mind_mut(&mut self, id: ActorId) -> &mut Mind {
        match self.minds.get_mut(&id) {
            Some(mind) => mind,
            None => panic!("{} is not a character", self.world.name(id)),
        }
    }

    fn beliefs(&self, id: ActorId) -> &BeliefSet {
        match self.minds.get(&id) {
            Some(mind) => &mind.beliefs,
            None => panic!("{} is not a character", self.world.name(id)),
        }
    }

    fn beliefs_mut(&mut self, id: ActorId) -> &mut BeliefSet {
        &mut self.mind_mut(id).beliefs
    }

    fn items(&self, id: ActorId) -> KeyItems {
        self.minds.get(&id).map(|m| m.items).unwrap_or_default()
    }

    /// Where `id` is. Characters are placed before they act, so an unplaced actor is a bug.
    fn location(&self, id: ActorId) -> ActorId {
        match self.world.location_of(id) {
            Some(location) => location,
            None => panic!("{} has not been placed anywhere", self.world.name(id)),
        }
    }

    /// Other characters sharing `id`'s location.
    fn witnesses(&self, id: ActorId) -> Vec<ActorId> {
        self.world
            .contents(self.location(id))
            .iter()
            .copied()
            .filter(|x| *x != id && self.minds.contains_key(x))
            .collect()
    }

    fn emit_event(&mut self, phrase: impl Into<String>, participants: &[ActorId], excl: bool) {
        let Some(collector) = self.collector.as_mut() else {
            return;
        };
        let location = match self.world.location_of(participants[0]) {
            Some(location) => location,
            None => panic!("{} acted from nowhere", self.world.name(participants[0])),
        };
        let event = Event::new(phrase, participants.to_vec(), location, excl);
        tracing::trace!(event = %event.render(&self.world), "emit");
        collector.collect(event);
    }

    fn emit(&mut self, phrase: impl Into<String>, participants: &[ActorId]) {
        self.emit_event(phrase, participants, false);
    }

    fn exclaim(&mut self, phrase: impl Into<String>, participants: &[ActorId]) {
        self.emit_event(phrase, participants, true);
    }

    /// True one time in `n`.
    fn chance(&mut self, n: u32) -> bool {
        self.rng.gen_ratio(1, n)
    }

    fn pick<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        options.choose(&mut self.rng).copied()
    }

    // ------------------------------------------------------------------
    // Beliefs
    // ------------------------------------------------------------------

    /// Record where `thing` is. Knowing where it is ends any suspicion it was hidden.
    pub fn believe_location(
        &mut self,
        who: ActorId,
        thing: ActorId,
        location: ActorId,
        informant: Option<ActorId>,
        concealer: Option<ActorId>,
    ) {
        let beliefs = self.beliefs_mut(who);
        beliefs.add(ItemLocation {
            subject: thing,
            location,
            informant,
            concealer,
        });
        beliefs.remove(BeliefKind::SuspicionOfHiding, thing);
    }

    fn remember(&mut self, who: ActorId, thing: ActorId, location: ActorId) {
        self.believe_location(who, thing, location, None, None);
    }

    pub fn recall_location(&self, who: ActorId, thing: ActorId) -> Option<ItemLocation> {
        self.beliefs(who).location_of(thing).copied()
    }

    fn forget_location(&mut self, who: ActorId, thing: ActorId) {
        self.beliefs_mut(who).remove(BeliefKind::ItemLocation, thing);
    }

    pub fn desire(&mut self, who: ActorId, thing: ActorId) {
        self.beliefs_mut(who).add(Belief::Desire { subject: thing });
    }

    pub fn quench_desire(&mut self, who: ActorId, thing: ActorId) {
        self.beliefs_mut(who).remove(BeliefKind::Desire, thing);
    }

    /// Treasure and weapons are always wanted; anything else only when explicitly desired.
    pub fn does_desire(&self, who: ActorId, thing: ActorId) -> bool {
        let actor = self.world.actor(thing);
        actor.is_takeable()
            && (actor.is_treasure() || actor.is_weapon() || self.beliefs(who).desires(thing))
    }

    /// The character's weapon, if it is carrying it right now.
    fn weapon_in_hand(&self, who: ActorId) -> Option<ActorId> {
        self.items(who)
            .weapon
            .filter(|weapon| self.world.holds(who, *weapon))
    }

    // ------------------------------------------------------------------
    // Handling things
    // ------------------------------------------------------------------

    pub fn pick_up(&mut self, who: ActorId, item: ActorId) {
        let here = self.location(who);
        assert_eq!(
            self.world.location_of(item),
            Some(here),
            "{} cannot pick up {}: it is not here",
            self.world.name(who),
            self.world.name(item)
        );
        self.emit("<1> picked up <2>", &[who, item]);
        self.world.relocate(item, who);
        self.remember(who, item, who);
        for other in self.witnesses(who) {
            self.remember(other, item, who);
        }
    }

    pub fn put_down(&mut self, who: ActorId, item: ActorId) {
        self.assert_holds(who, item);
        let here = self.location(who);
        self.emit("<1> put down <2>", &[who, item]);
        self.world.relocate(item, here);
        self.remember(who, item, here);
        for other in self.witnesses(who) {
            self.remember(other, item, here);
        }
    }

    pub fn give_to(&mut self, who: ActorId, other: ActorId, item: ActorId) {
        self.assert_holds(who, item);
        self.emit("<1> gave <3> to <2>", &[who, other, item]);
        self.world.relocate(item, other);
        self.remember(who, item, other);
        self.remember(other, item, other);
    }

    pub fn point_at(&mut self, who: ActorId, other: ActorId, item: ActorId) {
        self.assert_holds(who, item);
        self.emit("<1> pointed <3> at <2>", &[who, other, item]);
        self.remember(other, item, who);
    }

    fn assert_holds(&self, who: ActorId, item: ActorId) {
        assert!(
            self.world.holds(who, item),
            "{} is not holding {}",
            self.world.name(who),
            self.world.name(item)
        );
    }
}
