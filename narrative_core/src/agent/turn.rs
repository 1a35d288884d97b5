//! Taking a turn: the idle priorities, hiding things and looking for them.

use rand::Rng;
use story_world::ActorId;

use super::Stage;
use crate::beliefs::{Belief, BeliefKind, ItemLocation};

const GESTURES: &[&str] = &[
    "<1> yawned",
    "<1> gazed thoughtfully into the distance",
    "<1> thought <he-1> heard something",
    "<1> scratched <his-1> head",
    "<1> immediately had a feeling something was amiss",
];

impl<R: Rng> Stage<R> {
    /// Advance `who` by one turn.
    pub fn live(&mut self, who: ActorId) {
        if let Some(topic) = self.mind_mut(who).topic.take() {
            self.converse(who, topic);
            return;
        }

        let here = self.location(who);
        let desired = self
            .world
            .contents(here)
            .iter()
            .copied()
            .find(|x| *x != who && self.does_desire(who, *x));
        if let Some(thing) = desired {
            self.pick_up(who, thing);
            return;
        }

        let mut fixated_on = self
            .world
            .contents(who)
            .iter()
            .copied()
            .find(|x| self.world.actor(*x).is_treasure());
        if fixated_on.is_none() {
            if let Some(weapon) = self.weapon_in_hand(who) {
                if self.chance(self.weights.weapon_fixation_one_in) {
                    fixated_on = Some(weapon);
                }
            }
        }

        let people_about = !self.witnesses(who).is_empty();

        let roll = self.rng.gen_range(0..self.weights.turn_roll);
        if roll < self.weights.hide_and_seek && !people_about {
            return self.hide_and_seek(who, fixated_on);
        }
        if roll < self.weights.hide_and_seek + self.weights.wander {
            return self.wander(who);
        }
        let gesture = (roll - self.weights.hide_and_seek - self.weights.wander) as usize;
        match GESTURES.get(gesture) {
            Some(phrase) => self.emit(*phrase, &[who]),
            None => self.wander(who),
        }
    }

    /// Hide what we are fixated on, or go looking for something worth having.
    ///
    /// # Panics
    ///
    /// Panics if `who` is not holding the item it is fixated on.
    pub fn hide_and_seek(&mut self, who: ActorId, fixated_on: Option<ActorId>) {
        let here = self.location(who);
        let containers: Vec<ActorId> = self
            .world
            .contents(here)
            .iter()
            .copied()
            .filter(|x| self.world.actor(*x).is_container())
            .collect();
        let Some(container) = self.pick(&containers) else {
            return self.wander(who);
        };

        if let Some(thing) = fixated_on {
            self.assert_holds(who, thing);
            tracing::debug!(
                who = %self.world.name(who),
                thing = %self.world.name(thing),
                container = %self.world.name(container),
                "hiding"
            );
            self.emit("<1> hid <2> in <3>", &[who, thing, container]);
            self.world.relocate(thing, container);
            self.believe_location(who, thing, container, None, Some(who));
            return self.wander(who);
        }

        let mut remembered: Vec<ItemLocation> = self
            .beliefs(who)
            .beliefs_of_kind(BeliefKind::ItemLocation)
            .filter_map(|belief| match belief {
                Belief::ItemLocation(belief) if belief.location == container => Some(*belief),
                _ => None,
            })
            .filter(|belief| self.world.actor(belief.subject).is_takeable())
            .collect();
        if !remembered.is_empty() && self.chance(self.weights.ignore_memory_one_in) {
            remembered.clear();
        }

        match self.pick(&remembered) {
            Some(belief) => self.recheck(who, container, belief),
            None => self.search(who, container),
        }
    }

    /// Go back to something we think is in `container`, to take it or just to make sure.
    fn recheck(&mut self, who: ActorId, container: ActorId, belief: ItemLocation) {
        let thing = belief.subject;
        let present = self.world.location_of(thing) == Some(container);
        let retrieving =
            self.items(who).weapon == Some(thing) || self.chance(self.weights.retrieve_one_in);
        tracing::debug!(
            who = %self.world.name(who),
            thing = %self.world.name(thing),
            retrieving,
            present,
            "rechecking"
        );

        if retrieving {
            if belief.concealer == Some(who) {
                self.emit("<1> retrieved <3> <he-1> had hidden in <2>", &[who, container, thing]);
            } else {
                self.emit("<1> retrieved <3> from <2>", &[who, container, thing]);
            }
            if present {
                self.world.relocate(thing, who);
                self.remember(who, thing, who);
            } else {
                self.exclaim("But <he-2> <was-2> missing", &[who, thing]);
                self.forget_location(who, thing);
            }
        } else {
            self.emit("<1> checked that <3> <was-3> still in <2>", &[who, container, thing]);
            if !present {
                self.exclaim("But <he-2> <was-2> missing", &[who, thing]);
                self.forget_location(who, thing);
                self.beliefs_mut(who)
                    .add(Belief::SuspicionOfHiding { subject: thing });
            }
        }
    }

    /// Look through a container we know nothing about.
    fn search(&mut self, who: ActorId, container: ActorId) {
        self.emit("<1> searched <2>", &[who, container]);
        let mut desired = Vec::new();
        for thing in self.world.contents(container).to_vec() {
            self.remember(who, thing, container);
            if self.does_desire(who, thing) {
                desired.push(thing);
            }
        }
        if let Some(thing) = self.pick(&desired) {
            self.exclaim("<1> found <2> there, and took <him-2>", &[who, thing, container]);
            self.world.relocate(thing, who);
            self.remember(who, thing, who);
        }
    }
}
