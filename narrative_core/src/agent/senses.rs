//! Arriving somewhere and taking in what is there.

use rand::Rng;
use story_world::ActorId;

use super::{Nerves, Stage, TopicKind};
use crate::events::phrases;

const SHUDDERS: &[&str] = &["shudder", "wave"];
const EMOTIONS: &[&str] = &["fear", "disgust", "sickness", "loathing"];
const FRIGHTS: &[&str] = &["screamed", "yelped", "went pale"];

impl<R: Rng> Stage<R> {
    /// Put a character somewhere without narrating how it got there.
    ///
    /// Only what it notices on arrival is logged; nobody sees it leave.
    pub fn place_in(&mut self, who: ActorId, location: ActorId) {
        assert!(
            self.world.actor(location).is_location(),
            "{} cannot be placed in {}, which is not a location",
            self.world.name(who),
            self.world.name(location)
        );
        self.world.relocate(who, location);
        self.emit(phrases::WAS_IN, &[who, location]);
        let contents = self.world.contents(location).to_vec();
        for x in contents {
            if x != who && self.world.actor(x).is_notable() {
                self.emit("<1> saw <2>", &[who, x]);
                self.remember(who, x, location);
            }
        }
    }

    /// Walk into `destination`, with everyone reacting as they should.
    ///
    /// # Panics
    ///
    /// Panics if `destination` is where `who` already is, or is not a location.
    pub fn move_to(&mut self, who: ActorId, destination: ActorId) {
        let here = self.location(who);
        assert_ne!(
            here,
            destination,
            "{} is already in {}",
            self.world.name(who),
            self.world.name(destination)
        );
        assert!(
            self.world.actor(destination).is_location(),
            "{} cannot move into {}, which is not a location",
            self.world.name(who),
            self.world.name(destination)
        );

        let noun = self.world.actor(here).noun().to_string();
        for witness in self.witnesses(who) {
            self.emit(format!("<1> saw <2> leave the {}", noun), &[witness, who]);
        }
        self.world.relocate(who, destination);
        self.emit(phrases::WENT_TO, &[who, destination]);

        if self.chance(self.weights.nostalgia_one_in) {
            self.exclaim("It was so nice being in <2> again", &[who, destination]);
        }
        self.look_around(who);
    }

    /// Move to a random exit of the current location.
    pub fn wander(&mut self, who: ActorId) {
        let here = self.location(who);
        let exits = self.world.exits(here).to_vec();
        match self.pick(&exits) {
            Some(exit) => self.move_to(who, exit),
            None => panic!("{} has no way out of {}", self.world.name(who), self.world.name(here)),
        }
    }

    fn look_around(&mut self, who: ActorId) {
        let here = self.location(who);
        let contents = self.world.contents(here).to_vec();
        for x in contents {
            if x == who {
                continue;
            }
            let actor = self.world.actor(x);
            if actor.is_horror() {
                self.confront_horror(who, x);
            } else if actor.is_animate() && self.minds.contains_key(&x) {
                if self.encounter(who, x) {
                    return;
                }
            } else if actor.is_notable() {
                self.emit("<1> saw <2>", &[who, x]);
                self.remember(who, x, here);
            }
        }
    }

    fn confront_horror(&mut self, who: ActorId, horror: ActorId) {
        let here = self.location(who);
        if self.recall_location(who, horror).is_some() {
            let amount = self.pick(SHUDDERS).unwrap_or("shudder");
            let emotion = self.pick(EMOTIONS).unwrap_or("fear");
            self.emit(
                format!("<1> felt a {} of {} as <he-1> looked at <2>", amount, emotion),
                &[who, horror],
            );
        } else {
            let verb = self.pick(FRIGHTS).unwrap_or("screamed");
            self.exclaim(format!("<1> {} at the sight of <indef-2>", verb), &[who, horror]);
            self.mind_mut(who).nerves = Nerves::Shaken;
            tracing::debug!(who = %self.world.name(who), "nerves shaken");
        }
        self.remember(who, horror, here);
    }

    /// Meet another character. Returns true if it turned into a threat, which ends looking around.
    fn encounter(&mut self, who: ActorId, other: ActorId) -> bool {
        let here = self.location(who);
        let noun = self.world.actor(here).noun().to_string();
        self.emit("<1> saw <2>", &[who, other]);
        self.emit(format!("<1> saw <2> walk into the {}", noun), &[other, who]);
        self.remember(who, other, here);

        let carried: Vec<ActorId> = self
            .world
            .contents(other)
            .iter()
            .copied()
            .filter(|y| self.world.actor(*y).is_treasure())
            .collect();

        let Some(weapon) = self.weapon_in_hand(who) else {
            self.greet(who, other, "'Hello, <2>,' said <1>");
            for y in carried {
                self.emit("<1> noticed <2> <was-2> carrying <indef-3>", &[who, other, y]);
            }
            return false;
        };

        if let Some(y) = carried.first().copied() {
            self.emit("<1> noticed <2> <was-2> carrying <indef-3>", &[who, other, y]);
            self.point_at(who, other, weapon);
            self.address(
                who,
                other,
                TopicKind::ThreatGiveMe,
                Some(y),
                "'Please give me <3>, <2>, or I shall shoot you,' <he-1> said",
                &[who, other, y],
            );
            return true;
        }

        let actionable: Vec<ActorId> = self
            .beliefs(who)
            .suspicions()
            .into_iter()
            .filter(|s| self.world.actor(*s).is_treasure())
            .filter(|s| self.beliefs(who).location_of(*s).is_none())
            .collect();
        if let Some(suspect) = self.pick(&actionable) {
            self.point_at(who, other, weapon);
            self.address(
                who,
                other,
                TopicKind::ThreatTellMe,
                Some(suspect),
                "'Tell me where you have hidden <3>, <2>, or I shall shoot you,' <he-1> said",
                &[who, other, suspect],
            );
            return true;
        }

        self.greet(who, other, "'Hello, <2>,' said <1>");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{house, texts};
    use super::super::{KeyItems, Stage, TopicKind};
    use super::*;
    use crate::beliefs::Belief;
    use rand::rngs::mock::StepRng;
    use story_world::Grammar;

    // StepRng(0, 0) always takes the first option and wins every one-in-n chance,
    // so each arrival below is followed by a nostalgic remark.

    #[test]
    fn test_move_to_is_seen_leaving_and_arriving() {
        let h = house();
        let mut stage = Stage::new(h.world, StepRng::new(0, 0));
        stage.add_character(h.alice, KeyItems::default()).unwrap();
        stage.add_character(h.bob, KeyItems::default()).unwrap();
        stage.place_in(h.alice, h.kitchen);
        stage.place_in(h.bob, h.kitchen);
        stage.begin_chapter();

        stage.move_to(h.alice, h.hall);

        let log = texts(&stage);
        assert_eq!(log[0], "Bob saw Alice leave the room.");
        assert_eq!(log[1], "Alice went to the front hall.");
        assert_eq!(log[2], "It was so nice being in the front hall again!");
        assert_eq!(stage.world().location_of(h.alice), Some(h.hall));
        assert!(stage.world().contents(h.hall).contains(&h.alice));
        assert!(!stage.world().contents(h.kitchen).contains(&h.alice));

        let event = &stage.collector().unwrap().events()[0];
        assert_eq!(event.location, h.kitchen);
    }

    #[test]
    #[should_panic(expected = "is already in")]
    fn test_move_to_current_location_panics() {
        let h = house();
        let mut stage = Stage::new(h.world, StepRng::new(0, 0));
        stage.add_character(h.alice, KeyItems::default()).unwrap();
        stage.place_in(h.alice, h.kitchen);
        stage.move_to(h.alice, h.kitchen);
    }

    #[test]
    fn test_meeting_greets() {
        let h = house();
        let mut stage = Stage::new(h.world, StepRng::new(0, 0));
        stage.add_character(h.alice, KeyItems::default()).unwrap();
        stage.add_character(h.bob, KeyItems::default()).unwrap();
        stage.place_in(h.alice, h.kitchen);
        stage.place_in(h.bob, h.hall);
        stage.begin_chapter();

        stage.move_to(h.alice, h.hall);

        assert_eq!(
            texts(&stage),
            vec![
                "Alice went to the front hall.",
                "It was so nice being in the front hall again!",
                "Alice saw Bob.",
                "Bob saw Alice walk into the room.",
                "'Hello, Bob,' said Alice.",
            ]
        );
        let topic = stage.mind(h.bob).unwrap().topic.unwrap();
        assert_eq!(topic.kind, TopicKind::Greet);
        assert_eq!(topic.originator, h.alice);
        assert_eq!(stage.recall_location(h.alice, h.bob).unwrap().location, h.hall);
    }

    #[test]
    fn test_unarmed_greets_before_noticing_treasure() {
        let mut h = house();
        let jewels = h.world.add_treasure("stolen jewels", Grammar::plural(), h.hall);
        let mut stage = Stage::new(h.world, StepRng::new(0, 0));
        stage.add_character(h.alice, KeyItems::default()).unwrap();
        stage.add_character(h.bob, KeyItems::default()).unwrap();
        stage.place_in(h.alice, h.hall);
        stage.place_in(h.bob, h.kitchen);
        stage.pick_up(h.alice, jewels);
        stage.begin_chapter();

        stage.move_to(h.bob, h.hall);

        let log = texts(&stage);
        assert_eq!(
            log[4..].to_vec(),
            vec![
                "'Hello, Alice,' said Bob.",
                "Bob noticed Alice was carrying some stolen jewels.",
            ]
        );
        let topic = stage.mind(h.alice).unwrap().topic.unwrap();
        assert_eq!(topic.kind, TopicKind::Greet);
    }

    #[test]
    fn test_armed_meets_treasure_threatens_instead_of_greeting() {
        let mut h = house();
        let revolver = h.world.add_weapon("revolver", h.kitchen);
        let jewels = h.world.add_treasure("stolen jewels", Grammar::plural(), h.hall);
        let mut stage = Stage::new(h.world, StepRng::new(0, 0));
        stage
            .add_character(
                h.bob,
                KeyItems {
                    weapon: Some(revolver),
                    ..KeyItems::default()
                },
            )
            .unwrap();
        stage.add_character(h.alice, KeyItems::default()).unwrap();
        stage.place_in(h.bob, h.kitchen);
        stage.place_in(h.alice, h.hall);
        stage.pick_up(h.bob, revolver);
        stage.pick_up(h.alice, jewels);
        stage.begin_chapter();

        stage.move_to(h.bob, h.hall);

        let log = texts(&stage);
        assert_eq!(log[4], "Bob noticed Alice was carrying some stolen jewels.");
        assert_eq!(log[5], "Bob pointed the revolver at Alice.");
        assert_eq!(
            log[6],
            "'Please give me the stolen jewels, Alice, or I shall shoot you,' he said."
        );
        assert!(!log.iter().any(|line| line.contains("Hello")));

        let topic = stage.mind(h.alice).unwrap().topic.unwrap();
        assert_eq!(topic.kind, TopicKind::ThreatGiveMe);
        assert_eq!(topic.subject, Some(jewels));
        assert_eq!(stage.recall_location(h.alice, revolver).unwrap().location, h.bob);
    }

    #[test]
    fn test_suspicion_leads_to_tell_me_threat() {
        let mut h = house();
        let revolver = h.world.add_weapon("revolver", h.kitchen);
        let cabinet = h.world.add_container("cabinet", Grammar::common(), h.hall);
        let falcon = h.world.add_treasure("golden falcon", Grammar::common(), cabinet);
        let mut stage = Stage::new(h.world, StepRng::new(0, 0));
        stage
            .add_character(
                h.bob,
                KeyItems {
                    weapon: Some(revolver),
                    ..KeyItems::default()
                },
            )
            .unwrap();
        stage.add_character(h.alice, KeyItems::default()).unwrap();
        stage.place_in(h.bob, h.kitchen);
        stage.place_in(h.alice, h.kitchen);
        stage.pick_up(h.bob, revolver);
        stage.move_to(h.alice, h.hall);
        stage.beliefs_mut(h.bob).add(Belief::SuspicionOfHiding { subject: falcon });
        stage.forget_location(h.bob, falcon);
        stage.begin_chapter();

        stage.move_to(h.bob, h.hall);

        let topic = stage.mind(h.alice).unwrap().topic.unwrap();
        assert_eq!(topic.kind, TopicKind::ThreatTellMe);
        assert_eq!(topic.subject, Some(falcon));
        assert!(texts(&stage).contains(
            &"'Tell me where you have hidden the golden falcon, Alice, or I shall shoot you,' he said."
                .to_string()
        ));
    }

    #[test]
    fn test_horror_frightens_then_unsettles() {
        let mut h = house();
        let body = h.world.add_horror("dead body", h.hall);
        let mut stage = Stage::new(h.world, StepRng::new(0, 0));
        stage.add_character(h.alice, KeyItems::default()).unwrap();
        stage.place_in(h.alice, h.kitchen);
        stage.begin_chapter();

        stage.move_to(h.alice, h.hall);
        assert_eq!(stage.mind(h.alice).unwrap().nerves, Nerves::Shaken);
        assert_eq!(stage.recall_location(h.alice, body).unwrap().location, h.hall);

        stage.move_to(h.alice, h.kitchen);
        stage.move_to(h.alice, h.hall);

        let log = texts(&stage);
        assert_eq!(log[2], "Alice screamed at the sight of a dead body!");
        assert_eq!(
            log.last().unwrap(),
            "Alice felt a shudder of fear as she looked at the dead body."
        );
    }

    #[test]
    fn test_place_in_notices_without_departure() {
        let mut h = house();
        let falcon = h.world.add_treasure("golden falcon", Grammar::common(), h.hall);
        let mut stage = Stage::new(h.world, StepRng::new(0, 0));
        stage.add_character(h.alice, KeyItems::default()).unwrap();
        stage.add_character(h.bob, KeyItems::default()).unwrap();
        stage.place_in(h.bob, h.kitchen);
        stage.place_in(h.alice, h.kitchen);
        stage.begin_chapter();

        stage.place_in(h.alice, h.hall);

        assert_eq!(
            texts(&stage),
            vec!["Alice was in the front hall.", "Alice saw the golden falcon."]
        );
        assert_eq!(stage.recall_location(h.alice, falcon).unwrap().location, h.hall);
    }
}
