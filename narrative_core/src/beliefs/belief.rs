//! Belief definitions - individual claims a character holds about an actor.

use serde::{Deserialize, Serialize};
use story_world::{ActorId, World};

use super::BeliefSet;

/// The kind of a belief. A belief set holds at most one belief per (subject, kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BeliefKind {
    ItemLocation,
    Desire,
    Goal,
    BeliefsBelief,
    SuspicionOfHiding,
}

/// "I think `subject` is in `location`."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLocation {
    pub subject: ActorId,
    pub location: ActorId,
    /// Who told us, if we did not see it ourselves.
    pub informant: Option<ActorId>,
    /// Who hid it there, if we know.
    pub concealer: Option<ActorId>,
}

impl ItemLocation {
    /// A location we saw for ourselves.
    pub fn seen(subject: ActorId, location: ActorId) -> Self {
        Self {
            subject,
            location,
            informant: None,
            concealer: None,
        }
    }
}

/// What a character can decide to do about something alarming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseOfAction {
    CallThePolice,
    DisposeOf,
}

impl CourseOfAction {
    /// The verb phrase spliced into dialogue before the object: "we should <phrase> the body".
    pub fn phrase(self) -> &'static str {
        match self {
            CourseOfAction::CallThePolice => "call the police about",
            CourseOfAction::DisposeOf => "try to dispose of",
        }
    }
}

/// "I have decided to `course` `subject`."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub subject: ActorId,
    pub course: CourseOfAction,
}

/// A single claim about an actor.
#[derive(Debug, Clone, PartialEq)]
pub enum Belief {
    ItemLocation(ItemLocation),
    Desire { subject: ActorId },
    Goal(Goal),
    /// What this character thinks `subject` (another character) believes.
    BeliefsBelief { subject: ActorId, beliefs: BeliefSet },
    SuspicionOfHiding { subject: ActorId },
}

impl Belief {
    pub fn kind(&self) -> BeliefKind {
        match self {
            Belief::ItemLocation(_) => BeliefKind::ItemLocation,
            Belief::Desire { .. } => BeliefKind::Desire,
            Belief::Goal(_) => BeliefKind::Goal,
            Belief::BeliefsBelief { .. } => BeliefKind::BeliefsBelief,
            Belief::SuspicionOfHiding { .. } => BeliefKind::SuspicionOfHiding,
        }
    }

    pub fn subject(&self) -> ActorId {
        match self {
            Belief::ItemLocation(belief) => belief.subject,
            Belief::Goal(goal) => goal.subject,
            Belief::Desire { subject }
            | Belief::BeliefsBelief { subject, .. }
            | Belief::SuspicionOfHiding { subject } => *subject,
        }
    }

    /// The key this belief is stored under.
    pub fn key(&self) -> (ActorId, BeliefKind) {
        (self.subject(), self.kind())
    }

    /// A first-person line for debug dumps, one per belief (nested sets indent further).
    pub fn describe(&self, world: &World) -> Vec<String> {
        let name = |id: ActorId| world.actor(id).render(None);
        match self {
            Belief::ItemLocation(belief) => {
                let mut line = format!("{} is in {}", name(belief.subject), name(belief.location));
                if let Some(informant) = belief.informant {
                    line.push_str(&format!(" ({} told me)", name(informant)));
                }
                if let Some(concealer) = belief.concealer {
                    line.push_str(&format!(" ({} hid it there)", name(concealer)));
                }
                vec![line]
            }
            Belief::Desire { subject } => vec![format!("I want {}", name(*subject))],
            Belief::Goal(goal) => vec![format!(
                "I want to {} {}",
                goal.course.phrase(),
                name(goal.subject)
            )],
            Belief::BeliefsBelief { subject, beliefs } => {
                let mut lines = vec![format!("{} believes:", name(*subject))];
                for belief in beliefs.iter() {
                    lines.extend(belief.describe(world).into_iter().map(|l| format!("  {}", l)));
                }
                lines
            }
            Belief::SuspicionOfHiding { subject } => {
                vec![format!("I think someone hid {}", name(*subject))]
            }
        }
    }
}

impl From<ItemLocation> for Belief {
    fn from(belief: ItemLocation) -> Self {
        Belief::ItemLocation(belief)
    }
}

impl From<Goal> for Belief {
    fn from(goal: Goal) -> Self {
        Belief::Goal(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_world::Grammar;

    #[test]
    fn test_belief_key() {
        let falcon = ActorId(3);
        let belief = Belief::from(ItemLocation::seen(falcon, ActorId(1)));
        assert_eq!(belief.key(), (falcon, BeliefKind::ItemLocation));

        let desire = Belief::Desire { subject: falcon };
        assert_eq!(desire.key(), (falcon, BeliefKind::Desire));
    }

    #[test]
    fn test_describe() {
        let mut world = World::new();
        let kitchen = world.add_location("kitchen", "room", Grammar::common());
        let bob = world.add_animate("Bob", Grammar::masculine());
        let falcon = world.add_treasure("golden falcon", Grammar::common(), kitchen);

        let belief = Belief::from(ItemLocation {
            subject: falcon,
            location: kitchen,
            informant: None,
            concealer: Some(bob),
        });
        assert_eq!(
            belief.describe(&world),
            vec!["the golden falcon is in the kitchen (Bob hid it there)".to_string()]
        );

        let suspicion = Belief::SuspicionOfHiding { subject: falcon };
        assert_eq!(
            suspicion.describe(&world),
            vec!["I think someone hid the golden falcon".to_string()]
        );
    }
}
