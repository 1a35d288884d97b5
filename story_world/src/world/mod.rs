//! The world graph - every actor, where it is, and how places connect.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use crate::actors::{Actor, ActorId, ActorKind, Grammar, ItemClass};
use crate::error::{Result, WorldError};

/// Owns all actors and their containment tree.
///
/// Containment is kept consistent in both directions: an actor's `location` and its holder's
/// `contents` are only ever changed together by [`World::relocate`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct World {
    actors: Vec<Actor>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: impl Into<String>, kind: ActorKind, grammar: Grammar) -> ActorId {
        let id = ActorId(self.actors.len() as u32);
        self.actors.push(Actor::new(id, name, kind, grammar));
        id
    }

    /// Add a location. Exits are set afterwards with [`World::set_exits`].
    pub fn add_location(
        &mut self,
        name: impl Into<String>,
        noun: impl Into<String>,
        grammar: Grammar,
    ) -> ActorId {
        self.push(
            name,
            ActorKind::Location {
                noun: noun.into(),
                exits: Vec::new(),
            },
            grammar,
        )
    }

    /// Add a non-location actor and place it inside `location`.
    pub fn add_actor(
        &mut self,
        name: impl Into<String>,
        kind: ActorKind,
        grammar: Grammar,
        location: ActorId,
    ) -> ActorId {
        let id = self.push(name, kind, grammar);
        self.relocate(id, location);
        id
    }

    /// Add an animate actor. It stays unplaced until the engine places it in a scene.
    pub fn add_animate(&mut self, name: impl Into<String>, grammar: Grammar) -> ActorId {
        self.push(name, ActorKind::Animate, grammar)
    }

    pub fn add_item(&mut self, name: impl Into<String>, location: ActorId) -> ActorId {
        self.add_actor(name, ActorKind::Item(ItemClass::Plain), Grammar::common(), location)
    }

    pub fn add_treasure(
        &mut self,
        name: impl Into<String>,
        grammar: Grammar,
        location: ActorId,
    ) -> ActorId {
        self.add_actor(name, ActorKind::Item(ItemClass::Treasure), grammar, location)
    }

    pub fn add_weapon(&mut self, name: impl Into<String>, location: ActorId) -> ActorId {
        self.add_actor(name, ActorKind::Item(ItemClass::Weapon), Grammar::common(), location)
    }

    pub fn add_container(
        &mut self,
        name: impl Into<String>,
        grammar: Grammar,
        location: ActorId,
    ) -> ActorId {
        self.add_actor(name, ActorKind::Container, grammar, location)
    }

    pub fn add_horror(&mut self, name: impl Into<String>, location: ActorId) -> ActorId {
        self.add_actor(name, ActorKind::Horror, Grammar::common(), location)
    }

    /// Set the exits of a location. Exits are fixed once set, and never lead back to
    /// the same location.
    pub fn set_exits(&mut self, location: ActorId, exits: &[ActorId]) -> Result<()> {
        for exit in exits {
            let target = self.get(*exit).ok_or(WorldError::UnknownActor(*exit))?;
            if *exit == location {
                return Err(WorldError::SelfExit {
                    name: target.name.clone(),
                });
            }
            if !target.is_location() {
                return Err(WorldError::NotALocation {
                    name: target.name.clone(),
                });
            }
        }

        let actor = self
            .actors
            .get_mut(location.index())
            .ok_or(WorldError::UnknownActor(location))?;
        match &mut actor.kind {
            ActorKind::Location { exits: current, .. } if current.is_empty() => {
                current.extend_from_slice(exits);
                Ok(())
            }
            ActorKind::Location { .. } => Err(WorldError::ExitsAlreadySet {
                name: actor.name.clone(),
            }),
            _ => Err(WorldError::NotALocation {
                name: actor.name.clone(),
            }),
        }
    }

    /// Get an actor by id.
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.index())
    }

    /// Get an actor by id. Ids only come from this world, so an unknown id is a bug.
    pub fn actor(&self, id: ActorId) -> &Actor {
        match self.actors.get(id.index()) {
            Some(actor) => actor,
            None => panic!("actor {} does not exist in this world", id),
        }
    }

    pub fn name(&self, id: ActorId) -> &str {
        &self.actor(id).name
    }

    pub fn location_of(&self, id: ActorId) -> Option<ActorId> {
        self.actor(id).location
    }

    pub fn contents(&self, id: ActorId) -> &[ActorId] {
        &self.actor(id).contents
    }

    pub fn exits(&self, id: ActorId) -> &[ActorId] {
        self.actor(id).exits()
    }

    /// Whether `holder` directly holds `item`.
    pub fn holds(&self, holder: ActorId, item: ActorId) -> bool {
        self.location_of(item) == Some(holder)
    }

    /// Iterate over all actors in creation order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Whether `id` is `ancestor` or is (transitively) inside it.
    pub fn is_within(&self, id: ActorId, ancestor: ActorId) -> bool {
        let mut current = Some(id);
        while let Some(here) = current {
            if here == ancestor {
                return true;
            }
            current = self.location_of(here);
        }
        false
    }

    /// Move `actor` into `destination`, keeping both sides of containment in step.
    ///
    /// # Panics
    ///
    /// Panics if the move would put a location inside anything, or put an actor inside
    /// itself or something it contains. Either means the caller's bookkeeping is broken.
    pub fn relocate(&mut self, actor: ActorId, destination: ActorId) {
        assert!(
            !self.actor(actor).is_location(),
            "locations cannot be moved ({})",
            self.name(actor)
        );
        assert!(
            !self.is_within(destination, actor),
            "moving {} into {} would create a containment cycle",
            self.name(actor),
            self.name(destination)
        );

        if let Some(old) = self.actors[actor.index()].location.take() {
            self.actors[old.index()].contents.retain(|x| *x != actor);
        }
        self.actors[actor.index()].location = Some(destination);
        self.actors[destination.index()].contents.push(actor);
    }

    /// Check the structural invariants a simulation relies on.
    ///
    /// Every location reachable from `setting` must have an exit, and containment must be
    /// exclusive, consistent and acyclic.
    pub fn validate(&self, setting: &[ActorId]) -> Result<()> {
        let mut holders: Vec<Option<ActorId>> = vec![None; self.actors.len()];

        for holder in &self.actors {
            for item in &holder.contents {
                let held = self.get(*item).ok_or(WorldError::UnknownActor(*item))?;
                if holders[item.index()].replace(holder.id).is_some() {
                    return Err(WorldError::DuplicateContainment {
                        name: held.name.clone(),
                    });
                }
                if held.location != Some(holder.id) {
                    return Err(WorldError::ContentsMismatch {
                        name: held.name.clone(),
                        holder: holder.name.clone(),
                    });
                }
            }
        }

        for actor in &self.actors {
            if let Some(location) = actor.location {
                if holders[actor.id.index()] != Some(location) {
                    return Err(WorldError::ContentsMismatch {
                        name: actor.name.clone(),
                        holder: self.name(location).to_string(),
                    });
                }
                if self.has_cycle(actor.id) {
                    return Err(WorldError::ContainmentCycle {
                        name: actor.name.clone(),
                    });
                }
            } else if !actor.is_location() && !actor.is_animate() {
                return Err(WorldError::Unplaced {
                    name: actor.name.clone(),
                });
            }
        }

        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<ActorId> = VecDeque::new();
        for start in setting {
            let location = self.get(*start).ok_or(WorldError::UnknownActor(*start))?;
            if !location.is_location() {
                return Err(WorldError::NotALocation {
                    name: location.name.clone(),
                });
            }
            queue.push_back(*start);
        }
        while let Some(here) = queue.pop_front() {
            if !seen.insert(here) {
                continue;
            }
            let exits = self.exits(here);
            if exits.is_empty() {
                return Err(WorldError::NoExits {
                    name: self.name(here).to_string(),
                });
            }
            if exits.contains(&here) {
                return Err(WorldError::SelfExit {
                    name: self.name(here).to_string(),
                });
            }
            queue.extend(exits.iter().copied());
        }

        Ok(())
    }

    fn has_cycle(&self, start: ActorId) -> bool {
        let mut steps = 0;
        let mut current = self.location_of(start);
        while let Some(here) = current {
            if here == start || steps > self.actors.len() {
                return true;
            }
            steps += 1;
            current = self.location_of(here);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_house() -> (World, ActorId, ActorId) {
        let mut world = World::new();
        let kitchen = world.add_location("kitchen", "room", Grammar::common());
        let hall = world.add_location("front hall", "room", Grammar::common());
        world.set_exits(kitchen, &[hall]).unwrap();
        world.set_exits(hall, &[kitchen]).unwrap();
        (world, kitchen, hall)
    }

    #[test]
    fn test_relocate_keeps_containment_exclusive() {
        let (mut world, kitchen, hall) = small_house();
        let cupboards = world.add_container("cupboards", Grammar::plural(), kitchen);
        let falcon = world.add_treasure("golden falcon", Grammar::common(), kitchen);

        world.relocate(falcon, cupboards);
        world.relocate(falcon, hall);

        let holders: Vec<_> = world
            .actors()
            .filter(|a| a.contents().contains(&falcon))
            .map(|a| a.id)
            .collect();
        assert_eq!(holders, vec![hall]);
        assert_eq!(world.location_of(falcon), Some(hall));
        assert!(world.contents(cupboards).is_empty());
    }

    #[test]
    fn test_is_within() {
        let (mut world, kitchen, _) = small_house();
        let cupboards = world.add_container("cupboards", Grammar::plural(), kitchen);
        let brandy = world.add_item("bottle of brandy", cupboards);

        assert!(world.is_within(brandy, kitchen));
        assert!(world.is_within(brandy, brandy));
        assert!(!world.is_within(kitchen, brandy));
    }

    #[test]
    #[should_panic(expected = "containment cycle")]
    fn test_relocate_rejects_cycles() {
        let (mut world, kitchen, _) = small_house();
        let box_a = world.add_container("box", Grammar::common(), kitchen);
        let box_b = world.add_container("crate", Grammar::common(), box_a);
        world.relocate(box_a, box_b);
    }

    #[test]
    fn test_exits_are_set_once() {
        let (mut world, kitchen, hall) = small_house();
        let err = world.set_exits(kitchen, &[hall]).unwrap_err();
        assert!(matches!(err, WorldError::ExitsAlreadySet { .. }));
    }

    #[test]
    fn test_exits_must_be_locations() {
        let mut world = World::new();
        let kitchen = world.add_location("kitchen", "room", Grammar::common());
        let mailbox = world.add_container("mailbox", Grammar::common(), kitchen);
        let err = world.set_exits(kitchen, &[mailbox]).unwrap_err();
        assert_eq!(
            err,
            WorldError::NotALocation {
                name: "mailbox".into()
            }
        );
    }

    #[test]
    fn test_exits_never_lead_back_to_the_same_room() {
        let mut world = World::new();
        let kitchen = world.add_location("kitchen", "room", Grammar::common());
        let hall = world.add_location("front hall", "room", Grammar::common());

        let err = world.set_exits(kitchen, &[hall, kitchen]).unwrap_err();

        assert_eq!(
            err,
            WorldError::SelfExit {
                name: "kitchen".into()
            }
        );
        assert!(world.exits(kitchen).is_empty());
    }

    #[test]
    fn test_validate_ok() {
        let (mut world, kitchen, _) = small_house();
        world.add_container("cupboards", Grammar::plural(), kitchen);
        world.add_animate("Alice", Grammar::feminine());
        assert!(world.validate(&[kitchen]).is_ok());
    }

    #[test]
    fn test_validate_reachable_dead_end() {
        let (mut world, _, hall) = small_house();
        let shed = world.add_location("shed", "shed", Grammar::common());
        let path = world.add_location("path", "path", Grammar::common());
        world.set_exits(path, &[shed]).unwrap();

        // Unreachable from the hall: fine.
        assert!(world.validate(&[hall]).is_ok());

        let err = world.validate(&[path]).unwrap_err();
        assert_eq!(err, WorldError::NoExits { name: "shed".into() });
    }
}
