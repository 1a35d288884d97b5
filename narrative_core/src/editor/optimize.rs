//! Peephole pass over one paragraph's events.
//!
//! Works like a compiler's peephole optimizer, but for sentences: adjacent events by the
//! same character are rewritten into more readable, equivalent ones.
//!
//! 1. **Elision**: a repeated subject becomes a pronoun ("Bob yawned. He left.").
//! 2. **Fusion**: a chain of moves collapses into one "made his way to" the final stop.
//! 3. **Dedup**: verbatim repeats become ", twice", then ", several times", then vanish.

use story_world::World;

use crate::events::{phrases, Event};

/// Rewrite a paragraph's events in place order. Never reorders anything.
pub fn optimize_paragraph_events(world: &World, events: Vec<Event>) -> Vec<Event> {
    let mut optimized: Vec<Event> = Vec::with_capacity(events.len());

    for mut event in events {
        let Some(last) = optimized.last_mut() else {
            optimized.push(event);
            continue;
        };

        if event.initiator() == last.initiator() {
            if let Some(rest) = event.phrase.strip_prefix(phrases::SUBJECT) {
                event.phrase = format!("{}{}", phrases::PRONOUN, rest);
            }
            if is_movement(&last.phrase) && event.phrase == phrases::HE_WENT_TO {
                fuse_movement(last, &event);
                continue;
            }
        }

        dedup_append(world, &mut optimized, event);
    }

    optimized
}

fn is_movement(phrase: &str) -> bool {
    matches!(
        phrase,
        phrases::WENT_TO | phrases::HE_WENT_TO | phrases::MADE_WAY_TO
    )
}

/// Make `last` a move to wherever `next` went. The fused sentence names its subject again.
fn fuse_movement(last: &mut Event, next: &Event) {
    last.phrase = phrases::MADE_WAY_TO.to_string();
    last.participants[1] = next.participants[1];
    last.location = next.location;
}

fn dedup_append(world: &World, optimized: &mut Vec<Event>, event: Event) {
    let Some(last) = optimized.last_mut() else {
        optimized.push(event);
        return;
    };
    let shown = last.render(world);

    if event.render(world) == shown {
        last.phrase = format!("{}{}", event.phrase, phrases::TWICE);
    } else if suffixed(&event, phrases::TWICE).render(world) == shown {
        last.phrase = format!("{}{}", event.phrase, phrases::SEVERAL_TIMES);
    } else if suffixed(&event, phrases::SEVERAL_TIMES).render(world) == shown {
        // Absorbed.
    } else {
        optimized.push(event);
    }
}

fn suffixed(event: &Event, suffix: &str) -> Event {
    event.rephrase(format!("{}{}", event.phrase, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_world::{ActorId, Grammar};

    struct Scene {
        world: World,
        alice: ActorId,
        bob: ActorId,
        kitchen: ActorId,
        hall: ActorId,
        attic: ActorId,
    }

    fn scene() -> Scene {
        let mut world = World::new();
        let kitchen = world.add_location("kitchen", "room", Grammar::common());
        let hall = world.add_location("front hall", "room", Grammar::common());
        let attic = world.add_location("attic", "room", Grammar::common());
        let alice = world.add_animate("Alice", Grammar::feminine());
        let bob = world.add_animate("Bob", Grammar::masculine());
        Scene {
            world,
            alice,
            bob,
            kitchen,
            hall,
            attic,
        }
    }

    fn went(who: ActorId, to: ActorId) -> Event {
        Event::new(phrases::WENT_TO, vec![who, to], to, false)
    }

    fn rendered(world: &World, events: &[Event]) -> Vec<String> {
        events.iter().map(|e| e.render(world)).collect()
    }

    #[test]
    fn test_chain_of_moves_fuses() {
        let s = scene();
        let events = vec![
            went(s.alice, s.kitchen),
            went(s.alice, s.hall),
            went(s.alice, s.attic),
        ];

        let optimized = optimize_paragraph_events(&s.world, events);

        assert_eq!(rendered(&s.world, &optimized), vec!["Alice made her way to the attic."]);
        assert_eq!(optimized[0].location, s.attic);
    }

    #[test]
    fn test_fusion_names_the_subject() {
        let s = scene();
        let events = vec![
            Event::new("<1> yawned", vec![s.alice], s.kitchen, false),
            went(s.alice, s.hall),
            went(s.alice, s.attic),
            Event::new("<1> sneezed", vec![s.alice], s.attic, false),
        ];

        let optimized = optimize_paragraph_events(&s.world, events);

        assert_eq!(
            rendered(&s.world, &optimized),
            vec!["Alice yawned.", "Alice made her way to the attic.", "She sneezed."]
        );
    }

    #[test]
    fn test_other_initiator_breaks_chain() {
        let s = scene();
        let events = vec![
            went(s.alice, s.hall),
            Event::new("<1> saw <2>", vec![s.bob, s.alice], s.hall, false),
            went(s.alice, s.attic),
        ];

        let optimized = optimize_paragraph_events(&s.world, events);

        assert_eq!(
            rendered(&s.world, &optimized),
            vec!["Alice went to the front hall.", "Bob saw Alice.", "Alice went to the attic."]
        );
    }

    #[test]
    fn test_repeats_collapse_then_vanish() {
        let s = scene();
        let hello = || Event::new("'Hello, <2>,' said <1>", vec![s.bob, s.alice], s.hall, false);

        let optimized = optimize_paragraph_events(&s.world, vec![hello(), hello(), hello()]);
        assert_eq!(
            rendered(&s.world, &optimized),
            vec!["'Hello, Alice,' said Bob, several times."]
        );

        let optimized =
            optimize_paragraph_events(&s.world, vec![hello(), hello(), hello(), hello()]);
        assert_eq!(
            rendered(&s.world, &optimized),
            vec!["'Hello, Alice,' said Bob, several times."]
        );

        let optimized = optimize_paragraph_events(&s.world, vec![hello(), hello()]);
        assert_eq!(rendered(&s.world, &optimized), vec!["'Hello, Alice,' said Bob, twice."]);
    }

    #[test]
    fn test_elided_repeats_dedup_after_first() {
        let s = scene();
        let yawn = || Event::new("<1> yawned", vec![s.bob], s.hall, false);

        let optimized = optimize_paragraph_events(&s.world, vec![yawn(), yawn(), yawn()]);

        assert_eq!(
            rendered(&s.world, &optimized),
            vec!["Bob yawned.", "He yawned, twice."]
        );
    }

    #[test]
    fn test_empty_paragraph() {
        let s = scene();
        assert!(optimize_paragraph_events(&s.world, Vec::new()).is_empty());
    }
}
