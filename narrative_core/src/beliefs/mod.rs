//! Belief Store - what each character thinks is true, independent of ground truth.
//!
//! A character's beliefs are a set keyed by (subject, kind):
//! - **ItemLocation**: where something is thought to be, who said so, who hid it there
//! - **Desire**: something the character wants to get hold of
//! - **Goal**: what the character has decided to do about something
//! - **BeliefsBelief**: a nested belief set, "what I think they believe"
//! - **SuspicionOfHiding**: someone hid this, but where?

mod belief;
mod store;

pub use belief::*;
pub use store::*;
