//! # Narrative Core
//!
//! Belief-driven characters act out a story in a [`story_world::World`], and an editor
//! turns what they did into prose told from their points of view.
//!
//! ## Core Components
//!
//! - **beliefs**: what each character thinks is true, keyed by subject and kind
//! - **events**: templated happenings and the chapter's append-only log
//! - **agent**: the [`Stage`] where characters take turns, move, hide things and talk
//! - **editor**: point-of-view filtering, paragraphing and sentence fusion
//! - **publisher**: chapters, quotas and the finished book
//! - **config**: TOML-loadable [`StoryConfig`] with named behaviour weights
//!
//! ## Example
//!
//! ```no_run
//! use narrative_core::{KeyItems, Publisher, Stage, StoryConfig};
//! use story_world::{Grammar, World};
//!
//! let mut world = World::new();
//! let kitchen = world.add_location("kitchen", "room", Grammar::common());
//! let hall = world.add_location("front hall", "room", Grammar::common());
//! world.set_exits(kitchen, &[hall]).unwrap();
//! world.set_exits(hall, &[kitchen]).unwrap();
//! let alice = world.add_animate("Alice", Grammar::feminine());
//!
//! let config = StoryConfig::default();
//! let mut stage = Stage::from_config(world, &config).unwrap();
//! stage.add_character(alice, KeyItems::default()).unwrap();
//!
//! let publisher = Publisher::new(config, vec![alice], vec![kitchen, hall]);
//! publisher.publish(&mut stage, &mut std::io::stdout()).unwrap();
//! ```

pub mod agent;
pub mod beliefs;
pub mod config;
pub mod editor;
pub mod error;
pub mod events;
pub mod publisher;

pub use agent::*;
pub use beliefs::*;
pub use config::*;
pub use editor::*;
pub use error::*;
pub use events::*;
pub use publisher::*;
