//! # Story World
//!
//! The stage on which the narrative plays out: actors, the locations they occupy and the
//! containment tree that says what is inside what. This crate holds ground truth only; what
//! any character *believes* about it lives in `narrative_core`.

pub mod actors;
pub mod error;
pub mod world;

pub use actors::*;
pub use error::*;
pub use world::*;
