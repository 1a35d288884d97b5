//! Errors surfaced to whoever drives the engine.

use story_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("invalid world: {0}")]
    World(#[from] WorldError),

    #[error("at least one point-of-view character is required")]
    NoPointOfView,

    #[error("the setting has no locations to place characters in")]
    EmptySetting,

    #[error("{name} cannot be in the cast; only animate actors take turns")]
    NotAnimate { name: String },

    #[error("{name} has no mind; add it to the stage as a character first")]
    NotACharacter { name: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NarrativeError>;
