//! Errors reported while building or validating a world.

use thiserror::Error;

use crate::ActorId;

/// Problems with a world's construction, reported before any simulation starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("no actor with id {0}")]
    UnknownActor(ActorId),

    #[error("{name} is not a location")]
    NotALocation { name: String },

    #[error("exits of {name} were already set")]
    ExitsAlreadySet { name: String },

    #[error("{name} lists itself as an exit")]
    SelfExit { name: String },

    #[error("{name} is reachable but has no exits")]
    NoExits { name: String },

    #[error("{name} is (transitively) inside itself")]
    ContainmentCycle { name: String },

    #[error("{name} is listed in the contents of {holder} but is located elsewhere")]
    ContentsMismatch { name: String, holder: String },

    #[error("{name} appears in the contents of more than one container")]
    DuplicateContainment { name: String },

    #[error("{name} has not been placed anywhere")]
    Unplaced { name: String },
}

pub type Result<T> = std::result::Result<T, WorldError>;
