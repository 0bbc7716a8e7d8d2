use thiserror::Error;

use crate::{PeasantId, Position, ResourceKind};

/// Raised when an action is applied to a state it was not validated against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("preconditions of {action} do not hold")]
    PreconditionsNotMet { action: String },

    #[error("a tick must contain at least one action")]
    EmptyTick,
}

/// Planning inputs rejected before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("map extents must be positive, got {width}x{height}")]
    InvalidExtents { width: i32, height: i32 },

    #[error("required {kind} must not be negative, got {value}")]
    NegativeThreshold { kind: ResourceKind, value: i64 },

    #[error("starting {kind} must not be negative, got {value}")]
    NegativeStock { kind: ResourceKind, value: i64 },

    #[error("player {player} owns no townhall")]
    MissingTownhall { player: u32 },

    #[error("no workers and peasant production is disabled")]
    NoWorkers,

    #[error("{needed} {kind} still required but the map has no {kind} nodes")]
    NoResourceNodes { kind: ResourceKind, needed: u32 },

    #[error("worker {id} at {position} is outside the map")]
    WorkerOutOfBounds { id: PeasantId, position: Position },

    #[error("workers {first} and {second} share cell {position}")]
    WorkersOverlap {
        first: PeasantId,
        second: PeasantId,
        position: Position,
    },
}
