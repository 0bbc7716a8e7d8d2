//! Deterministic, immutable world model for multi-worker resource planning.
//!
//! A [`GameState`] is a snapshot of one player's economy: workers, resource nodes, the townhall
//! and the gold/wood totals. States are never mutated once built; every successor is produced by
//! applying one [`ParallelAction`] (a planning tick) to a parent.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod error;
pub mod history;
pub mod peasant;
pub mod position;
pub mod resource;
pub mod rules;
pub mod snapshot;
pub mod state;

pub use action::{
    Action, BuildPeasantAction, CargoTransfer, DepositAction, HarvestAction, MoveAction,
    ParallelAction, StripsAction,
};
pub use error::{ActionError, ValidationError};
pub use history::History;
pub use peasant::{Peasant, PeasantId, PeasantIdAllocator};
pub use position::{Direction, MapExtents, Position};
pub use resource::{ResourceKind, ResourceLocation};
pub use rules::{HARVEST_QUANTUM, PEASANT_GOLD_COST, POPULATION_CAP};
pub use snapshot::{PlanningGoal, ResourceSnapshot, UnitKind, UnitSnapshot, WorldSnapshot};
pub use state::GameState;
