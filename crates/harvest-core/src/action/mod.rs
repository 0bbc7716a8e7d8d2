//! STRIPS actions: a precondition test plus a deterministic effect.
//!
//! Per-worker actions form the sealed [`Action`] enum. A planning tick bundles at most one action
//! per worker (plus an optional production order) into a [`ParallelAction`]; only whole ticks are
//! recorded in a state's history.

mod build;
mod deposit;
mod harvest;
mod move_to;
mod parallel;

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ActionError, Direction, GameState, PeasantId, ResourceKind};

pub use build::BuildPeasantAction;
pub use deposit::DepositAction;
pub use harvest::HarvestAction;
pub use move_to::MoveAction;
pub use parallel::ParallelAction;

pub trait StripsAction {
    /// Pure filter; never fails.
    fn preconditions_met(&self, state: &GameState) -> bool;

    /// The successor state. Rejects states on which `preconditions_met` is false.
    fn apply(&self, state: &GameState) -> Result<GameState, ActionError>;

    fn cost(&self) -> u32;
}

/// What a harvest picked up or a deposit handed in, and where the counterpart stood.
///
/// Filled in when the action is applied; the executor turns the direction into a directional
/// gather/deposit command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CargoTransfer {
    pub kind: ResourceKind,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Move(MoveAction),
    Harvest(HarvestAction),
    Deposit(DepositAction),
    BuildPeasant(BuildPeasantAction),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Move(_) => "Move",
            Action::Harvest(_) => "Harvest",
            Action::Deposit(_) => "Deposit",
            Action::BuildPeasant(_) => "BuildPeasant",
        }
    }

    /// The existing worker this action drives. Production is issued by the townhall, so
    /// `BuildPeasant` has none.
    pub fn worker(&self) -> Option<PeasantId> {
        match self {
            Action::Move(a) => Some(a.worker),
            Action::Harvest(a) => Some(a.worker),
            Action::Deposit(a) => Some(a.worker),
            Action::BuildPeasant(_) => None,
        }
    }

    /// Workers whose state this action changes, including a worker it creates.
    pub fn affected_workers(&self) -> Vec<PeasantId> {
        match self {
            Action::BuildPeasant(a) => a.spawned.map(|p| p.id).into_iter().collect(),
            other => other.worker().into_iter().collect(),
        }
    }

    /// Applies the effect to a working copy and returns the resolved action.
    ///
    /// Callers check `preconditions_met` against the same state first; `None` means the effect
    /// could not be resolved and `state` must be discarded.
    pub(crate) fn perform(&self, state: &mut GameState) -> Option<Action> {
        match self {
            Action::Move(a) => a.perform(state).map(Action::Move),
            Action::Harvest(a) => a.perform(state).map(Action::Harvest),
            Action::Deposit(a) => a.perform(state).map(Action::Deposit),
            Action::BuildPeasant(a) => a.perform(state).map(Action::BuildPeasant),
        }
    }
}

impl StripsAction for Action {
    fn preconditions_met(&self, state: &GameState) -> bool {
        match self {
            Action::Move(a) => a.preconditions_met(state),
            Action::Harvest(a) => a.preconditions_met(state),
            Action::Deposit(a) => a.preconditions_met(state),
            Action::BuildPeasant(a) => a.preconditions_met(state),
        }
    }

    /// Records a one-action tick.
    fn apply(&self, state: &GameState) -> Result<GameState, ActionError> {
        ParallelAction::new(vec![self.clone()]).apply(state)
    }

    fn cost(&self) -> u32 {
        match self {
            Action::Move(a) => a.cost(),
            Action::Harvest(_) | Action::Deposit(_) | Action::BuildPeasant(_) => 1,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(a) => a.fmt(f),
            Action::Harvest(a) => a.fmt(f),
            Action::Deposit(a) => a.fmt(f),
            Action::BuildPeasant(a) => a.fmt(f),
        }
    }
}

impl From<MoveAction> for Action {
    fn from(value: MoveAction) -> Self {
        Action::Move(value)
    }
}

impl From<HarvestAction> for Action {
    fn from(value: HarvestAction) -> Self {
        Action::Harvest(value)
    }
}

impl From<DepositAction> for Action {
    fn from(value: DepositAction) -> Self {
        Action::Deposit(value)
    }
}

impl From<BuildPeasantAction> for Action {
    fn from(value: BuildPeasantAction) -> Self {
        Action::BuildPeasant(value)
    }
}
