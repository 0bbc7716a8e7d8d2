use core::fmt;

use crate::{CargoTransfer, GameState, PeasantId};

/// Hand the carried load in at the townhall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepositAction {
    pub worker: PeasantId,
    /// Set once applied.
    pub transfer: Option<CargoTransfer>,
}

impl DepositAction {
    pub fn new(worker: PeasantId) -> Self {
        Self {
            worker,
            transfer: None,
        }
    }

    pub fn preconditions_met(&self, state: &GameState) -> bool {
        let Some(peasant) = state.peasant(self.worker) else {
            return false;
        };
        peasant.is_carrying() && peasant.position.is_adjacent(state.townhall())
    }

    pub(crate) fn perform(&self, state: &mut GameState) -> Option<DepositAction> {
        let townhall = state.townhall();
        let peasant = state.peasant_mut(self.worker)?;
        let kind = peasant.cargo.take()?;
        let direction = peasant.position.direction_to(townhall)?;
        state.credit(kind);
        Some(DepositAction {
            worker: self.worker,
            transfer: Some(CargoTransfer { kind, direction }),
        })
    }
}

impl fmt::Display for DepositAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transfer {
            Some(t) => write!(f, "Deposit({}, {}, {})", self.worker, t.kind, t.direction),
            None => write!(f, "Deposit({})", self.worker),
        }
    }
}
