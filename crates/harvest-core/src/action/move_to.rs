use core::fmt;

use crate::{GameState, PeasantId, Position};

/// Walk a worker to `to`. Costs the Chebyshev distance travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveAction {
    pub worker: PeasantId,
    pub from: Position,
    pub to: Position,
}

impl MoveAction {
    pub fn new(worker: PeasantId, from: Position, to: Position) -> Self {
        Self { worker, from, to }
    }

    pub fn cost(&self) -> u32 {
        self.from.chebyshev_distance(self.to)
    }

    pub fn preconditions_met(&self, state: &GameState) -> bool {
        let Some(peasant) = state.peasant(self.worker) else {
            return false;
        };
        if peasant.position != self.from || !state.extents().contains(self.to) {
            return false;
        }
        match state.occupant(self.to) {
            Some(other) => other == self.worker,
            None => true,
        }
    }

    pub(crate) fn perform(&self, state: &mut GameState) -> Option<MoveAction> {
        let peasant = state.peasant_mut(self.worker)?;
        peasant.position = self.to;
        Some(*self)
    }
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {}, {})", self.worker, self.to.x, self.to.y)
    }
}
