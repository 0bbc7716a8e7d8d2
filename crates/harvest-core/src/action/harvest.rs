use core::fmt;

use crate::{CargoTransfer, GameState, PeasantId};

/// Pick up one quantum from an adjacent node. Gold nodes are searched before trees and the first
/// adjacent match is used, not the richest or closest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HarvestAction {
    pub worker: PeasantId,
    /// Set once applied.
    pub transfer: Option<CargoTransfer>,
}

impl HarvestAction {
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
        !peasant.is_carrying() && state.adjacent_node(peasant.position).is_some()
    }

    pub(crate) fn perform(&self, state: &mut GameState) -> Option<HarvestAction> {
        let position = state.peasant(self.worker)?.position;
        let node = state.adjacent_node(position)?;
        let direction = position.direction_to(node.position)?;
        if !state.take_quantum(node) {
            return None;
        }
        state.peasant_mut(self.worker)?.cargo = Some(node.kind);
        Some(HarvestAction {
            worker: self.worker,
            transfer: Some(CargoTransfer {
                kind: node.kind,
                direction,
            }),
        })
    }
}

impl fmt::Display for HarvestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transfer {
            Some(t) => write!(f, "Harvest({}, {}, {})", self.worker, t.kind, t.direction),
            None => write!(f, "Harvest({})", self.worker),
        }
    }
}
