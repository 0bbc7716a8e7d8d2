use std::collections::BTreeMap;

use harvest_core::{Position, ResourceKind};

use crate::EngineUnitId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitObservation {
    pub position: Position,
    pub cargo: Option<ResourceKind>,
}

impl UnitObservation {
    pub fn idle(position: Position) -> Self {
        Self {
            position,
            cargo: None,
        }
    }

    pub fn carrying(position: Position, kind: ResourceKind) -> Self {
        Self {
            position,
            cargo: Some(kind),
        }
    }
}

/// What the engine reports at the start of a step: stock and the player's workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepObservation {
    pub gold: u32,
    pub wood: u32,
    pub workers: BTreeMap<EngineUnitId, UnitObservation>,
}

impl StepObservation {
    pub fn new(gold: u32, wood: u32) -> Self {
        Self {
            gold,
            wood,
            workers: BTreeMap::new(),
        }
    }

    pub fn with_worker(mut self, unit: EngineUnitId, observation: UnitObservation) -> Self {
        self.workers.insert(unit, observation);
        self
    }

    pub fn worker(&self, unit: EngineUnitId) -> Option<&UnitObservation> {
        self.workers.get(&unit)
    }
}
