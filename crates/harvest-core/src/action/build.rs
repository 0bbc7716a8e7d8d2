use core::fmt;

use crate::{GameState, Peasant, PEASANT_GOLD_COST, POPULATION_CAP};

/// Have the townhall produce a new worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BuildPeasantAction {
    /// The worker created, set once applied.
    pub spawned: Option<Peasant>,
}

impl BuildPeasantAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preconditions_met(&self, state: &GameState) -> bool {
        state.build_peasants()
            && state.current_gold() >= PEASANT_GOLD_COST
            && state.population() < POPULATION_CAP
            && state.spawn_cell().is_some()
    }

    pub(crate) fn perform(&self, state: &mut GameState) -> Option<BuildPeasantAction> {
        let cell = state.spawn_cell()?;
        if !state.spend_gold(PEASANT_GOLD_COST) {
            return None;
        }
        let id = state.allocate_peasant_id();
        let peasant = Peasant::idle(id, cell);
        state.insert_peasant(peasant);
        Some(BuildPeasantAction {
            spawned: Some(peasant),
        })
    }
}

impl fmt::Display for BuildPeasantAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.spawned {
            Some(p) => write!(f, "BuildPeasant({})", p.id),
            None => f.write_str("BuildPeasant()"),
        }
    }
}
