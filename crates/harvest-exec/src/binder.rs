use std::collections::BTreeMap;

use harvest_core::PeasantId;

use crate::EngineUnitId;

/// Maps plan-time worker ids to engine unit ids.
///
/// Initial workers are bound up front. A produced worker's id is activated when its production
/// order is issued and bound when the engine reports a birth: each birth goes to the most
/// recently activated id that is still unbound.
#[derive(Debug, Clone, Default)]
pub struct IdBinder {
    bound: BTreeMap<PeasantId, EngineUnitId>,
    activated: Vec<PeasantId>,
}

impl IdBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `units` to plan-time ids `1..=n` in order.
    pub fn with_initial(units: impl IntoIterator<Item = EngineUnitId>) -> Self {
        let bound = units
            .into_iter()
            .zip(1u32..)
            .map(|(unit, id)| (PeasantId(id), unit))
            .collect();
        Self {
            bound,
            activated: Vec::new(),
        }
    }

    pub fn bind(&mut self, id: PeasantId, unit: EngineUnitId) {
        self.bound.insert(id, unit);
    }

    /// Marks `id` as expected to be born soon.
    pub fn activate(&mut self, id: PeasantId) {
        if !self.bound.contains_key(&id) && !self.activated.contains(&id) {
            self.activated.push(id);
        }
    }

    /// Binds a newborn unit. Returns the plan-time id it was bound to, or `None` when no
    /// activation was waiting.
    pub fn bind_birth(&mut self, unit: EngineUnitId) -> Option<PeasantId> {
        let id = self.activated.pop()?;
        self.bound.insert(id, unit);
        Some(id)
    }

    pub fn engine_id(&self, id: PeasantId) -> Option<EngineUnitId> {
        self.bound.get(&id).copied()
    }

    pub fn plan_id(&self, unit: EngineUnitId) -> Option<PeasantId> {
        self.bound
            .iter()
            .find(|(_, bound)| **bound == unit)
            .map(|(id, _)| *id)
    }

    pub fn is_bound(&self, id: PeasantId) -> bool {
        self.bound.contains_key(&id)
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }
}
