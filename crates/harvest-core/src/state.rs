use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{
    Action, BuildPeasantAction, DepositAction, Direction, HarvestAction, History, MapExtents,
    MoveAction, ParallelAction, Peasant, PeasantId, PeasantIdAllocator, PlanningGoal, Position,
    ResourceKind, ResourceLocation, StripsAction, UnitKind, ValidationError, WorldSnapshot,
    HARVEST_QUANTUM, PEASANT_GOLD_COST,
};

/// Immutable snapshot of one player's economy.
///
/// Collections are shared copy-on-write between a state and its successors. Equality and hashing
/// cover the world configuration only (player, flags, quotas, stock, nodes, workers); the tick
/// history and the accumulated cost are ignored so that different paths to the same
/// configuration collapse to one search node.
#[derive(Debug, Clone)]
pub struct GameState {
    player: u32,
    extents: MapExtents,
    build_peasants: bool,
    required_gold: u32,
    required_wood: u32,
    current_gold: u32,
    current_wood: u32,
    gold: Arc<Vec<ResourceLocation>>,
    wood: Arc<Vec<ResourceLocation>>,
    townhall: Position,
    peasants: Arc<BTreeMap<PeasantId, Peasant>>,
    ids: PeasantIdAllocator,
    history: History<ParallelAction>,
    cost: u32,
}

fn non_negative(
    value: i64,
    err: impl FnOnce(i64) -> ValidationError,
) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(err(value));
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

impl GameState {
    /// Root search node. Workers get plan-time ids `1..=n` in unit order.
    ///
    /// Only inputs that make the state unrepresentable are rejected here; feasibility checks
    /// live in [`validate`](Self::validate).
    pub fn from_snapshot(
        snapshot: &WorldSnapshot,
        goal: &PlanningGoal,
    ) -> Result<Self, ValidationError> {
        if snapshot.width <= 0 || snapshot.height <= 0 {
            return Err(ValidationError::InvalidExtents {
                width: snapshot.width,
                height: snapshot.height,
            });
        }

        let required_gold = non_negative(goal.required_gold, |value| {
            ValidationError::NegativeThreshold {
                kind: ResourceKind::Gold,
                value,
            }
        })?;
        let required_wood = non_negative(goal.required_wood, |value| {
            ValidationError::NegativeThreshold {
                kind: ResourceKind::Wood,
                value,
            }
        })?;
        let current_gold = non_negative(snapshot.current_gold, |value| {
            ValidationError::NegativeStock {
                kind: ResourceKind::Gold,
                value,
            }
        })?;
        let current_wood = non_negative(snapshot.current_wood, |value| {
            ValidationError::NegativeStock {
                kind: ResourceKind::Wood,
                value,
            }
        })?;

        let townhall = snapshot
            .units
            .iter()
            .find(|u| u.kind == UnitKind::Townhall)
            .map(|u| u.position())
            .ok_or(ValidationError::MissingTownhall {
                player: snapshot.player,
            })?;

        let mut gold = Vec::new();
        let mut wood = Vec::new();
        for resource in snapshot.resources.iter().filter(|r| r.amount > 0) {
            let node = ResourceLocation::new(resource.position(), resource.kind, resource.amount);
            match resource.kind {
                ResourceKind::Gold => gold.push(node),
                ResourceKind::Wood => wood.push(node),
            }
        }

        let mut ids = PeasantIdAllocator::default();
        let mut peasants = BTreeMap::new();
        for unit in snapshot.units.iter().filter(|u| u.kind == UnitKind::Peasant) {
            let id = ids.allocate();
            peasants.insert(
                id,
                Peasant {
                    id,
                    position: unit.position(),
                    cargo: unit.cargo,
                },
            );
        }

        tracing::debug!(
            player = snapshot.player,
            workers = peasants.len(),
            gold_nodes = gold.len(),
            wood_nodes = wood.len(),
            required_gold,
            required_wood,
            "built root state from snapshot"
        );

        Ok(Self {
            player: snapshot.player,
            extents: snapshot.extents(),
            build_peasants: goal.build_peasants,
            required_gold,
            required_wood,
            current_gold,
            current_wood,
            gold: Arc::new(gold),
            wood: Arc::new(wood),
            townhall,
            peasants: Arc::new(peasants),
            ids,
            history: History::new(),
            cost: 0,
        })
    }

    /// Rejects configurations that cannot reach the goal for structural reasons.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut occupied: BTreeMap<Position, PeasantId> = BTreeMap::new();
        for peasant in self.peasants.values() {
            if !self.extents.contains(peasant.position) {
                return Err(ValidationError::WorkerOutOfBounds {
                    id: peasant.id,
                    position: peasant.position,
                });
            }
            if let Some(first) = occupied.insert(peasant.position, peasant.id) {
                return Err(ValidationError::WorkersOverlap {
                    first,
                    second: peasant.id,
                    position: peasant.position,
                });
            }
        }

        if self.is_goal() {
            return Ok(());
        }

        let can_produce = self.build_peasants && self.current_gold >= PEASANT_GOLD_COST;
        if self.peasants.is_empty() && !can_produce {
            return Err(ValidationError::NoWorkers);
        }

        for kind in ResourceKind::ALL {
            let needed = self.remaining(kind);
            let in_hand = self
                .peasants
                .values()
                .filter(|p| p.is_carrying_kind(kind))
                .count() as u32
                * HARVEST_QUANTUM;
            if needed > in_hand && self.nodes(kind).is_empty() {
                return Err(ValidationError::NoResourceNodes { kind, needed });
            }
        }

        Ok(())
    }

    pub fn player(&self) -> u32 {
        self.player
    }

    pub fn extents(&self) -> MapExtents {
        self.extents
    }

    pub fn build_peasants(&self) -> bool {
        self.build_peasants
    }

    pub fn required_gold(&self) -> u32 {
        self.required_gold
    }

    pub fn required_wood(&self) -> u32 {
        self.required_wood
    }

    pub fn current_gold(&self) -> u32 {
        self.current_gold
    }

    pub fn current_wood(&self) -> u32 {
        self.current_wood
    }

    pub fn required(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Gold => self.required_gold,
            ResourceKind::Wood => self.required_wood,
        }
    }

    pub fn current(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Gold => self.current_gold,
            ResourceKind::Wood => self.current_wood,
        }
    }

    /// Amount still missing; zero once the quota is met or exceeded.
    pub fn remaining(&self, kind: ResourceKind) -> u32 {
        self.required(kind).saturating_sub(self.current(kind))
    }

    pub fn gold_nodes(&self) -> &[ResourceLocation] {
        &self.gold
    }

    pub fn wood_nodes(&self) -> &[ResourceLocation] {
        &self.wood
    }

    pub fn nodes(&self, kind: ResourceKind) -> &[ResourceLocation] {
        match kind {
            ResourceKind::Gold => &self.gold,
            ResourceKind::Wood => &self.wood,
        }
    }

    pub fn townhall(&self) -> Position {
        self.townhall
    }

    pub fn peasants(&self) -> &BTreeMap<PeasantId, Peasant> {
        &self.peasants
    }

    pub fn peasant(&self, id: PeasantId) -> Option<&Peasant> {
        self.peasants.get(&id)
    }

    pub fn population(&self) -> usize {
        self.peasants.len()
    }

    /// Id the next produced worker will receive.
    pub fn next_peasant_id(&self) -> PeasantId {
        self.ids.peek()
    }

    /// Worker standing on `position`, if any.
    pub fn occupant(&self, position: Position) -> Option<PeasantId> {
        self.peasants
            .values()
            .find(|p| p.position == position)
            .map(|p| p.id)
    }

    /// The node a worker on `position` would harvest: the first adjacent gold node with stock
    /// left, else the first adjacent tree.
    pub fn adjacent_node(&self, position: Position) -> Option<ResourceLocation> {
        self.gold
            .iter()
            .chain(self.wood.iter())
            .find(|node| node.amount > 0 && position.is_adjacent(node.position))
            .copied()
    }

    /// Cell a produced worker appears on: east of the townhall if free, otherwise the first free
    /// neighbour in compass order.
    pub fn spawn_cell(&self) -> Option<Position> {
        core::iter::once(Direction::East)
            .chain(Direction::ALL.into_iter().filter(|d| *d != Direction::East))
            .map(|d| self.townhall.step(d))
            .find(|cell| {
                self.extents.contains(*cell)
                    && self.occupant(*cell).is_none()
                    && !self
                        .gold
                        .iter()
                        .chain(self.wood.iter())
                        .any(|node| node.position == *cell)
            })
    }

    /// Ticks that led here from the root.
    pub fn history(&self) -> &History<ParallelAction> {
        &self.history
    }

    /// The recorded ticks, root first.
    pub fn plan(&self) -> Vec<ParallelAction> {
        self.history.to_vec()
    }

    /// Path cost `g`: the summed cost of every recorded tick.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn is_goal(&self) -> bool {
        self.current_gold >= self.required_gold && self.current_wood >= self.required_wood
    }

    /// Estimated remaining cost.
    ///
    /// Per resource kind, `trips = remaining / quantum` (floor). A worker already carrying that
    /// kind contributes `2 * d_townhall * (trips - 1) + d_townhall`; any other worker contributes
    /// `2 * d_nearest_node * trips`. While less than half the required gold is in stock, the
    /// running total is halved after each gold carrier and doubled after each wood carrier. The
    /// sum is divided by the number of workers.
    ///
    /// The scaling and the per-worker averaging mean this can over-estimate, so A* optimality is
    /// not guaranteed.
    pub fn heuristic(&self) -> f64 {
        let behind_on_gold = self.required_gold / 2 > self.current_gold;
        let mut h = 0.0f64;

        for kind in ResourceKind::ALL {
            let trips = i64::from(self.remaining(kind) / HARVEST_QUANTUM);
            for peasant in self.peasants.values() {
                if peasant.is_carrying_kind(kind) {
                    let d = i64::from(peasant.position.chebyshev_distance(self.townhall));
                    h += (2 * d * (trips - 1) + d) as f64;
                    if behind_on_gold {
                        match kind {
                            ResourceKind::Gold => h /= 2.0,
                            ResourceKind::Wood => h *= 2.0,
                        }
                    }
                } else {
                    let d = i64::from(self.distance_to_nearest(peasant.position, kind));
                    h += (2 * d * trips) as f64;
                }
            }
        }

        if self.peasants.is_empty() {
            return h;
        }
        h / self.peasants.len() as f64
    }

    /// Distance to the closest node of `kind`, or the map span when none is left.
    fn distance_to_nearest(&self, position: Position, kind: ResourceKind) -> u32 {
        self.nodes(kind)
            .iter()
            .map(|node| position.chebyshev_distance(node.position))
            .min()
            .unwrap_or_else(|| self.extents.span())
    }

    /// Every successor reachable in one tick.
    pub fn children(&self) -> Vec<GameState> {
        let columns = self.candidate_columns();
        let children: Vec<GameState> = cartesian_product(&columns)
            .into_iter()
            .filter_map(|actions| ParallelAction::new(actions).try_apply(self))
            .collect();

        tracing::trace!(
            columns = columns.len(),
            children = children.len(),
            "generated successors"
        );
        children
    }

    /// Candidate actions, one column per acting worker (ascending id) preceded by a production
    /// column when a worker can be built. Columns without candidates are dropped.
    pub fn candidate_columns(&self) -> Vec<Vec<Action>> {
        let mut columns = Vec::with_capacity(self.peasants.len() + 1);

        if self.build_peasants {
            let build = Action::BuildPeasant(BuildPeasantAction::new());
            if build.preconditions_met(self) {
                columns.push(vec![build]);
            }
        }

        for peasant in self.peasants.values() {
            let column = self.worker_candidates(peasant);
            if !column.is_empty() {
                columns.push(column);
            }
        }

        columns
    }

    fn worker_candidates(&self, peasant: &Peasant) -> Vec<Action> {
        let mut column = Vec::new();

        let harvest = Action::Harvest(HarvestAction::new(peasant.id));
        if harvest.preconditions_met(self) {
            column.push(harvest);
        }

        if peasant.is_carrying() {
            self.push_move_toward(&mut column, peasant, self.townhall);
            let deposit = Action::Deposit(DepositAction::new(peasant.id));
            if deposit.preconditions_met(self) {
                column.push(deposit);
            }
        } else if peasant.position.is_adjacent(self.townhall) {
            for kind in ResourceKind::ALL {
                if self.remaining(kind) == 0 {
                    continue;
                }
                for node in self.nodes(kind) {
                    self.push_move_toward(&mut column, peasant, node.position);
                }
            }
        }

        column
    }

    fn push_move_toward(&self, column: &mut Vec<Action>, peasant: &Peasant, target: Position) {
        let Some(to) = peasant.position.closest_adjacent_to(target, self.extents) else {
            return;
        };
        let action = Action::Move(MoveAction::new(peasant.id, peasant.position, to));
        if !column.contains(&action) && action.preconditions_met(self) {
            column.push(action);
        }
    }

    pub(crate) fn record(mut self, tick: ParallelAction) -> GameState {
        self.cost = self.cost.saturating_add(tick.cost());
        self.history = self.history.pushed(tick);
        self
    }

    pub(crate) fn peasant_mut(&mut self, id: PeasantId) -> Option<&mut Peasant> {
        Arc::make_mut(&mut self.peasants).get_mut(&id)
    }

    pub(crate) fn insert_peasant(&mut self, peasant: Peasant) {
        Arc::make_mut(&mut self.peasants).insert(peasant.id, peasant);
    }

    pub(crate) fn allocate_peasant_id(&mut self) -> PeasantId {
        self.ids.allocate()
    }

    /// Removes one quantum from `node`, dropping the node once it is exhausted.
    pub(crate) fn take_quantum(&mut self, node: ResourceLocation) -> bool {
        let nodes = match node.kind {
            ResourceKind::Gold => Arc::make_mut(&mut self.gold),
            ResourceKind::Wood => Arc::make_mut(&mut self.wood),
        };
        let Some(index) = nodes.iter().position(|n| n.position == node.position) else {
            return false;
        };
        match nodes[index].harvested() {
            Some(rest) => nodes[index] = rest,
            None => {
                nodes.remove(index);
            }
        }
        true
    }

    pub(crate) fn credit(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Gold => {
                self.current_gold = self.current_gold.saturating_add(HARVEST_QUANTUM)
            }
            ResourceKind::Wood => {
                self.current_wood = self.current_wood.saturating_add(HARVEST_QUANTUM)
            }
        }
    }

    pub(crate) fn spend_gold(&mut self, amount: u32) -> bool {
        match self.current_gold.checked_sub(amount) {
            Some(rest) => {
                self.current_gold = rest;
                true
            }
            None => false,
        }
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.player == other.player
            && self.build_peasants == other.build_peasants
            && self.required_gold == other.required_gold
            && self.required_wood == other.required_wood
            && self.current_gold == other.current_gold
            && self.current_wood == other.current_wood
            && self.gold == other.gold
            && self.wood == other.wood
            && self.peasants == other.peasants
    }
}

impl Eq for GameState {}

impl Hash for GameState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.player.hash(state);
        self.build_peasants.hash(state);
        self.required_gold.hash(state);
        self.required_wood.hash(state);
        self.current_gold.hash(state);
        self.current_wood.hash(state);
        self.gold.hash(state);
        self.wood.hash(state);
        self.peasants.hash(state);
    }
}

/// All ways of picking one action per column; the first column varies slowest.
fn cartesian_product(columns: &[Vec<Action>]) -> Vec<Vec<Action>> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut combinations: Vec<Vec<Action>> = vec![Vec::with_capacity(columns.len())];
    for column in columns {
        let mut next = Vec::with_capacity(combinations.len() * column.len());
        for prefix in &combinations {
            for action in column {
                let mut combination = prefix.clone();
                combination.push(action.clone());
                next.push(combination);
            }
        }
        combinations = next;
    }
    combinations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(id: u32, x: i32) -> Action {
        Action::Move(MoveAction::new(
            PeasantId(id),
            Position::new(0, 0),
            Position::new(x, 0),
        ))
    }

    #[test]
    fn product_enumerates_every_combination_in_order() {
        let columns = vec![vec![mv(1, 1), mv(1, 2)], vec![mv(2, 3), mv(2, 4), mv(2, 5)]];
        let product = cartesian_product(&columns);
        assert_eq!(product.len(), 6);
        assert_eq!(product[0], vec![mv(1, 1), mv(2, 3)]);
        assert_eq!(product[1], vec![mv(1, 1), mv(2, 4)]);
        assert_eq!(product[5], vec![mv(1, 2), mv(2, 5)]);
    }

    #[test]
    fn product_of_nothing_is_empty() {
        assert!(cartesian_product(&[]).is_empty());
    }
}
