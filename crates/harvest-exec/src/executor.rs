use std::collections::BTreeSet;

use harvest_core::{
    Action, Direction, GameState, ParallelAction, PeasantId, Position, PEASANT_GOLD_COST,
    POPULATION_CAP,
};
use harvest_search::Plan;

use crate::lane::split_lanes;
use crate::{
    CommandKind, EngineCommand, EngineUnitId, ExecError, ExecutorEvent, IdBinder, Lane, LaneKey,
    LaneState, StepObservation,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Engine id of the townhall that receives production orders.
    pub townhall: EngineUnitId,
    /// Engine template produced for a new worker.
    pub peasant_template: u32,
    /// Where a worker with nothing left to do parks.
    pub idle_position: Position,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            townhall: EngineUnitId(0),
            peasant_template: 0,
            idle_position: Position::new(0, 0),
        }
    }
}

impl ExecutorConfig {
    pub fn with_townhall(mut self, townhall: EngineUnitId) -> Self {
        self.townhall = townhall;
        self
    }

    pub fn with_peasant_template(mut self, template: u32) -> Self {
        self.peasant_template = template;
        self
    }

    pub fn with_idle_position(mut self, position: Position) -> Self {
        self.idle_position = position;
        self
    }
}

/// Drives a plan against a running engine, one lane per unit.
///
/// Lanes advance independently: a worker does not wait for the rest of its tick, and a deferred
/// production order does not hold up any worker.
#[derive(Debug, Clone)]
pub struct PlanExecutor {
    config: ExecutorConfig,
    townhall: Position,
    required_gold: u32,
    required_wood: u32,
    lanes: Vec<Lane>,
    binder: IdBinder,
}

impl PlanExecutor {
    /// `workers` are the engine ids of the initial workers, in snapshot order.
    pub fn new(
        plan: &Plan,
        workers: impl IntoIterator<Item = EngineUnitId>,
        config: ExecutorConfig,
    ) -> Result<Self, ExecError> {
        Self::from_ticks(&plan.ticks, &plan.final_state, workers, config)
    }

    /// Like [`new`](Self::new) for resolved ticks not produced by the planner. The townhall
    /// position and quotas are read from `state`.
    pub fn from_ticks(
        ticks: &[ParallelAction],
        state: &GameState,
        workers: impl IntoIterator<Item = EngineUnitId>,
        config: ExecutorConfig,
    ) -> Result<Self, ExecError> {
        let binder = IdBinder::with_initial(workers);
        let mut known: BTreeSet<PeasantId> = (1..=binder.bound_count() as u32)
            .map(PeasantId)
            .collect();

        for tick in ticks {
            for action in tick.actions() {
                check_resolved(action)?;
                if let Action::BuildPeasant(build) = action {
                    if let Some(spawned) = build.spawned {
                        known.insert(spawned.id);
                    }
                }
            }
        }
        for tick in ticks {
            for id in tick.actions().iter().filter_map(Action::worker) {
                if !known.contains(&id) {
                    return Err(ExecError::UnknownWorker { id });
                }
            }
        }

        let lanes = split_lanes(ticks, known);
        tracing::debug!(
            ticks = ticks.len(),
            lanes = lanes.len(),
            "split plan into lanes"
        );

        Ok(Self {
            config,
            townhall: state.townhall(),
            required_gold: state.required_gold(),
            required_wood: state.required_wood(),
            lanes,
            binder,
        })
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, key: LaneKey) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.key() == key)
    }

    pub fn binder(&self) -> &IdBinder {
        &self.binder
    }

    /// Every lane has drained its queue and sent its closing command.
    pub fn is_finished(&self) -> bool {
        self.lanes
            .iter()
            .all(|lane| lane.state() == LaneState::Completed)
    }

    pub fn handle(&mut self, event: ExecutorEvent) {
        match event {
            ExecutorEvent::UnitBorn { unit } => match self.binder.bind_birth(unit) {
                Some(id) => tracing::info!(worker = %id, unit = %unit, "bound newborn worker"),
                None => tracing::warn!(unit = %unit, "birth with no production pending"),
            },
            ExecutorEvent::UnitCompleted { unit } => {
                if let Some(lane) = self.awaiting_lane(unit) {
                    lane.completed();
                }
            }
            ExecutorEvent::UnitFailed { unit } => {
                if let Some(lane) = self.awaiting_lane(unit) {
                    lane.failed();
                    tracing::warn!(
                        lane = %lane.key(),
                        retries = lane.retries(),
                        "command failed, reissuing"
                    );
                }
            }
        }
    }

    /// Commands to send this step. Returns nothing once the observed stock meets both quotas.
    pub fn step(&mut self, observation: &StepObservation) -> Vec<EngineCommand> {
        if observation.gold >= self.required_gold && observation.wood >= self.required_wood {
            tracing::debug!(
                gold = observation.gold,
                wood = observation.wood,
                "quotas met, nothing to issue"
            );
            return Vec::new();
        }

        let mut commands = Vec::new();
        for index in 0..self.lanes.len() {
            if let Some(command) = self.drive(index, observation) {
                tracing::debug!(lane = %self.lanes[index].key(), command = %command, "issue");
                commands.push(command);
            }
        }
        commands
    }

    fn awaiting_lane(&mut self, unit: EngineUnitId) -> Option<&mut Lane> {
        let key = if unit == self.config.townhall {
            LaneKey::Townhall
        } else {
            LaneKey::Worker(self.binder.plan_id(unit)?)
        };
        self.lanes
            .iter_mut()
            .find(|lane| lane.key() == key && lane.state() == LaneState::Awaiting)
    }

    fn drive(&mut self, index: usize, observation: &StepObservation) -> Option<EngineCommand> {
        loop {
            match self.lanes[index].state() {
                LaneState::Idle => {
                    if !self.lanes[index].advance() {
                        return self.close(index, observation);
                    }
                }
                LaneState::Issuing => return self.issue(index, observation),
                LaneState::Awaiting | LaneState::Completed => return None,
            }
        }
    }

    fn issue(&mut self, index: usize, observation: &StepObservation) -> Option<EngineCommand> {
        let action = self.lanes[index].current()?.clone();
        let command = match &action {
            Action::BuildPeasant(build) => {
                if observation.gold < PEASANT_GOLD_COST || observation.workers.len() >= POPULATION_CAP
                {
                    tracing::debug!(gold = observation.gold, "production deferred");
                    return None;
                }
                if let Some(spawned) = build.spawned {
                    self.binder.activate(spawned.id);
                }
                EngineCommand::new(
                    self.config.townhall,
                    CommandKind::Produce {
                        template: self.config.peasant_template,
                    },
                )
            }
            worker_action => {
                let unit = self.binder.engine_id(worker_action.worker()?)?;
                EngineCommand::new(unit, command_kind(worker_action)?)
            }
        };
        self.lanes[index].issued();
        Some(command)
    }

    /// Closing command for a lane whose queue is empty.
    fn close(&mut self, index: usize, observation: &StepObservation) -> Option<EngineCommand> {
        let LaneKey::Worker(id) = self.lanes[index].key() else {
            self.lanes[index].finish();
            return None;
        };
        // A worker that has not been born yet keeps its lane open.
        let unit = self.binder.engine_id(id)?;
        self.lanes[index].finish();

        let Some(worker) = observation.worker(unit) else {
            tracing::warn!(worker = %id, unit = %unit, "worker missing from observation");
            return None;
        };

        let kind = match worker.cargo {
            Some(_) if worker.position.is_adjacent(self.townhall) => {
                match worker.position.direction_to(self.townhall) {
                    Some(direction) => CommandKind::Deposit { direction },
                    None => move_to(self.townhall.step(Direction::West)),
                }
            }
            Some(_) => move_to(self.townhall.step(Direction::West)),
            None => move_to(self.config.idle_position),
        };
        tracing::info!(worker = %id, "plan finished for worker");
        Some(EngineCommand::new(unit, kind))
    }
}

fn move_to(position: Position) -> CommandKind {
    CommandKind::MoveTo {
        x: position.x,
        y: position.y,
    }
}

fn command_kind(action: &Action) -> Option<CommandKind> {
    match action {
        Action::Move(mv) => Some(move_to(mv.to)),
        Action::Harvest(harvest) => harvest.transfer.map(|t| CommandKind::Gather {
            direction: t.direction,
        }),
        Action::Deposit(deposit) => deposit.transfer.map(|t| CommandKind::Deposit {
            direction: t.direction,
        }),
        Action::BuildPeasant(_) => None,
    }
}

fn check_resolved(action: &Action) -> Result<(), ExecError> {
    let resolved = match action {
        Action::Move(_) => true,
        Action::Harvest(harvest) => harvest.transfer.is_some(),
        Action::Deposit(deposit) => deposit.transfer.is_some(),
        Action::BuildPeasant(build) => build.spawned.is_some(),
    };
    if resolved {
        Ok(())
    } else {
        Err(ExecError::UnresolvedAction {
            action: action.to_string(),
        })
    }
}
