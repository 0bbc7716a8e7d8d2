use harvest_core::{
    Action, BuildPeasantAction, DepositAction, Direction, GameState, HarvestAction, MoveAction,
    ParallelAction, PeasantId, PlanningGoal, Position, ResourceKind, ResourceSnapshot,
    UnitSnapshot, WorldSnapshot,
};
use harvest_exec::{
    CommandKind, EngineCommand, EngineUnitId, ExecError, ExecutorConfig, ExecutorEvent, LaneKey,
    LaneState, PlanExecutor, StepObservation, UnitObservation,
};
use harvest_search::Planner;

const TOWNHALL: EngineUnitId = EngineUnitId(10);
const FIRST: EngineUnitId = EngineUnitId(11);
const NEWBORN: EngineUnitId = EngineUnitId(12);

fn config() -> ExecutorConfig {
    ExecutorConfig::default()
        .with_townhall(TOWNHALL)
        .with_peasant_template(5)
}

fn worker_lane(id: u32) -> LaneKey {
    LaneKey::Worker(PeasantId(id))
}

#[test]
fn single_worker_plan_runs_command_by_command() {
    let snapshot = WorldSnapshot::new(8, 8)
        .with_unit(UnitSnapshot::townhall(0, 0))
        .with_unit(UnitSnapshot::peasant(1, 1))
        .with_resource(ResourceSnapshot::gold(3, 0, 500));
    let plan = Planner::new()
        .plan(&snapshot, &PlanningGoal::new(100, 0))
        .expect("plan");
    let mut executor = PlanExecutor::new(&plan, [FIRST], config()).expect("resolved plan");
    let observation = StepObservation::new(0, 0);

    assert_eq!(
        executor.step(&observation),
        vec![EngineCommand::new(FIRST, CommandKind::MoveTo { x: 2, y: 1 })]
    );
    assert_eq!(
        executor.lane(LaneKey::Townhall).map(|l| l.state()),
        Some(LaneState::Completed)
    );
    assert_eq!(
        executor.lane(worker_lane(1)).map(|l| l.state()),
        Some(LaneState::Awaiting)
    );
    assert!(executor.step(&observation).is_empty(), "still walking");

    executor.handle(ExecutorEvent::UnitCompleted { unit: FIRST });
    let gather = EngineCommand::new(
        FIRST,
        CommandKind::Gather {
            direction: Direction::NorthEast,
        },
    );
    assert_eq!(executor.step(&observation), vec![gather]);

    executor.handle(ExecutorEvent::UnitFailed { unit: FIRST });
    assert_eq!(
        executor.lane(worker_lane(1)).map(|l| l.retries()),
        Some(1)
    );
    assert_eq!(executor.step(&observation), vec![gather], "failed command is reissued");

    executor.handle(ExecutorEvent::UnitCompleted { unit: FIRST });
    assert_eq!(
        executor.step(&observation),
        vec![EngineCommand::new(FIRST, CommandKind::MoveTo { x: 1, y: 0 })]
    );

    executor.handle(ExecutorEvent::UnitCompleted { unit: FIRST });
    assert_eq!(
        executor.step(&observation),
        vec![EngineCommand::new(
            FIRST,
            CommandKind::Deposit {
                direction: Direction::West
            }
        )]
    );

    executor.handle(ExecutorEvent::UnitCompleted { unit: FIRST });
    assert!(executor.step(&StepObservation::new(100, 0)).is_empty());
    assert!(!executor.is_finished());
}

fn production_ticks() -> (GameState, Vec<ParallelAction>) {
    let snapshot = WorldSnapshot::new(8, 8)
        .with_unit(UnitSnapshot::townhall(0, 0))
        .with_unit(UnitSnapshot::peasant(1, 1))
        .with_resource(ResourceSnapshot::gold(2, 1, 1000))
        .with_stock(400, 0);
    let goal = PlanningGoal::new(800, 0).with_build_peasants(true);
    let root = GameState::from_snapshot(&snapshot, &goal).expect("representable");

    let first = ParallelAction::new(vec![
        BuildPeasantAction::new().into(),
        HarvestAction::new(PeasantId(1)).into(),
    ]);
    let second = ParallelAction::new(vec![
        DepositAction::new(PeasantId(1)).into(),
        HarvestAction::new(PeasantId(2)).into(),
    ]);
    let end = second
        .try_apply(&first.try_apply(&root).expect("first tick"))
        .expect("second tick");
    (root, end.plan())
}

#[test]
fn production_waits_for_gold_and_newborn_is_bound_on_birth() {
    let (root, ticks) = production_ticks();
    let mut executor =
        PlanExecutor::from_ticks(&ticks, &root, [FIRST], config()).expect("resolved ticks");
    assert_eq!(executor.lanes().len(), 3);

    let poor = StepObservation::new(300, 0)
        .with_worker(FIRST, UnitObservation::idle(Position::new(1, 1)));
    assert_eq!(
        executor.step(&poor),
        vec![EngineCommand::new(
            FIRST,
            CommandKind::Gather {
                direction: Direction::East
            }
        )]
    );
    assert_eq!(
        executor.lane(LaneKey::Townhall).map(|l| l.state()),
        Some(LaneState::Issuing)
    );
    assert_eq!(
        executor.lane(worker_lane(2)).map(|l| l.state()),
        Some(LaneState::Issuing),
        "unborn worker waits"
    );

    let rich = StepObservation::new(400, 0)
        .with_worker(FIRST, UnitObservation::carrying(Position::new(1, 1), ResourceKind::Gold));
    assert_eq!(
        executor.step(&rich),
        vec![EngineCommand::new(TOWNHALL, CommandKind::Produce { template: 5 })]
    );

    executor.handle(ExecutorEvent::UnitBorn { unit: NEWBORN });
    executor.handle(ExecutorEvent::UnitCompleted { unit: TOWNHALL });
    assert_eq!(executor.binder().engine_id(PeasantId(2)), Some(NEWBORN));

    let after = StepObservation::new(0, 0)
        .with_worker(FIRST, UnitObservation::carrying(Position::new(1, 1), ResourceKind::Gold))
        .with_worker(NEWBORN, UnitObservation::idle(Position::new(1, 0)));
    assert_eq!(
        executor.step(&after),
        vec![EngineCommand::new(
            NEWBORN,
            CommandKind::Gather {
                direction: Direction::SouthEast
            }
        )]
    );
    assert_eq!(
        executor.lane(LaneKey::Townhall).map(|l| l.state()),
        Some(LaneState::Completed)
    );
}

#[test]
fn drained_lanes_send_closing_commands() {
    let snapshot = WorldSnapshot::new(8, 8)
        .with_unit(UnitSnapshot::townhall(3, 3))
        .with_unit(UnitSnapshot::peasant(4, 4))
        .with_unit(UnitSnapshot::peasant(6, 6))
        .with_unit(UnitSnapshot::peasant(5, 5));
    let root = GameState::from_snapshot(&snapshot, &PlanningGoal::new(1000, 0))
        .expect("representable");
    let units = [EngineUnitId(1), EngineUnitId(2), EngineUnitId(3)];
    let mut executor = PlanExecutor::from_ticks(
        &[],
        &root,
        units,
        config().with_idle_position(Position::new(7, 0)),
    )
    .expect("empty plan");

    let observation = StepObservation::new(0, 0)
        .with_worker(
            units[0],
            UnitObservation::carrying(Position::new(4, 4), ResourceKind::Wood),
        )
        .with_worker(
            units[1],
            UnitObservation::carrying(Position::new(6, 6), ResourceKind::Gold),
        )
        .with_worker(units[2], UnitObservation::idle(Position::new(5, 5)));

    assert_eq!(
        executor.step(&observation),
        vec![
            EngineCommand::new(
                units[0],
                CommandKind::Deposit {
                    direction: Direction::NorthWest
                }
            ),
            EngineCommand::new(units[1], CommandKind::MoveTo { x: 2, y: 3 }),
            EngineCommand::new(units[2], CommandKind::MoveTo { x: 7, y: 0 }),
        ]
    );
    assert!(executor.is_finished());
    assert!(executor.step(&observation).is_empty());
}

#[test]
fn stray_events_are_ignored() {
    let (root, ticks) = production_ticks();
    let mut executor =
        PlanExecutor::from_ticks(&ticks, &root, [FIRST], config()).expect("resolved ticks");

    executor.handle(ExecutorEvent::UnitCompleted { unit: FIRST });
    executor.handle(ExecutorEvent::UnitFailed { unit: EngineUnitId(99) });
    executor.handle(ExecutorEvent::UnitBorn { unit: EngineUnitId(98) });

    assert!(executor
        .lanes()
        .iter()
        .all(|lane| lane.state() == LaneState::Idle));
    assert_eq!(executor.binder().bound_count(), 1);
}

#[test]
fn unresolved_or_unknown_actions_are_rejected() {
    let snapshot = WorldSnapshot::new(8, 8)
        .with_unit(UnitSnapshot::townhall(0, 0))
        .with_unit(UnitSnapshot::peasant(1, 1));
    let root =
        GameState::from_snapshot(&snapshot, &PlanningGoal::new(100, 0)).expect("representable");

    let unresolved = vec![ParallelAction::new(vec![Action::from(HarvestAction::new(
        PeasantId(1),
    ))])];
    assert_eq!(
        PlanExecutor::from_ticks(&unresolved, &root, [FIRST], config()).unwrap_err(),
        ExecError::UnresolvedAction {
            action: "Harvest(1)".to_string()
        }
    );

    let stranger = vec![ParallelAction::new(vec![MoveAction::new(
        PeasantId(5),
        Position::new(2, 2),
        Position::new(3, 3),
    )
    .into()])];
    assert_eq!(
        PlanExecutor::from_ticks(&stranger, &root, [FIRST], config()).unwrap_err(),
        ExecError::UnknownWorker { id: PeasantId(5) }
    );
}
