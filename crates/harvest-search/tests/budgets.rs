use std::time::Duration;

use harvest_core::{GameState, PlanningGoal, ResourceSnapshot, UnitSnapshot, WorldSnapshot};
use harvest_search::{CancelToken, Planner, PlannerConfig, SearchError};

fn far_mine() -> GameState {
    let snapshot = WorldSnapshot::new(8, 8)
        .with_unit(UnitSnapshot::townhall(0, 0))
        .with_unit(UnitSnapshot::peasant(1, 1))
        .with_resource(ResourceSnapshot::gold(3, 0, 500));
    GameState::from_snapshot(&snapshot, &PlanningGoal::new(100, 0)).expect("representable")
}

#[test]
fn expansion_limit_stops_the_search() {
    let planner =
        Planner::new().with_config(PlannerConfig::default().with_max_expansions(1));
    assert_eq!(
        planner.search(&far_mine()).expect_err("needs four expansions"),
        SearchError::ExpansionLimit { limit: 1 }
    );

    let roomy = Planner::new().with_config(PlannerConfig::default().with_max_expansions(4));
    assert_eq!(roomy.search(&far_mine()).expect("plan").stats.expansions, 4);
}

#[test]
fn goal_at_the_root_ignores_the_expansion_limit() {
    let snapshot = WorldSnapshot::new(4, 4)
        .with_unit(UnitSnapshot::townhall(0, 0))
        .with_stock(100, 0);
    let root =
        GameState::from_snapshot(&snapshot, &PlanningGoal::new(100, 0)).expect("representable");

    let planner =
        Planner::new().with_config(PlannerConfig::default().with_max_expansions(0));
    assert!(planner.search(&root).expect("already there").is_empty());
}

#[test]
fn zero_time_limit_times_out_immediately() {
    let limit = Duration::ZERO;
    let planner = Planner::new().with_config(PlannerConfig::default().with_time_limit(limit));
    assert_eq!(
        planner.search(&far_mine()).expect_err("no time"),
        SearchError::TimeLimit {
            limit,
            expansions: 0
        }
    );
}

#[test]
fn tripped_cancel_token_stops_the_search() {
    let token = CancelToken::new();
    let planner = Planner::new().with_cancel(token.clone());
    assert!(planner.search(&far_mine()).is_ok());

    token.cancel();
    assert!(token.is_cancelled());
    assert_eq!(
        planner.search(&far_mine()).expect_err("cancelled"),
        SearchError::Cancelled { expansions: 0 }
    );
}

#[test]
fn cancel_token_can_be_tripped_from_another_thread() {
    let token = CancelToken::new();
    let remote = token.clone();
    std::thread::spawn(move || remote.cancel())
        .join()
        .expect("thread finished");

    let planner = Planner::new().with_cancel(token);
    assert!(matches!(
        planner.search(&far_mine()),
        Err(SearchError::Cancelled { .. })
    ));
}
