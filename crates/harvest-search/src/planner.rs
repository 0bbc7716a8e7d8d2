use core::cmp::Ordering;
use core::fmt;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use harvest_core::{GameState, ParallelAction, PlanningGoal, WorldSnapshot};

use crate::error::Result;
use crate::trace::{NullSearchTrace, SearchEvent, SearchEventKind, SearchTraceSink};
use crate::SearchError;

/// Optional budgets. Both default to unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlannerConfig {
    pub max_expansions: Option<usize>,
    pub time_limit: Option<Duration>,
}

impl PlannerConfig {
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

/// Shared flag that stops a running search at its next expansion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub expansions: usize,
    pub generated: usize,
    /// Largest size the open set reached.
    pub peak_open: usize,
    pub elapsed: Duration,
}

/// A goal-reaching sequence of ticks.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Root first.
    pub ticks: Vec<ParallelAction>,
    pub cost: u32,
    pub stats: SearchStats,
    /// The goal state the plan ends in.
    pub final_state: GameState,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

/// One tick per line, root first.
impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tick in &self.ticks {
            writeln!(f, "{tick}")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct OpenNode {
    f: f64,
    tie: u64,
    state: GameState,
}

impl OpenNode {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.tie.cmp(&other.tie))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key_cmp(self)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

/// Logs a progress line every this many expansions.
const PROGRESS_INTERVAL: usize = 1024;

#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
    cancel: Option<CancelToken>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds and validates the root state, then searches from it.
    pub fn plan(&self, snapshot: &WorldSnapshot, goal: &PlanningGoal) -> Result<Plan> {
        let root = GameState::from_snapshot(snapshot, goal)?;
        root.validate()?;
        self.search(&root)
    }

    /// Searches from `start` without validating it.
    pub fn search(&self, start: &GameState) -> Result<Plan> {
        self.search_with_trace(start, &mut NullSearchTrace)
    }

    pub fn search_with_trace(
        &self,
        start: &GameState,
        trace: &mut dyn SearchTraceSink,
    ) -> Result<Plan> {
        let started = Instant::now();
        let mut stats = SearchStats::default();

        let mut open = BinaryHeap::<OpenNode>::new();
        let mut tie: u64 = 0;
        let mut best_g: HashMap<GameState, u32> = HashMap::new();
        let mut closed: HashSet<GameState> = HashSet::new();

        best_g.insert(start.clone(), start.cost());
        open.push(OpenNode {
            f: f64::from(start.cost()) + start.heuristic(),
            tie,
            state: start.clone(),
        });
        tie += 1;
        stats.peak_open = 1;

        while let Some(node) = open.pop() {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                tracing::info!(expansions = stats.expansions, "search cancelled");
                return Err(SearchError::Cancelled {
                    expansions: stats.expansions,
                });
            }
            if let Some(limit) = self.config.time_limit {
                if started.elapsed() >= limit {
                    tracing::info!(expansions = stats.expansions, ?limit, "search timed out");
                    return Err(SearchError::TimeLimit {
                        limit,
                        expansions: stats.expansions,
                    });
                }
            }

            let state = node.state;
            if closed.contains(&state) {
                continue;
            }
            let g = state.cost();
            if best_g.get(&state).is_some_and(|best| g > *best) {
                continue; // stale heap entry
            }

            if state.is_goal() {
                trace.emit(
                    SearchEvent::new(stats.expansions, SearchEventKind::Goal)
                        .with_cost(g)
                        .with_depth(state.history().len()),
                );
                stats.elapsed = started.elapsed();
                tracing::info!(
                    ticks = state.history().len(),
                    cost = g,
                    expansions = stats.expansions,
                    generated = stats.generated,
                    "plan found"
                );
                return Ok(Plan {
                    ticks: state.plan(),
                    cost: g,
                    stats,
                    final_state: state,
                });
            }

            if let Some(limit) = self.config.max_expansions {
                if stats.expansions >= limit {
                    tracing::info!(limit, "expansion limit reached");
                    return Err(SearchError::ExpansionLimit { limit });
                }
            }
            stats.expansions += 1;
            trace.emit(
                SearchEvent::new(stats.expansions, SearchEventKind::Expand)
                    .with_cost(g)
                    .with_depth(state.history().len()),
            );
            if stats.expansions % PROGRESS_INTERVAL == 0 {
                tracing::debug!(
                    expansions = stats.expansions,
                    open = open.len(),
                    closed = closed.len(),
                    "search progress"
                );
            }

            for child in state.children() {
                stats.generated += 1;
                if closed.contains(&child) {
                    continue;
                }
                let child_g = child.cost();
                if best_g.get(&child).is_some_and(|best| child_g >= *best) {
                    continue;
                }
                best_g.insert(child.clone(), child_g);

                trace.emit(
                    SearchEvent::new(stats.expansions, SearchEventKind::Push)
                        .with_cost(child_g)
                        .with_depth(child.history().len()),
                );
                open.push(OpenNode {
                    f: f64::from(child_g) + child.heuristic(),
                    tie,
                    state: child,
                });
                tie += 1;
            }
            stats.peak_open = stats.peak_open.max(open.len());
            closed.insert(state);
        }

        tracing::info!(
            expansions = stats.expansions,
            generated = stats.generated,
            "open set exhausted without reaching the goal"
        );
        Err(SearchError::NoPlan {
            expansions: stats.expansions,
        })
    }
}
