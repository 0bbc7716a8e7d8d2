use core::fmt;

use crate::{Action, ActionError, GameState, PeasantId, StripsAction};

/// One planning tick: the actions issued simultaneously, in order.
///
/// Components are validated one after another against a running state in which every earlier
/// component has already taken effect, so two workers cannot step onto the same cell or empty
/// the same node twice within a tick.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParallelAction {
    actions: Vec<Action>,
}

impl ParallelAction {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn affected_workers(&self) -> Vec<PeasantId> {
        self.actions
            .iter()
            .flat_map(Action::affected_workers)
            .collect()
    }

    /// Runs every component against a working copy. Returns the successor (without the tick
    /// recorded) and the tick with its components resolved.
    fn simulate(&self, state: &GameState) -> Option<(GameState, ParallelAction)> {
        if self.actions.is_empty() {
            return None;
        }

        let mut seen: Vec<PeasantId> = Vec::with_capacity(self.actions.len());
        let mut running = state.clone();
        let mut resolved = Vec::with_capacity(self.actions.len());

        for action in &self.actions {
            if let Some(worker) = action.worker() {
                if seen.contains(&worker) {
                    return None;
                }
                seen.push(worker);
            }
            if !action.preconditions_met(&running) {
                return None;
            }
            resolved.push(action.perform(&mut running)?);
        }

        Some((running, ParallelAction::new(resolved)))
    }

    /// Successor state with this tick recorded, or `None` when any component fails.
    pub fn try_apply(&self, state: &GameState) -> Option<GameState> {
        let (next, tick) = self.simulate(state)?;
        Some(next.record(tick))
    }
}

impl StripsAction for ParallelAction {
    fn preconditions_met(&self, state: &GameState) -> bool {
        self.simulate(state).is_some()
    }

    fn apply(&self, state: &GameState) -> Result<GameState, ActionError> {
        if self.actions.is_empty() {
            return Err(ActionError::EmptyTick);
        }
        self.try_apply(state)
            .ok_or_else(|| ActionError::PreconditionsNotMet {
                action: self.to_string(),
            })
    }

    fn cost(&self) -> u32 {
        self.actions.iter().map(StripsAction::cost).sum()
    }
}

impl fmt::Display for ParallelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Parallel(")?;
        for (i, action) in self.actions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{action}")?;
        }
        f.write_str(")")
    }
}
