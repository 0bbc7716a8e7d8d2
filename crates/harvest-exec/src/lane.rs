use core::fmt;
use std::collections::{BTreeMap, VecDeque};

use harvest_core::{Action, ParallelAction, PeasantId};

/// Who a lane issues commands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaneKey {
    /// Production orders.
    Townhall,
    Worker(PeasantId),
}

impl fmt::Display for LaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKey::Townhall => f.write_str("townhall"),
            LaneKey::Worker(id) => write!(f, "worker {id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneState {
    /// Ready for the next queued action.
    Idle,
    /// Holding an action whose command cannot be sent yet.
    Issuing,
    /// Command sent; waiting for completion or failure.
    Awaiting,
    /// Queue drained and the closing command sent.
    Completed,
}

/// The actions one unit performs, in tick order.
#[derive(Debug, Clone)]
pub struct Lane {
    key: LaneKey,
    queue: VecDeque<Action>,
    state: LaneState,
    current: Option<Action>,
    retries: u32,
}

impl Lane {
    pub fn new(key: LaneKey) -> Self {
        Self {
            key,
            queue: VecDeque::new(),
            state: LaneState::Idle,
            current: None,
            retries: 0,
        }
    }

    pub fn key(&self) -> LaneKey {
        self.key
    }

    pub fn state(&self) -> LaneState {
        self.state
    }

    /// Actions not yet taken from the queue.
    pub fn pending(&self) -> impl Iterator<Item = &Action> {
        self.queue.iter()
    }

    pub fn current(&self) -> Option<&Action> {
        self.current.as_ref()
    }

    /// Times the current action has been reissued after a failure.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub(crate) fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    /// Idle -> Issuing with the next queued action; `false` when the queue is empty.
    pub(crate) fn advance(&mut self) -> bool {
        match self.queue.pop_front() {
            Some(action) => {
                self.current = Some(action);
                self.retries = 0;
                self.state = LaneState::Issuing;
                true
            }
            None => false,
        }
    }

    pub(crate) fn issued(&mut self) {
        self.state = LaneState::Awaiting;
    }

    pub(crate) fn completed(&mut self) {
        self.current = None;
        self.state = LaneState::Idle;
    }

    pub(crate) fn failed(&mut self) {
        self.retries += 1;
        self.state = LaneState::Issuing;
    }

    pub(crate) fn finish(&mut self) {
        self.current = None;
        self.state = LaneState::Completed;
    }
}

/// Splits ticks into lanes: the townhall lane first, then one lane per worker by ascending id.
///
/// `workers` lists ids that get a lane even without actions of their own.
pub(crate) fn split_lanes(
    ticks: &[ParallelAction],
    workers: impl IntoIterator<Item = PeasantId>,
) -> Vec<Lane> {
    let mut townhall = Lane::new(LaneKey::Townhall);
    let mut lanes: BTreeMap<PeasantId, Lane> = workers
        .into_iter()
        .map(|id| (id, Lane::new(LaneKey::Worker(id))))
        .collect();

    for tick in ticks {
        for action in tick.actions() {
            match action.worker() {
                Some(id) => lanes
                    .entry(id)
                    .or_insert_with(|| Lane::new(LaneKey::Worker(id)))
                    .push(action.clone()),
                None => townhall.push(action.clone()),
            }
        }
    }

    std::iter::once(townhall).chain(lanes.into_values()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_core::{BuildPeasantAction, HarvestAction, MoveAction, Position};

    #[test]
    fn ticks_are_split_per_unit_in_order() {
        let p1 = PeasantId(1);
        let p2 = PeasantId(2);
        let ticks = vec![
            ParallelAction::new(vec![
                BuildPeasantAction::new().into(),
                MoveAction::new(p1, Position::new(1, 1), Position::new(2, 1)).into(),
            ]),
            ParallelAction::new(vec![HarvestAction::new(p1).into()]),
        ];

        let lanes = split_lanes(&ticks, [p1, p2]);
        let keys: Vec<LaneKey> = lanes.iter().map(Lane::key).collect();
        assert_eq!(
            keys,
            vec![LaneKey::Townhall, LaneKey::Worker(p1), LaneKey::Worker(p2)]
        );
        assert_eq!(lanes[0].pending().count(), 1);
        let names: Vec<&str> = lanes[1].pending().map(Action::name).collect();
        assert_eq!(names, vec!["Move", "Harvest"]);
        assert_eq!(lanes[2].pending().count(), 0);
        assert!(lanes.iter().all(|l| l.state() == LaneState::Idle));
    }
}
