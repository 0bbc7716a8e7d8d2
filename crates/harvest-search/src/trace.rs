/// What happened to a search node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchEventKind {
    /// Popped from the open set and expanded.
    Expand,
    /// A successor was pushed with a new best path cost.
    Push,
    /// Popped and found to satisfy the goal.
    Goal,
}

/// A small trace record emitted while searching.
///
/// Plain data, so two runs over the same input can be compared event for event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchEvent {
    /// Number of expansions done when the event was emitted.
    pub step: usize,
    pub kind: SearchEventKind,
    /// Path cost of the node.
    pub cost: u32,
    /// Number of ticks from the root to the node.
    pub depth: usize,
}

impl SearchEvent {
    pub fn new(step: usize, kind: SearchEventKind) -> Self {
        Self {
            step,
            kind,
            cost: 0,
            depth: 0,
        }
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

pub trait SearchTraceSink {
    fn emit(&mut self, event: SearchEvent);
}

#[derive(Debug, Default)]
pub struct NullSearchTrace;

impl SearchTraceSink for NullSearchTrace {
    fn emit(&mut self, _event: SearchEvent) {}
}

#[derive(Debug, Default)]
pub struct VecSearchTrace {
    pub events: Vec<SearchEvent>,
}

impl VecSearchTrace {
    pub fn count(&self, kind: SearchEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

impl SearchTraceSink for VecSearchTrace {
    fn emit(&mut self, event: SearchEvent) {
        self.events.push(event);
    }
}
