use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Position, ResourceKind};

/// Plan-time worker id. Initial workers are numbered from 1 in snapshot order; the engine
/// assigns its own ids, which the executor binds to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeasantId(pub u32);

impl fmt::Display for PeasantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Peasant {
    pub id: PeasantId,
    pub position: Position,
    /// Kind of the single load being carried, if any.
    pub cargo: Option<ResourceKind>,
}

impl Peasant {
    pub const fn idle(id: PeasantId, position: Position) -> Self {
        Self {
            id,
            position,
            cargo: None,
        }
    }

    pub fn is_carrying(&self) -> bool {
        self.cargo.is_some()
    }

    pub fn is_carrying_kind(&self, kind: ResourceKind) -> bool {
        self.cargo == Some(kind)
    }
}

/// Hands out fresh plan-time ids. Threaded through state construction so a produced worker's
/// id never depends on how the worker map happens to be sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeasantIdAllocator {
    next: u32,
}

impl PeasantIdAllocator {
    /// The id the next call to [`allocate`](Self::allocate) returns.
    pub fn peek(&self) -> PeasantId {
        PeasantId(self.next)
    }

    pub fn allocate(&mut self) -> PeasantId {
        let id = PeasantId(self.next);
        self.next += 1;
        id
    }
}

impl Default for PeasantIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}
