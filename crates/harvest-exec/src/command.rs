use core::fmt;

use harvest_core::Direction;

/// Unit id assigned by the game engine, as opposed to a plan-time [`harvest_core::PeasantId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EngineUnitId(pub u64);

impl fmt::Display for EngineUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Walk to a cell; the engine does the path finding.
    MoveTo { x: i32, y: i32 },
    Gather { direction: Direction },
    Deposit { direction: Direction },
    Produce { template: u32 },
}

/// One order addressed to one engine unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineCommand {
    pub unit: EngineUnitId,
    pub kind: CommandKind,
}

impl EngineCommand {
    pub fn new(unit: EngineUnitId, kind: CommandKind) -> Self {
        Self { unit, kind }
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CommandKind::MoveTo { x, y } => write!(f, "{} move to ({x}, {y})", self.unit),
            CommandKind::Gather { direction } => write!(f, "{} gather {direction}", self.unit),
            CommandKind::Deposit { direction } => write!(f, "{} deposit {direction}", self.unit),
            CommandKind::Produce { template } => write!(f, "{} produce {template}", self.unit),
        }
    }
}

/// Feedback reported by the engine between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutorEvent {
    /// The unit finished its last command.
    UnitCompleted { unit: EngineUnitId },
    /// The unit's last command failed and should be reissued.
    UnitFailed { unit: EngineUnitId },
    /// A new worker appeared.
    UnitBorn { unit: EngineUnitId },
}
