//! World snapshot handed over by the engine when planning starts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{MapExtents, Position, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitKind {
    Townhall,
    Peasant,
}

/// One unit owned by the planning player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitSnapshot {
    pub kind: UnitKind,
    pub x: i32,
    pub y: i32,
    /// Resource currently carried (peasants only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub cargo: Option<ResourceKind>,
}

impl UnitSnapshot {
    pub fn townhall(x: i32, y: i32) -> Self {
        Self {
            kind: UnitKind::Townhall,
            x,
            y,
            cargo: None,
        }
    }

    pub fn peasant(x: i32, y: i32) -> Self {
        Self {
            kind: UnitKind::Peasant,
            x,
            y,
            cargo: None,
        }
    }

    pub fn with_cargo(mut self, kind: ResourceKind) -> Self {
        self.cargo = Some(kind);
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResourceSnapshot {
    pub kind: ResourceKind,
    pub x: i32,
    pub y: i32,
    pub amount: u32,
}

impl ResourceSnapshot {
    pub fn gold(x: i32, y: i32, amount: u32) -> Self {
        Self {
            kind: ResourceKind::Gold,
            x,
            y,
            amount,
        }
    }

    pub fn wood(x: i32, y: i32, amount: u32) -> Self {
        Self {
            kind: ResourceKind::Wood,
            x,
            y,
            amount,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Everything the planner reads from the running game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldSnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub player: u32,
    pub width: i32,
    pub height: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub units: Vec<UnitSnapshot>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resources: Vec<ResourceSnapshot>,
    /// Gold already in the player's stock.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_gold: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_wood: i64,
}

impl WorldSnapshot {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            player: 0,
            width,
            height,
            units: Vec::new(),
            resources: Vec::new(),
            current_gold: 0,
            current_wood: 0,
        }
    }

    pub fn with_player(mut self, player: u32) -> Self {
        self.player = player;
        self
    }

    pub fn with_unit(mut self, unit: UnitSnapshot) -> Self {
        self.units.push(unit);
        self
    }

    pub fn with_resource(mut self, resource: ResourceSnapshot) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn with_stock(mut self, gold: i64, wood: i64) -> Self {
        self.current_gold = gold;
        self.current_wood = wood;
        self
    }

    pub fn extents(&self) -> MapExtents {
        MapExtents::new(self.width, self.height)
    }
}

/// Quotas to reach. Signed so that bad input can be reported rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanningGoal {
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_gold: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_wood: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub build_peasants: bool,
}

impl PlanningGoal {
    pub fn new(required_gold: i64, required_wood: i64) -> Self {
        Self {
            required_gold,
            required_wood,
            build_peasants: false,
        }
    }

    pub fn with_build_peasants(mut self, build_peasants: bool) -> Self {
        self.build_peasants = build_peasants;
        self
    }
}
