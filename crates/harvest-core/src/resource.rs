use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Position, HARVEST_QUANTUM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceKind {
    Gold,
    Wood,
}

impl ResourceKind {
    /// Gold first: harvesting and candidate generation both scan in this order.
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Gold, ResourceKind::Wood];

    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Gold => "Gold",
            ResourceKind::Wood => "Wood",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A harvestable node: a gold mine or a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceLocation {
    pub position: Position,
    pub kind: ResourceKind,
    pub amount: u32,
}

impl ResourceLocation {
    pub const fn new(position: Position, kind: ResourceKind, amount: u32) -> Self {
        Self {
            position,
            kind,
            amount,
        }
    }

    /// The node left after one harvest, or `None` once it is used up.
    pub fn harvested(self) -> Option<ResourceLocation> {
        let amount = self.amount.checked_sub(HARVEST_QUANTUM)?;
        if amount == 0 {
            return None;
        }
        Some(ResourceLocation { amount, ..self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvest_removes_node_at_zero() {
        let node = ResourceLocation::new(Position::new(3, 3), ResourceKind::Gold, 250);
        let node = node.harvested().expect("150 left");
        assert_eq!(node.amount, 150);
        let node = node.harvested().expect("50 left");
        assert_eq!(node.amount, 50);
        assert_eq!(node.harvested(), None);

        let exact = ResourceLocation::new(Position::new(0, 0), ResourceKind::Wood, 100);
        assert_eq!(exact.harvested(), None);
    }
}
