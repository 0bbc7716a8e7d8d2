//! Scenario files: a world snapshot, the quotas to reach and optional search budgets.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use harvest_core::{PlanningGoal, WorldSnapshot};
use harvest_search::PlannerConfig;
use serde::{Deserialize, Serialize};

/// Scenario loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub world: WorldSnapshot,

    pub goal: PlanningGoal,

    /// Search budgets
    #[serde(default)]
    pub planner: PlannerSection,

    /// Where `plan` writes the plan text
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSection {
    pub max_expansions: Option<usize>,
    pub time_limit_ms: Option<u64>,
}

impl PlannerSection {
    pub fn to_config(&self) -> PlannerConfig {
        let mut config = PlannerConfig::default();
        if let Some(max) = self.max_expansions {
            config = config.with_max_expansions(max);
        }
        if let Some(ms) = self.time_limit_ms {
            config = config.with_time_limit(Duration::from_millis(ms));
        }
        config
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(harvest_exec::DEFAULT_PLAN_PATH)
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_core::{ResourceKind, UnitKind};

    const GOLD_RUN: &str = r#"
world:
  width: 8
  height: 8
  units:
    - { kind: townhall, x: 0, y: 0 }
    - { kind: peasant, x: 1, y: 1, cargo: wood }
  resources:
    - { kind: gold, x: 3, y: 0, amount: 500 }
  current_gold: 50
goal:
  required_gold: 100
planner:
  max_expansions: 5000
"#;

    #[test]
    fn parses_with_defaults() {
        let scenario = Scenario::parse(GOLD_RUN).expect("valid yaml");

        assert_eq!(scenario.world.player, 0);
        assert_eq!(scenario.world.units.len(), 2);
        assert_eq!(scenario.world.units[1].kind, UnitKind::Peasant);
        assert_eq!(scenario.world.units[1].cargo, Some(ResourceKind::Wood));
        assert_eq!(scenario.world.resources[0].kind, ResourceKind::Gold);
        assert_eq!(scenario.world.current_gold, 50);
        assert_eq!(scenario.world.current_wood, 0);
        assert_eq!(scenario.goal, PlanningGoal::new(100, 0));
        assert_eq!(scenario.output, PathBuf::from("saves/plan.txt"));

        let config = scenario.planner.to_config();
        assert_eq!(config.max_expansions, Some(5000));
        assert_eq!(config.time_limit, None);
    }

    #[test]
    fn missing_goal_is_an_error() {
        let err = Scenario::parse("world: { width: 4, height: 4 }\n").expect_err("no goal");
        assert!(err.to_string().contains("goal"), "{err}");
    }
}
