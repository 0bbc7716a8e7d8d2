use std::time::Duration;

use harvest_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no plan reaches the goal ({expansions} states expanded)")]
    NoPlan { expansions: usize },

    #[error("expansion limit of {limit} reached")]
    ExpansionLimit { limit: usize },

    #[error("time limit of {limit:?} reached after {expansions} expansions")]
    TimeLimit { limit: Duration, expansions: usize },

    #[error("search cancelled after {expansions} expansions")]
    Cancelled { expansions: usize },

    #[error("invalid planning input: {0}")]
    Invalid(#[from] ValidationError),
}

/// Convenience alias used across the search API.
pub type Result<T> = std::result::Result<T, SearchError>;
