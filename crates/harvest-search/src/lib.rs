//! Deterministic A* over `harvest-core` game states.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod planner;
pub mod trace;

pub use error::SearchError;
pub use planner::{CancelToken, Plan, Planner, PlannerConfig, SearchStats};
pub use trace::{NullSearchTrace, SearchEvent, SearchEventKind, SearchTraceSink, VecSearchTrace};
