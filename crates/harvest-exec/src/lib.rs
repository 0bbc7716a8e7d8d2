//! Turns a search plan into engine commands and writes plans to disk.
//!
//! The executor is engine-agnostic: the host feeds it completion/failure/birth events and a
//! per-step observation, and forwards the [`EngineCommand`]s it returns.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod binder;
pub mod command;
pub mod error;
pub mod executor;
pub mod lane;
pub mod observation;
pub mod persist;

pub use binder::IdBinder;
pub use command::{CommandKind, EngineCommand, EngineUnitId, ExecutorEvent};
pub use error::{ExecError, PersistError};
pub use executor::{ExecutorConfig, PlanExecutor};
pub use lane::{Lane, LaneKey, LaneState};
pub use observation::{StepObservation, UnitObservation};
pub use persist::{save_plan, write_plan, DEFAULT_PLAN_PATH};
