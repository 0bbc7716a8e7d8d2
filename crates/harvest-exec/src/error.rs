use std::io;
use std::path::PathBuf;

use harvest_core::PeasantId;
use thiserror::Error;

/// A plan the executor cannot drive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("{action} was never applied to a state, so its effect is unknown")]
    UnresolvedAction { action: String },

    #[error("plan drives worker {id}, which neither exists initially nor is produced")]
    UnknownWorker { id: PeasantId },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write plan to {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write plan")]
    Write(#[from] io::Error),
}
