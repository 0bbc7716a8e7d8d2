use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use harvest_core::ParallelAction;

use crate::PersistError;

/// Where plans are written when no path is given.
pub const DEFAULT_PLAN_PATH: &str = "saves/plan.txt";

/// Writes one tick per line, root first.
pub fn write_plan<W: Write>(ticks: &[ParallelAction], mut writer: W) -> Result<(), PersistError> {
    for tick in ticks {
        writeln!(writer, "{tick}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the plan to `path`, creating missing parent directories.
pub fn save_plan(ticks: &[ParallelAction], path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PersistError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = fs::File::create(path).map_err(|source| PersistError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    write_plan(ticks, BufWriter::new(file))?;

    tracing::info!(path = %path.display(), ticks = ticks.len(), "saved plan");
    Ok(())
}
