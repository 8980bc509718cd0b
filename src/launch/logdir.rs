use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

use crate::consts::{LOGS_DIR, LOG_FILE_NAME, RUN_DIR_PREFIX, RUN_STAMP_FORMAT};
use crate::error::AppError;

/// `run_<YYYYMMDD_HHMMSS>` for the given instant
pub(crate) fn run_dir_name(at: &DateTime<FixedOffset>) -> String {
    format!("{RUN_DIR_PREFIX}{}", at.format(RUN_STAMP_FORMAT))
}

/// `<parent>/logs/run_<YYYYMMDD_HHMMSS>`
pub(crate) fn log_dir_path(parent: &Path, at: &DateTime<FixedOffset>) -> PathBuf {
    parent.join(LOGS_DIR).join(run_dir_name(at))
}

pub(crate) fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Create the run directory and any missing parents
pub(crate) fn create_log_dir(path: &Path) -> Result<(), AppError> {
    fs::create_dir_all(path).map_err(|source| AppError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "created log directory");
    Ok(())
}
