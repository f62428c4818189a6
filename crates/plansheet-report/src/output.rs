//! Output file naming and housekeeping.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::ReportError;

/// `{prefix}_{YYYYmmdd_HHMMSS}.xlsx`
#[must_use]
pub fn report_file_name(prefix: &str, timestamp: &NaiveDateTime) -> String {
    format!("{prefix}_{}.xlsx", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Creates `dir` and any missing parents.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the directory cannot be created.
pub fn ensure_directory(dir: &Path) -> Result<(), ReportError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.display().to_string(),
        source,
    })
}

/// Copies `path` into `dir`, keeping its file name.
///
/// Best effort: any failure is logged and `None` is returned.
pub fn duplicate_to(path: &Path, dir: &Path) -> Option<PathBuf> {
    let Some(file_name) = path.file_name() else {
        tracing::warn!(path = %path.display(), "output has no file name; not copying");
        return None;
    };
    let target = dir.join(file_name);

    let copied = ensure_directory(dir).and_then(|()| {
        std::fs::copy(path, &target).map_err(|source| ReportError::Io {
            path: target.display().to_string(),
            source,
        })
    });

    match copied {
        Ok(_) => {
            tracing::info!(target = %target.display(), "report copied");
            Some(target)
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not copy report; continuing");
            None
        }
    }
}
