//! JSON file holding the stored budget figures.

use std::path::Path;

use daybudget_core::errors::{Error, Result, StoreError};
use daybudget_core::spends::SpendsState;

/// Loads the budget figures from `path`.
///
/// A missing file is not an error: it yields an empty state, which the
/// evaluator reports as "no budgeting period".
pub fn load_spends_state(path: &Path) -> Result<SpendsState> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Snapshot {} not found, starting empty", path.display());
            return Ok(SpendsState::default());
        }
        Err(e) => {
            return Err(Error::Store(StoreError::ReadFailed(format!(
                "{}: {}",
                path.display(),
                e
            ))))
        }
    };

    serde_json::from_str(&contents).map_err(|e| {
        Error::Store(StoreError::Corrupt {
            key: path.display().to_string(),
            reason: e.to_string(),
        })
    })
}
