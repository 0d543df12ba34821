//! Telemetry ID reset
//!
//! Reads storage.json, generates same-shaped replacements for the four
//! telemetry IDs, backs the file up and writes the new values.

use std::path::{Path, PathBuf};
use tracing::info;

use super::id_gen::regenerate;
use super::storage::{ConfigStore, TelemetryIds};
use crate::error::Result;

/// Old and new values of a reset
#[derive(Debug, Clone)]
pub struct ResetReport {
    pub old: TelemetryIds,
    pub new: TelemetryIds,
    /// Where the previous storage.json was saved, `None` for dry runs
    pub backup_path: Option<PathBuf>,
}

/// Replacement values shaped like `current`
pub fn plan_reset(current: &TelemetryIds) -> TelemetryIds {
    TelemetryIds::from_fn(|field| regenerate(field, current.get(field)))
}

/// Reset the IDs in the storage.json at `path`
///
/// With `dry_run`, nothing is written and no backup is made.
pub fn reset_ids<P: AsRef<Path>>(path: P, dry_run: bool) -> Result<ResetReport> {
    let mut store = ConfigStore::open(path)?;
    let old = store.ids();
    let new = plan_reset(&old);

    if dry_run {
        return Ok(ResetReport {
            old,
            new,
            backup_path: None,
        });
    }

    store.write(&new)?;
    info!(path = %store.path().display(), "telemetry IDs reset");

    Ok(ResetReport {
        old,
        new,
        backup_path: Some(store.backup_path()),
    })
}
