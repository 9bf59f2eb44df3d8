use std::{fs, path::Path};

use spendwise_core::snapshot_warnings;
use spendwise_domain::LedgerSnapshot;
use tracing::info;

use crate::errors::CliError;

/// A parsed snapshot plus anything suspicious found while reading it.
#[derive(Debug)]
pub struct LoadedSnapshot {
    pub snapshot: LedgerSnapshot,
    pub warnings: Vec<String>,
}

/// Reads a snapshot JSON file. Dangling references and invalid values are
/// reported as warnings; reports will refuse to run until they are fixed.
pub fn load_snapshot_from_file(path: &Path) -> Result<LoadedSnapshot, CliError> {
    let data = fs::read_to_string(path)?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&data)?;

    let mut warnings = snapshot_warnings(&snapshot);
    if let Err(err) = snapshot.validate() {
        warnings.push(err.to_string());
    }
    info!(
        path = %path.display(),
        version = snapshot.version,
        transactions = snapshot.transactions.len(),
        budgets = snapshot.budgets.len(),
        "loaded snapshot"
    );
    Ok(LoadedSnapshot { snapshot, warnings })
}

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_file(snapshot: &LedgerSnapshot, path: &Path) -> Result<(), CliError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}
