#![forbid(unsafe_code)]

//! JSON export/import of snapshot sequences.
//!
//! One `serde_json` document per sequence: an array of snapshot objects in
//! the renderer wire shape (see `bstviz_core::wire`). Import is strict —
//! unknown hint types and malformed metadata are rejected rather than
//! silently dropped.

use std::fmt;

use bstviz_core::snapshot::Snapshot;
use bstviz_core::wire::{SnapshotJson, WireError};
use tracing::debug;

/// Errors while exporting or importing a sequence.
#[derive(Debug)]
pub enum PersistError {
    /// The document is not valid JSON for the expected shape.
    Json(serde_json::Error),
    /// The JSON parsed but does not describe valid snapshots.
    Wire(WireError),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "sequence JSON error: {e}"),
            Self::Wire(e) => write!(f, "sequence wire error: {e}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Wire(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<WireError> for PersistError {
    fn from(e: WireError) -> Self {
        Self::Wire(e)
    }
}

/// Serialize a snapshot sequence to a pretty-printed JSON array.
pub fn export_sequence(steps: &[Snapshot]) -> Result<String, PersistError> {
    let json: Vec<SnapshotJson> = steps.iter().map(SnapshotJson::from).collect();
    let text = serde_json::to_string_pretty(&json)?;
    debug!(steps = steps.len(), bytes = text.len(), "exported sequence");
    Ok(text)
}

/// Parse a JSON array back into a snapshot sequence.
pub fn import_sequence(text: &str) -> Result<Vec<Snapshot>, PersistError> {
    let json: Vec<SnapshotJson> = serde_json::from_str(text)?;
    let steps = json
        .into_iter()
        .map(|s| Snapshot::try_from(s).map_err(PersistError::from))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(steps = steps.len(), "imported sequence");
    Ok(steps)
}
