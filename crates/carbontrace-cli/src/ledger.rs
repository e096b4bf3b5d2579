//! Local activity log, one JSON record per line.

use crate::error::{CliError, Result};
use carbontrace_domain::{ActivityId, ActivityRecord};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only activity log backed by a JSON-lines file.
///
/// Records are only ever appended, except for the `Pending → Committed`
/// transition, which rewrites the file in place.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Open the log at `path`; the file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record.
    pub fn append(&self, record: &ActivityRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;

        debug!("Appended activity {} to {}", record.id, self.path.display());
        Ok(())
    }

    /// Load every record in file order. A missing file is an empty log.
    pub fn load(&self) -> Result<Vec<ActivityRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| CliError::CorruptLog {
                    line: i + 1,
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    /// Mark a record Committed with a caller-supplied transaction hash.
    pub fn commit(&self, id: &str, tx_hash: &str) -> Result<ActivityRecord> {
        let id = ActivityId::from_string(id).map_err(CliError::InvalidInput)?;
        let mut records = self.load()?;

        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CliError::NotFound(id.to_string()))?;
        record.mark_committed(tx_hash).map_err(CliError::NotPermitted)?;
        let committed = record.clone();

        self.rewrite(&records)?;
        Ok(committed)
    }

    /// Replace the whole file, via a sibling temp file.
    fn rewrite(&self, records: &[ActivityRecord]) -> Result<()> {
        let tmp = self.path.with_extension("jsonl.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            for record in records {
                writeln!(file, "{}", serde_json::to_string(record)?)?;
            }
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
