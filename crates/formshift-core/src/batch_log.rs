//! Structured JSON log of batch transfers.
//!
//! The log file holds a JSON array with one entry per processed file. Each
//! append reads the array, pushes the entry and rewrites the whole file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FormshiftError, Result};
use crate::models::field::{FailedField, TransferOutcome};

/// One processed file in the batch log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub file_name: String,
    pub message: String,
    #[serde(default)]
    pub failed_fields: Vec<FailedField>,
}

impl LogEntry {
    /// Entry for a transfer that completed, cleanly or with failed fields.
    pub fn for_outcome(file_name: impl Into<String>, outcome: &TransferOutcome) -> Self {
        let file_name = file_name.into();
        let message = if outcome.is_clean() {
            format!("File '{file_name}' transferred its information without errors!")
        } else {
            format!(
                "File '{file_name}' transferred with some ERRORS! ({} failed fields)",
                outcome.failed_fields_count
            )
        };
        Self {
            file_name,
            message,
            failed_fields: outcome.failed_fields.clone(),
        }
    }

    /// Entry for a transfer that was aborted.
    pub fn for_error(file_name: impl Into<String>, error: &dyn fmt::Display) -> Self {
        let file_name = file_name.into();
        Self {
            message: format!("File '{file_name}' could not be transferred: {error}"),
            file_name,
            failed_fields: Vec::new(),
        }
    }
}

/// Append-only JSON log stored at a fixed path.
#[derive(Debug, Clone)]
pub struct BatchLog {
    path: PathBuf,
}

impl BatchLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries. A missing or empty file has none.
    pub fn entries(&self) -> Result<Vec<LogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.error(e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| self.error(e))
    }

    /// Append an entry and rewrite the file.
    pub fn append(&self, entry: LogEntry) -> Result<()> {
        let mut entries = self.entries()?;
        entries.push(entry);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|e| self.error(e))?;
        fs::write(&self.path, json).map_err(|e| self.error(e))?;

        debug!("Batch log {} now has {} entries", self.path.display(), entries.len());
        Ok(())
    }

    fn error(&self, reason: impl ToString) -> FormshiftError {
        FormshiftError::LogWrite {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_accumulates_entries() {
        let dir = tempfile::tempdir().unwrap();
        let log = BatchLog::new(dir.path().join("logs").join("transfer-log.json"));

        log.append(LogEntry::for_outcome("a.pdf", &TransferOutcome::default()))
            .unwrap();
        let failed = FailedField::new("X", "Dropdown", "Bogus", &FieldError::NotFound("X".into()));
        log.append(LogEntry::for_outcome("b.pdf", &TransferOutcome::new(vec![failed])))
            .unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].message,
            "File 'a.pdf' transferred its information without errors!"
        );
        assert!(entries[1].message.contains("ERRORS"));
        assert_eq!(entries[1].failed_fields[0].field_id, "X");
    }

    #[test]
    fn test_json_shape() {
        let entry = LogEntry::for_error("c.pdf", &"boom");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fileName": "c.pdf",
                "message": "File 'c.pdf' could not be transferred: boom",
                "failedFields": [],
            })
        );
    }

    #[test]
    fn test_empty_file_has_no_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, "  \n").unwrap();
        assert!(BatchLog::new(&path).entries().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, "{ not json").unwrap();

        let log = BatchLog::new(&path);
        let err = log
            .append(LogEntry::for_outcome("a.pdf", &TransferOutcome::default()))
            .unwrap_err();
        assert!(matches!(err, FormshiftError::LogWrite { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
