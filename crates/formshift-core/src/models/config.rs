//! Configuration structures for form migration runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::field::SKIP_SENTINEL;

/// Main configuration for formshift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormshiftConfig {
    /// Field transfer configuration.
    pub transfer: TransferConfig,

    /// Batch run configuration.
    pub batch: BatchConfig,

    /// Report output configuration.
    pub reports: ReportConfig,

    /// Marker prefill configuration.
    pub prefill: PrefillConfig,
}

/// Field transfer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Field id that marks a record to be skipped.
    pub skip_sentinel: String,

    /// Ask viewers to regenerate field appearances in written documents.
    pub need_appearances: bool,

    /// Create missing parent directories of output files.
    pub create_parent_dirs: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            skip_sentinel: SKIP_SENTINEL.to_string(),
            need_appearances: true,
            create_parent_dirs: true,
        }
    }
}

/// Batch transfer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// JSON log file receiving one entry per processed file.
    pub log_file: PathBuf,

    /// Only pick up files with a `.pdf` extension.
    pub pdf_only: bool,

    /// Keep going when a file cannot be transferred.
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("transfer-log.json"),
            pdf_only: true,
            continue_on_error: true,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory receiving analysis and diff reports.
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("results"),
        }
    }
}

/// Marker prefill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefillConfig {
    /// Text written into listed text fields.
    pub marker: String,
}

impl Default for PrefillConfig {
    fn default() -> Self {
        Self {
            marker: "E".to_string(),
        }
    }
}

impl FormshiftConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FormshiftConfig =
            serde_json::from_str(r#"{ "prefill": { "marker": "X" } }"#).unwrap();
        assert_eq!(config.prefill.marker, "X");
        assert_eq!(config.transfer.skip_sentinel, "none");
        assert!(config.batch.pdf_only);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = FormshiftConfig::default();
        config.reports.output_dir = PathBuf::from("out");
        config.save(&path).unwrap();

        let loaded = FormshiftConfig::from_file(&path).unwrap();
        assert_eq!(loaded.reports.output_dir, PathBuf::from("out"));
    }
}
