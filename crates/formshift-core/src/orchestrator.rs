//! Form-level operations: transfer, fill, compare, categorize and audit.
//!
//! The orchestrator loads documents, drives the field layer and persists
//! results. Per-field problems end up in the returned [`TransferOutcome`];
//! anything that prevents producing an output document is an error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::analysis::{
    AuditReport, DiffResult, FieldEntry, FormGroup, audit_fields, diff_fields, group_snapshots,
};
use crate::error::{FormshiftError, PdfError, Result};
use crate::fields::{FieldWriter, SkipReason, SkippedField, WrittenDocument, extract_fields};
use crate::files::file_name;
use crate::models::config::FormshiftConfig;
use crate::models::field::{FormSnapshot, RawFieldRecord, TransferOutcome};
use crate::pdf::{AcroForm, FormDocument};
use crate::prefill::{marker_records, parse_field_list};

/// Runs form operations with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    config: FormshiftConfig,
}

impl Orchestrator {
    pub fn new(config: FormshiftConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormshiftConfig {
        &self.config
    }

    fn writer(&self) -> FieldWriter {
        FieldWriter::new().with_skip_sentinel(self.config.transfer.skip_sentinel.clone())
    }

    /// Load a form from disk.
    pub fn open(&self, path: &Path) -> Result<AcroForm> {
        AcroForm::open(path).map(|form| self.prepare(form))
    }

    fn prepare(&self, form: AcroForm) -> AcroForm {
        form.with_need_appearances(self.config.transfer.need_appearances)
    }

    /// Read two files concurrently and load both forms.
    async fn open_pair(&self, first: &Path, second: &Path) -> Result<(AcroForm, AcroForm)> {
        let (first_bytes, second_bytes) =
            tokio::try_join!(read_document(first), read_document(second))?;
        let first_form = load_document(first, &first_bytes)?;
        let second_form = load_document(second, &second_bytes)?;
        Ok((self.prepare(first_form), self.prepare(second_form)))
    }

    /// Copy every field value of `source` into a copy of `template` saved at
    /// `destination`.
    ///
    /// Source fields missing from the template, or of a different kind there,
    /// are reported in the outcome. Neither input file is modified.
    pub async fn transfer(
        &self,
        source: &Path,
        template: &Path,
        destination: &Path,
    ) -> Result<TransferOutcome> {
        let (source_form, mut template_form) = self.open_pair(source, template).await?;
        let written =
            self.transfer_forms(&source_form, &mut template_form, &file_name(source))?;
        self.persist(destination, &written.bytes)?;

        let outcome = written.report.into_outcome();
        info!(
            "Transferred {} into {} ({} failed fields)",
            source.display(),
            destination.display(),
            outcome.failed_fields_count
        );
        Ok(outcome)
    }

    /// Transfer between two loaded forms and serialize the result.
    pub fn transfer_forms<S, T>(
        &self,
        source: &S,
        template: &mut T,
        source_label: &str,
    ) -> Result<WrittenDocument>
    where
        S: FormDocument + ?Sized,
        T: FormDocument + ?Sized,
    {
        let extraction = extract_fields(source);
        log_skipped(source_label, &extraction.skipped);
        debug!("Writing {} fields from {}", extraction.fields.len(), source_label);

        self.writer()
            .write(template, &extraction.fields)
            .map_err(FormshiftError::Save)
    }

    /// Extract a snapshot of one form.
    pub fn extract(&self, path: &Path) -> Result<FormSnapshot> {
        let form = self.open(path)?;
        let label = file_name(path);
        let extraction = extract_fields(&form);
        log_skipped(&label, &extraction.skipped);
        Ok(extraction.into_snapshot(label))
    }

    /// Write raw records into a copy of `template` saved at `destination`.
    pub fn fill(
        &self,
        template: &Path,
        records: &[RawFieldRecord],
        destination: &Path,
    ) -> Result<TransferOutcome> {
        let mut form = self.open(template)?;
        let written = self
            .writer()
            .write_raw(&mut form, records)
            .map_err(FormshiftError::Save)?;
        self.persist(destination, &written.bytes)?;
        Ok(written.report.into_outcome())
    }

    /// Read a JSON array of raw records and fill `template` with it.
    pub fn fill_from_file(
        &self,
        template: &Path,
        records_path: &Path,
        destination: &Path,
    ) -> Result<TransferOutcome> {
        let content = fs::read_to_string(records_path).map_err(|source| FormshiftError::Read {
            path: records_path.to_path_buf(),
            source,
        })?;
        let records: Vec<RawFieldRecord> = serde_json::from_str(&content).map_err(|e| {
            FormshiftError::Config(format!("invalid records in {}: {e}", records_path.display()))
        })?;
        self.fill(template, &records, destination)
    }

    /// Mark the fields named in a `name, type` list file with the configured marker.
    pub fn prefill(
        &self,
        list_path: &Path,
        pdf: &Path,
        destination: &Path,
    ) -> Result<TransferOutcome> {
        let content = fs::read_to_string(list_path).map_err(|source| FormshiftError::Read {
            path: list_path.to_path_buf(),
            source,
        })?;
        let plan = marker_records(
            &parse_field_list(&content),
            &self.config.prefill.marker,
            &self.config.transfer.skip_sentinel,
        );
        for rejected in &plan.rejected {
            warn!("Not marking '{}': {}", rejected.field_id, rejected.error);
        }

        let outcome = self.fill(pdf, &plan.records, destination)?;
        let mut failed = plan.rejected;
        failed.extend(outcome.failed_fields);
        Ok(TransferOutcome::new(failed))
    }

    /// Compare the field names of two forms.
    pub async fn compare(&self, a: &Path, b: &Path) -> Result<DiffResult> {
        let (form_a, form_b) = self.open_pair(a, b).await?;
        let entries = |form: &AcroForm| -> Vec<FieldEntry> {
            form.fields().iter().map(FieldEntry::from).collect()
        };
        Ok(diff_fields(&entries(&form_a), &entries(&form_b)))
    }

    /// Group files by field schema, one file at a time.
    pub fn categorize(&self, paths: &[PathBuf]) -> Result<Vec<FormGroup>> {
        let mut snapshots = Vec::with_capacity(paths.len());
        for path in paths {
            snapshots.push(self.extract(path)?);
        }
        Ok(group_snapshots(&snapshots))
    }

    /// Audit the field structure of one form.
    pub fn audit(&self, path: &Path) -> Result<AuditReport> {
        let form = self.open(path)?;
        Ok(audit_fields(&form.fields()))
    }

    fn persist(&self, destination: &Path, bytes: &[u8]) -> Result<()> {
        let persist_error = |source| FormshiftError::Persistence {
            path: destination.to_path_buf(),
            source,
        };
        if self.config.transfer.create_parent_dirs {
            if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(persist_error)?;
            }
        }
        fs::write(destination, bytes).map_err(persist_error)?;
        debug!("Saved {} bytes to {}", bytes.len(), destination.display());
        Ok(())
    }
}

async fn read_document(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| FormshiftError::Load {
            path: path.to_path_buf(),
            source: PdfError::Read(e),
        })
}

fn load_document(path: &Path, bytes: &[u8]) -> Result<AcroForm> {
    AcroForm::load(bytes).map_err(|source| FormshiftError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn log_skipped(label: &str, skipped: &[SkippedField]) {
    for field in skipped {
        match &field.reason {
            SkipReason::UnsupportedKind => warn!(
                "Skipping field '{}' of unsupported kind {} in {}",
                field.name, field.kind, label
            ),
            SkipReason::Unreadable(e) => {
                warn!("Could not read field '{}' in {}: {}", field.name, label, e)
            }
            SkipReason::DuplicateName => warn!(
                "Skipping repeated field name '{}' in {}; the first field keeps it",
                field.name, label
            ),
        }
    }
}
