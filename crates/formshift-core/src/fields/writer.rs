//! Writing field records into a target form.

use tracing::{trace, warn};

use crate::error::{FieldError, PdfError};
use crate::models::field::{
    CHECKED, FailedField, FieldRecord, FieldType, RawFieldRecord, SKIP_SENTINEL, TransferOutcome,
};
use crate::pdf::{FieldResult, FormDocument};

/// Applies field records to a form by field id.
///
/// Each record gets exactly one write attempt. A failing record is recorded
/// and the next one is processed; nothing short of serializing the document
/// can fail the whole write.
#[derive(Debug, Clone)]
pub struct FieldWriter {
    skip_sentinel: String,
}

/// Per-record results of applying a set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Records a write was attempted for.
    pub processed: usize,
    /// Records skipped for an empty or sentinel id.
    pub skipped: usize,
    /// Records whose write failed, in input order.
    pub failed: Vec<FailedField>,
}

impl WriteReport {
    pub fn into_outcome(self) -> TransferOutcome {
        TransferOutcome::new(self.failed)
    }
}

/// Serialized document together with the write report.
#[derive(Debug, Clone)]
pub struct WrittenDocument {
    pub bytes: Vec<u8>,
    pub report: WriteReport,
}

impl FieldWriter {
    pub fn new() -> Self {
        Self {
            skip_sentinel: SKIP_SENTINEL.to_string(),
        }
    }

    /// Set the field id that marks a record to be skipped.
    pub fn with_skip_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.skip_sentinel = sentinel.into();
        self
    }

    /// Apply typed records to the form.
    pub fn apply<F: FormDocument + ?Sized>(&self, form: &mut F, records: &[FieldRecord]) -> WriteReport {
        let mut report = WriteReport::default();
        for record in records {
            self.process(
                form,
                &record.field_id,
                Ok(record.field_type),
                record.field_type.as_str(),
                &record.value,
                &mut report,
            );
        }
        report
    }

    /// Apply records whose type names still need to be parsed.
    ///
    /// Records with an unknown type name are reported as failed.
    pub fn apply_raw<F: FormDocument + ?Sized>(
        &self,
        form: &mut F,
        records: &[RawFieldRecord],
    ) -> WriteReport {
        let mut report = WriteReport::default();
        for record in records {
            self.process(
                form,
                &record.field_id,
                record.field_type.parse(),
                &record.field_type,
                &record.value,
                &mut report,
            );
        }
        report
    }

    /// Apply typed records and serialize the document.
    pub fn write<F: FormDocument + ?Sized>(
        &self,
        form: &mut F,
        records: &[FieldRecord],
    ) -> Result<WrittenDocument, PdfError> {
        let report = self.apply(form, records);
        let bytes = form.save()?;
        Ok(WrittenDocument { bytes, report })
    }

    /// Apply raw records and serialize the document.
    pub fn write_raw<F: FormDocument + ?Sized>(
        &self,
        form: &mut F,
        records: &[RawFieldRecord],
    ) -> Result<WrittenDocument, PdfError> {
        let report = self.apply_raw(form, records);
        let bytes = form.save()?;
        Ok(WrittenDocument { bytes, report })
    }

    fn is_skipped(&self, field_id: &str) -> bool {
        field_id.is_empty() || field_id == self.skip_sentinel
    }

    fn process<F: FormDocument + ?Sized>(
        &self,
        form: &mut F,
        field_id: &str,
        field_type: Result<FieldType, FieldError>,
        type_name: &str,
        value: &str,
        report: &mut WriteReport,
    ) {
        if self.is_skipped(field_id) {
            trace!("Skipping record with id {:?}", field_id);
            report.skipped += 1;
            return;
        }
        report.processed += 1;

        let result = field_type.and_then(|ty| write_value(form, field_id, ty, value));
        if let Err(e) = result {
            warn!("Could not write '{}' ({}): {}", field_id, type_name, e);
            report
                .failed
                .push(FailedField::new(field_id, type_name, value, &e));
        }
    }
}

impl Default for FieldWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatch on the record's type, not the target field's kind.
fn write_value<F: FormDocument + ?Sized>(
    form: &mut F,
    field_id: &str,
    field_type: FieldType,
    value: &str,
) -> FieldResult<()> {
    match field_type {
        FieldType::CheckBox => form.set_checked(field_id, value == CHECKED),
        FieldType::Dropdown => form.select_option(field_id, value),
        FieldType::Text => form.set_text(field_id, value),
        FieldType::RadioGroup if value.is_empty() => Err(FieldError::MissingValue {
            name: field_id.to_string(),
            kind: FieldType::RadioGroup.to_string(),
        }),
        FieldType::RadioGroup => form.select_radio(field_id, value),
    }
}
