//! Field extraction from a live form.

use std::collections::HashSet;

use tracing::trace;

use crate::error::FieldError;
use crate::models::field::{CHECKED, FieldRecord, FieldType, FormSnapshot, UNCHECKED};
use crate::pdf::{FieldKind, FieldResult, FormDocument, FormField};

/// Result of extracting the fields of one form.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Extracted records in the form's native order.
    pub fields: Vec<FieldRecord>,

    /// Fields that were left out, with the reason.
    pub skipped: Vec<SkippedField>,
}

impl Extraction {
    /// Attach a file name to the extracted records.
    pub fn into_snapshot(self, file_name: impl Into<String>) -> FormSnapshot {
        FormSnapshot::new(file_name, self.fields)
    }
}

/// A field dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    pub name: String,
    pub kind: FieldKind,
    pub reason: SkipReason,
}

/// Why a field was dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The field kind carries no transferable value.
    UnsupportedKind,
    /// The field's value could not be read.
    Unreadable(FieldError),
    /// An earlier field already has this full name.
    DuplicateName,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnsupportedKind => f.write_str("unsupported field kind"),
            SkipReason::Unreadable(e) => write!(f, "{e}"),
            SkipReason::DuplicateName => f.write_str("duplicate field name"),
        }
    }
}

/// Extract one record per readable field, preserving the form's order.
///
/// A field that fails to read is dropped and reported in
/// [`Extraction::skipped`]; its siblings are still extracted.
///
/// Field accessors address fields by name, so only the first field with a
/// given name can be read. Later fields with the same name are reported as
/// [`SkipReason::DuplicateName`] instead of repeating the first one's value.
pub fn extract_fields<F: FormDocument + ?Sized>(form: &F) -> Extraction {
    let mut extraction = Extraction::default();
    let mut seen = HashSet::new();

    for field in form.fields() {
        if !seen.insert(field.name.clone()) {
            extraction.skipped.push(SkippedField {
                name: field.name,
                kind: field.kind,
                reason: SkipReason::DuplicateName,
            });
            continue;
        }

        let Some(field_type) = FieldType::from_kind(field.kind) else {
            extraction.skipped.push(SkippedField {
                name: field.name,
                kind: field.kind,
                reason: SkipReason::UnsupportedKind,
            });
            continue;
        };

        match read_value(form, &field, field_type) {
            Ok(value) => {
                trace!("Extracted '{}' ({}) = {:?}", field.name, field_type, value);
                extraction
                    .fields
                    .push(FieldRecord::new(field.name, field_type, value));
            }
            Err(e) => extraction.skipped.push(SkippedField {
                name: field.name,
                kind: field.kind,
                reason: SkipReason::Unreadable(e),
            }),
        }
    }

    extraction
}

fn read_value<F: FormDocument + ?Sized>(
    form: &F,
    field: &FormField,
    field_type: FieldType,
) -> FieldResult<String> {
    let name = field.name.as_str();
    Ok(match field_type {
        FieldType::Text => form.text(name)?,
        FieldType::CheckBox => {
            let state = if form.is_checked(name)? { CHECKED } else { UNCHECKED };
            state.to_string()
        }
        FieldType::Dropdown => form.selected_option(name)?.unwrap_or_default(),
        FieldType::RadioGroup => form.selected_radio(name)?.unwrap_or_default(),
    })
}
