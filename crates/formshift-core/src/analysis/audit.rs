//! Structural audit of a single form.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::models::field::FieldType;
use crate::pdf::{FieldKind, FormField};

/// One field as listed in an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditedField {
    pub name: String,
    pub kind: FieldKind,
    /// Only ever true for text fields.
    pub rich_text: bool,
}

/// Structure of one form: counts, duplicates and unsupported fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Every field in native order, including unsupported kinds.
    pub fields: Vec<AuditedField>,
    /// Names seen more than once while enumerating the form.
    ///
    /// Informational: fully qualified names are unique in a well-formed
    /// document, so entries here point at a malformed field tree.
    pub duplicate_names: BTreeSet<String>,
    /// Field count per supported type.
    pub per_type_counts: BTreeMap<FieldType, usize>,
    /// One message per field of an unsupported kind.
    pub invalid_type_fields: Vec<String>,
}

impl AuditReport {
    pub fn total_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn count(&self, field_type: FieldType) -> usize {
        self.per_type_counts.get(&field_type).copied().unwrap_or(0)
    }

    /// Fields counted toward a supported type.
    pub fn recognized_fields(&self) -> usize {
        self.per_type_counts.values().sum()
    }

    /// Rich-text flag per field name.
    pub fn rich_text_flags(&self) -> BTreeMap<String, bool> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.rich_text))
            .collect()
    }
}

/// Audit the raw field list of a form.
pub fn audit_fields(fields: &[FormField]) -> AuditReport {
    let mut report = AuditReport {
        per_type_counts: FieldType::ALL.into_iter().map(|ty| (ty, 0)).collect(),
        ..AuditReport::default()
    };
    let mut seen = HashSet::new();

    for field in fields {
        if !seen.insert(field.name.as_str()) {
            report.duplicate_names.insert(field.name.clone());
        }

        match FieldType::from_kind(field.kind) {
            Some(field_type) => *report.per_type_counts.entry(field_type).or_default() += 1,
            None => report.invalid_type_fields.push(format!(
                "Field '{}' has unsupported type: {}",
                field.name, field.kind
            )),
        }

        report.fields.push(AuditedField {
            name: field.name.clone(),
            kind: field.kind,
            rich_text: field.is_rich_text(),
        });
    }

    report
}
