//! Normalized field data moved between forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::pdf::FieldKind;

/// Value extracted from a checked checkbox.
pub const CHECKED: &str = "Checked";

/// Value extracted from an unchecked checkbox.
pub const UNCHECKED: &str = "Unchecked";

/// Field id that marks a record to be skipped.
pub const SKIP_SENTINEL: &str = "none";

/// Field types whose values can be extracted and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    CheckBox,
    Dropdown,
    RadioGroup,
}

impl FieldType {
    /// All field types, in report order.
    pub const ALL: [FieldType; 4] = [
        FieldType::Text,
        FieldType::CheckBox,
        FieldType::Dropdown,
        FieldType::RadioGroup,
    ];

    /// Map a document field kind to a field type, if it carries transferable data.
    pub fn from_kind(kind: FieldKind) -> Option<Self> {
        match kind {
            FieldKind::Text => Some(FieldType::Text),
            FieldKind::CheckBox => Some(FieldType::CheckBox),
            FieldKind::Dropdown => Some(FieldType::Dropdown),
            FieldKind::RadioGroup => Some(FieldType::RadioGroup),
            FieldKind::OptionList
            | FieldKind::PushButton
            | FieldKind::Signature
            | FieldKind::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::CheckBox => "CheckBox",
            FieldType::Dropdown => "Dropdown",
            FieldType::RadioGroup => "RadioGroup",
        }
    }

    /// Form library class name, accepted as an alias in field lists and records.
    pub fn class_name(&self) -> &'static str {
        match self {
            FieldType::Text => "PDFTextField",
            FieldType::CheckBox => "PDFCheckBox",
            FieldType::Dropdown => "PDFDropdown",
            FieldType::RadioGroup => "PDFRadioGroup",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    /// Parse a type name or class name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        FieldType::ALL
            .into_iter()
            .find(|ty| {
                ty.as_str().eq_ignore_ascii_case(name) || ty.class_name().eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| FieldError::UnknownType(s.to_string()))
    }
}

/// One field of a form: its id, type and current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Fully qualified field name.
    pub field_id: String,

    /// Field type.
    pub field_type: FieldType,

    /// Text content, selected option, or [`CHECKED`]/[`UNCHECKED`].
    pub value: String,
}

impl FieldRecord {
    pub fn new(field_id: impl Into<String>, field_type: FieldType, value: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            field_type,
            value: value.into(),
        }
    }
}

/// A field record whose type has not been validated yet.
///
/// Used where records come from outside a live form (JSON files, field lists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFieldRecord {
    pub field_id: String,
    pub field_type: String,
    #[serde(default)]
    pub value: String,
}

impl From<&FieldRecord> for RawFieldRecord {
    fn from(record: &FieldRecord) -> Self {
        Self {
            field_id: record.field_id.clone(),
            field_type: record.field_type.to_string(),
            value: record.value.clone(),
        }
    }
}

/// Fields extracted from one file, in the form's native order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub file_name: String,
    pub fields: Vec<FieldRecord>,
}

impl FormSnapshot {
    pub fn new(file_name: impl Into<String>, fields: Vec<FieldRecord>) -> Self {
        Self {
            file_name: file_name.into(),
            fields,
        }
    }
}

/// A record that could not be written, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedField {
    pub field_id: String,
    pub field_type: String,
    pub value: String,
    pub error: String,
}

impl FailedField {
    pub fn new(
        field_id: impl Into<String>,
        field_type: impl Into<String>,
        value: impl Into<String>,
        error: &FieldError,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            field_type: field_type.into(),
            value: value.into(),
            error: error.to_string(),
        }
    }
}

/// Partial-failure report of one transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    pub failed_fields_count: usize,
    pub failed_fields: Vec<FailedField>,
}

impl TransferOutcome {
    pub fn new(failed_fields: Vec<FailedField>) -> Self {
        Self {
            failed_fields_count: failed_fields.len(),
            failed_fields,
        }
    }

    /// True when every record was written.
    pub fn is_clean(&self) -> bool {
        self.failed_fields_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_parsing() {
        assert_eq!("Text".parse::<FieldType>(), Ok(FieldType::Text));
        assert_eq!("checkbox".parse::<FieldType>(), Ok(FieldType::CheckBox));
        assert_eq!(" RadioGroup ".parse::<FieldType>(), Ok(FieldType::RadioGroup));
        assert_eq!("PDFTextField".parse::<FieldType>(), Ok(FieldType::Text));
        assert_eq!("PDFCheckBox".parse::<FieldType>(), Ok(FieldType::CheckBox));
        assert_eq!("pdfdropdown".parse::<FieldType>(), Ok(FieldType::Dropdown));
        assert_eq!("PDFRadioGroup".parse::<FieldType>(), Ok(FieldType::RadioGroup));
        assert_eq!(
            "PDFSignature".parse::<FieldType>(),
            Err(FieldError::UnknownType("PDFSignature".to_string()))
        );
        assert_eq!(
            "Signature".parse::<FieldType>(),
            Err(FieldError::UnknownType("Signature".to_string()))
        );
    }

    #[test]
    fn test_field_type_from_kind() {
        assert_eq!(FieldType::from_kind(FieldKind::Dropdown), Some(FieldType::Dropdown));
        assert_eq!(FieldType::from_kind(FieldKind::OptionList), None);
    }

    #[test]
    fn test_record_json_shape() {
        let record = FieldRecord::new("Name", FieldType::Text, "Ann");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "fieldId": "Name", "fieldType": "Text", "value": "Ann" })
        );
    }

    #[test]
    fn test_outcome_counts_failures() {
        let error = FieldError::NotFound("X".to_string());
        let outcome = TransferOutcome::new(vec![FailedField::new("X", "Dropdown", "Bogus", &error)]);
        assert_eq!(outcome.failed_fields_count, 1);
        assert!(!outcome.is_clean());
        assert!(TransferOutcome::default().is_clean());
    }
}
