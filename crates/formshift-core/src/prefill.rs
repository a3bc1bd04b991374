//! Marker prefill: flag the fields of a form that should receive data.
//!
//! Input is a plain text list with one `name, type` pair per line.

use crate::error::FieldError;
use crate::models::field::{CHECKED, FailedField, FieldType, RawFieldRecord};

/// One line of a field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedField {
    pub name: String,
    pub type_name: String,
}

/// Records to write and entries rejected before writing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerPlan {
    pub records: Vec<RawFieldRecord>,
    pub rejected: Vec<FailedField>,
}

/// Parse `name, type` lines. Blank lines are ignored; a missing type is empty.
pub fn parse_field_list(content: &str) -> Vec<ListedField> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut parts = line.split(',');
            let name = parts.next().unwrap_or_default().trim().to_string();
            let type_name = parts.next().unwrap_or_default().trim().to_string();
            ListedField { name, type_name }
        })
        .collect()
}

/// Build the marker records for a field list.
///
/// Text fields receive `marker`, checkboxes are checked. Dropdowns and radio
/// groups are rejected. Unknown type names are passed through so the writer
/// reports them. Blank names and `skip_sentinel` are dropped.
pub fn marker_records(fields: &[ListedField], marker: &str, skip_sentinel: &str) -> MarkerPlan {
    let mut plan = MarkerPlan::default();

    for field in fields {
        if field.name.is_empty() || field.name == skip_sentinel {
            continue;
        }
        let value = match field.type_name.parse::<FieldType>() {
            Ok(FieldType::Text) => marker,
            Ok(FieldType::CheckBox) => CHECKED,
            Ok(other) => {
                let error = FieldError::KindMismatch {
                    name: field.name.clone(),
                    expected: "Text or CheckBox".to_string(),
                    actual: other.to_string(),
                };
                plan.rejected
                    .push(FailedField::new(&field.name, &field.type_name, "", &error));
                continue;
            }
            Err(_) => "",
        };
        plan.records.push(RawFieldRecord {
            field_id: field.name.clone(),
            field_type: field.type_name.clone(),
            value: value.to_string(),
        });
    }

    plan
}
