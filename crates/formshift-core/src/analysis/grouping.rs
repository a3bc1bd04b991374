//! Grouping forms by field schema.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{FormshiftError, Result};
use crate::models::field::{FieldRecord, FieldType, FormSnapshot};

/// Order- and value-independent key of a form's field ids and types.
///
/// Two forms share a fingerprint iff they have the same number of fields with
/// the same ids and types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaFingerprint(String);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FingerprintEntry<'a> {
    field_id: &'a str,
    field_type: FieldType,
}

impl SchemaFingerprint {
    /// Compute the fingerprint of a set of fields.
    pub fn of(fields: &[FieldRecord]) -> Self {
        let mut entries: Vec<FingerprintEntry<'_>> = fields
            .iter()
            .map(|field| FingerprintEntry {
                field_id: &field.field_id,
                field_type: field.field_type,
            })
            .collect();
        entries.sort_by(|a, b| {
            a.field_id
                .cmp(b.field_id)
                .then_with(|| a.field_type.cmp(&b.field_type))
        });
        Self(serde_json::to_string(&entries).unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Files sharing one schema fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormGroup {
    #[serde(skip)]
    pub fingerprint: SchemaFingerprint,
    /// Number of fields in every form of the group.
    pub field_count: usize,
    /// File names in input order.
    pub files: Vec<String>,
}

/// Partition snapshots into groups of identical field schema.
///
/// Groups are emitted in the order their fingerprint is first seen; files
/// keep their input order within a group.
pub fn group_snapshots(snapshots: &[FormSnapshot]) -> Vec<FormGroup> {
    let mut index: HashMap<SchemaFingerprint, usize> = HashMap::new();
    let mut groups: Vec<FormGroup> = Vec::new();

    for snapshot in snapshots {
        let fingerprint = SchemaFingerprint::of(&snapshot.fields);
        match index.get(&fingerprint) {
            Some(&position) => groups[position].files.push(snapshot.file_name.clone()),
            None => {
                index.insert(fingerprint.clone(), groups.len());
                groups.push(FormGroup {
                    fingerprint,
                    field_count: snapshot.fields.len(),
                    files: vec![snapshot.file_name.clone()],
                });
            }
        }
    }

    debug!("Grouped {} forms into {} groups", snapshots.len(), groups.len());
    groups
}

/// Copy grouped files from `source_dir` into `output_dir/group_<n>`.
///
/// Returns the number of files copied. Files missing from `source_dir` are
/// skipped.
pub fn organize_groups(groups: &[FormGroup], source_dir: &Path, output_dir: &Path) -> Result<usize> {
    let mut copied = 0;

    for (index, group) in groups.iter().enumerate() {
        let group_dir = output_dir.join(format!("group_{}", index + 1));
        fs::create_dir_all(&group_dir).map_err(|source| FormshiftError::Persistence {
            path: group_dir.clone(),
            source,
        })?;

        for file_name in &group.files {
            let source_path = source_dir.join(file_name);
            if !source_path.is_file() {
                warn!("Grouped file {} not found, skipping", source_path.display());
                continue;
            }
            let target = group_dir.join(file_name);
            fs::copy(&source_path, &target).map_err(|source| FormshiftError::Persistence {
                path: target.clone(),
                source,
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot(name: &str, fields: &[(&str, FieldType, &str)]) -> FormSnapshot {
        FormSnapshot::new(
            name,
            fields
                .iter()
                .map(|(id, ty, value)| FieldRecord::new(*id, *ty, *value))
                .collect(),
        )
    }

    fn files(groups: &[FormGroup]) -> Vec<Vec<&str>> {
        groups
            .iter()
            .map(|g| g.files.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_different_field_sets_form_separate_groups() {
        let form1 = snapshot("form1.pdf", &[("Name", FieldType::Text, "Ann")]);
        let form2 = snapshot(
            "form2.pdf",
            &[("Name", FieldType::Text, "Ann"), ("Age", FieldType::Text, "9")],
        );

        let groups = group_snapshots(&[form1, form2]);
        assert_eq!(files(&groups), vec![vec!["form1.pdf"], vec!["form2.pdf"]]);
    }

    #[test]
    fn test_fingerprint_ignores_order_and_values() {
        let a = snapshot(
            "a.pdf",
            &[("B", FieldType::Text, "1"), ("A", FieldType::CheckBox, "Checked")],
        );
        let b = snapshot(
            "b.pdf",
            &[("A", FieldType::CheckBox, "Unchecked"), ("B", FieldType::Text, "")],
        );
        assert_eq!(SchemaFingerprint::of(&a.fields), SchemaFingerprint::of(&b.fields));
    }

    #[test]
    fn test_fingerprint_depends_on_type() {
        let a = snapshot("a.pdf", &[("A", FieldType::Text, "")]);
        let b = snapshot("b.pdf", &[("A", FieldType::Dropdown, "")]);
        assert_ne!(SchemaFingerprint::of(&a.fields), SchemaFingerprint::of(&b.fields));
    }

    #[test]
    fn test_group_order_follows_first_occurrence() {
        let x1 = snapshot("x1.pdf", &[("X", FieldType::Text, "")]);
        let y1 = snapshot("y1.pdf", &[("Y", FieldType::Text, "")]);
        let x2 = snapshot("x2.pdf", &[("X", FieldType::Text, "other")]);
        let y2 = snapshot("y2.pdf", &[("Y", FieldType::Text, "")]);

        let groups = group_snapshots(&[x1.clone(), y1.clone(), x2.clone(), y2.clone()]);
        assert_eq!(files(&groups), vec![vec!["x1.pdf", "x2.pdf"], vec!["y1.pdf", "y2.pdf"]]);

        let shuffled = group_snapshots(&[y2, x2, y1, x1]);
        assert_eq!(files(&shuffled), vec![vec!["y2.pdf", "y1.pdf"], vec!["x2.pdf", "x1.pdf"]]);
    }

    #[test]
    fn test_transitive_grouping() {
        let a = snapshot("a.pdf", &[("N", FieldType::Text, "1"), ("M", FieldType::CheckBox, "")]);
        let b = snapshot("b.pdf", &[("M", FieldType::CheckBox, ""), ("N", FieldType::Text, "2")]);
        let c = snapshot("c.pdf", &[("N", FieldType::Text, "3"), ("M", FieldType::CheckBox, "x")]);

        let groups = group_snapshots(&[a, b, c]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].field_count, 2);
    }

    #[test]
    fn test_empty_forms_group_together() {
        let groups = group_snapshots(&[
            snapshot("empty1.pdf", &[]),
            snapshot("full.pdf", &[("A", FieldType::Text, "")]),
            snapshot("empty2.pdf", &[]),
        ]);
        assert_eq!(files(&groups), vec![vec!["empty1.pdf", "empty2.pdf"], vec!["full.pdf"]]);
        assert_eq!(groups[0].fingerprint.as_str(), "[]");
    }

    #[test]
    fn test_organize_copies_into_group_dirs() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.pdf"), b"a").unwrap();
        fs::write(input.path().join("b.pdf"), b"b").unwrap();

        let groups = group_snapshots(&[
            snapshot("a.pdf", &[]),
            snapshot("b.pdf", &[("A", FieldType::Text, "")]),
            snapshot("gone.pdf", &[]),
        ]);
        let copied = organize_groups(&groups, input.path(), output.path()).unwrap();

        assert_eq!(copied, 2);
        assert!(output.path().join("group_1").join("a.pdf").is_file());
        assert!(output.path().join("group_2").join("b.pdf").is_file());
        assert!(!output.path().join("group_1").join("gone.pdf").exists());
    }
}
