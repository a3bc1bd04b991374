//! Field-set comparison between two forms.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::pdf::{FieldKind, FormField};

/// Field name and kind, as listed in a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldEntry {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldEntry {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl From<&FormField> for FieldEntry {
    fn from(field: &FormField) -> Self {
        Self::new(field.name.clone(), field.kind)
    }
}

impl fmt::Display for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Fields unique to each side and fields present in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub unique_to_a: Vec<FieldEntry>,
    pub unique_to_b: Vec<FieldEntry>,
    /// Fields of A whose name also appears in B. Kinds are not compared.
    pub common: Vec<FieldEntry>,
}

/// Compare two field lists by exact, case-sensitive name.
pub fn diff_fields(a: &[FieldEntry], b: &[FieldEntry]) -> DiffResult {
    let names_a: HashSet<&str> = a.iter().map(|f| f.name.as_str()).collect();
    let names_b: HashSet<&str> = b.iter().map(|f| f.name.as_str()).collect();

    let (common, unique_to_a): (Vec<FieldEntry>, Vec<FieldEntry>) = a
        .iter()
        .cloned()
        .partition(|f| names_b.contains(f.name.as_str()));
    let unique_to_b = b
        .iter()
        .filter(|f| !names_a.contains(f.name.as_str()))
        .cloned()
        .collect();

    DiffResult {
        unique_to_a,
        unique_to_b,
        common,
    }
}
