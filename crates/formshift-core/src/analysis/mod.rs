//! Cross-form analysis: schema grouping, field-set diffs and structure audits.

mod audit;
mod diff;
mod grouping;

pub use audit::{AuditReport, AuditedField, audit_fields};
pub use diff::{DiffResult, FieldEntry, diff_fields};
pub use grouping::{FormGroup, SchemaFingerprint, group_snapshots, organize_groups};
