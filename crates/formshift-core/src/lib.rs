//! Core library for PDF form migration.
//!
//! This crate provides:
//! - AcroForm field access on top of lopdf
//! - Field extraction and per-field fault-tolerant writing
//! - Form-to-form transfer, template fill and marker prefill
//! - Schema grouping, field-set diffs and structure audits
//! - Text reports and the JSON batch log

pub mod analysis;
pub mod batch_log;
pub mod error;
pub mod fields;
pub mod files;
pub mod models;
pub mod orchestrator;
pub mod pdf;
pub mod prefill;
pub mod report;

pub use analysis::{AuditReport, DiffResult, FieldEntry, FormGroup, SchemaFingerprint};
pub use batch_log::{BatchLog, LogEntry};
pub use error::{FieldError, FormshiftError, PdfError, Result};
pub use fields::{Extraction, FieldWriter, WriteReport, extract_fields};
pub use files::list_files;
pub use models::config::FormshiftConfig;
pub use models::field::{
    CHECKED, FailedField, FieldRecord, FieldType, FormSnapshot, RawFieldRecord, SKIP_SENTINEL,
    TransferOutcome, UNCHECKED,
};
pub use orchestrator::Orchestrator;
pub use pdf::{AcroForm, FieldKind, FormDocument, FormField};
