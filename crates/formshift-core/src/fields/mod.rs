//! Field extraction and writing.

mod extractor;
mod writer;

pub use extractor::{Extraction, SkipReason, SkippedField, extract_fields};
pub use writer::{FieldWriter, WriteReport, WrittenDocument};
