//! Error types for the formshift-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the formshift library.
///
/// These are call-level failures: they abort the operation that raised them.
/// Failures scoped to a single field are reported as [`FieldError`] values
/// inside the operation's result instead.
#[derive(Error, Debug)]
pub enum FormshiftError {
    /// A source, template or input file could not be read or parsed.
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: PdfError,
    },

    /// The modified document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Save(#[source] PdfError),

    /// Writing output to disk failed.
    #[error("failed to write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The structured batch log could not be updated.
    #[error("failed to update log {}: {reason}", path.display())]
    LogWrite { path: PathBuf, reason: String },

    /// A directory or auxiliary input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF documents as a whole.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The file could not be read.
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse the PDF bytes.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to serialize the PDF.
    #[error("failed to save PDF: {0}")]
    Save(String),

    /// The document structure is not usable (e.g. broken catalog).
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Errors scoped to a single form field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// No field with this name exists in the form.
    #[error("no field named '{0}'")]
    NotFound(String),

    /// The field exists but is of another kind.
    #[error("field '{name}' is a {actual}, not a {expected}")]
    KindMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// The value is not one of the field's options.
    #[error("'{value}' is not a valid option for field '{name}'")]
    InvalidOption { name: String, value: String },

    /// A value is required but none was provided.
    #[error("no value provided for {kind} '{name}'")]
    MissingValue { name: String, kind: String },

    /// The record's field type is not one we can write.
    #[error("Unknown field type: {0}")]
    UnknownType(String),

    /// The field's stored state could not be interpreted.
    #[error("field '{name}' has unreadable state: {reason}")]
    Corrupt { name: String, reason: String },
}

/// Result type for the formshift library.
pub type Result<T> = std::result::Result<T, FormshiftError>;
