//! PDF form module.
//!
//! Exposes the interactive form layer of a PDF through the [`FormDocument`]
//! trait. [`AcroForm`] implements it on top of `lopdf`.

mod acroform;
#[cfg(test)]
pub(crate) mod fixtures;

pub use acroform::AcroForm;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, PdfError};

/// Result type for document-level PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Result type for single-field operations.
pub type FieldResult<T> = std::result::Result<T, FieldError>;

/// Field flag bits from the `/Ff` entry (bit positions are 1-based in the PDF reference).
pub mod flags {
    /// Text field: value may contain rich text (bit 26).
    pub const RICH_TEXT: u32 = 1 << 25;
    /// Button field: radio button group (bit 16).
    pub const RADIO: u32 = 1 << 15;
    /// Button field: push button (bit 17).
    pub const PUSH_BUTTON: u32 = 1 << 16;
    /// Choice field: combo box rather than list box (bit 18).
    pub const COMBO: u32 = 1 << 17;
}

/// Kind of a form field as stored in the document.
///
/// Covers every kind a form may contain. Only some of them carry data this
/// crate knows how to move between forms; see [`crate::FieldType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Single or multi-line text box.
    Text,
    /// Two-state button.
    CheckBox,
    /// Combo box choice field.
    Dropdown,
    /// Mutually exclusive button group.
    RadioGroup,
    /// List box choice field.
    OptionList,
    /// Push button (no value).
    PushButton,
    /// Digital signature field.
    Signature,
    /// Missing or unrecognized `/FT`.
    Unknown,
}

impl FieldKind {
    /// Classify a field from its (inherited) `/FT` name and `/Ff` flags.
    pub fn classify(field_type: Option<&[u8]>, field_flags: u32) -> Self {
        match field_type {
            Some(b"Tx") => FieldKind::Text,
            Some(b"Btn") if field_flags & flags::PUSH_BUTTON != 0 => FieldKind::PushButton,
            Some(b"Btn") if field_flags & flags::RADIO != 0 => FieldKind::RadioGroup,
            Some(b"Btn") => FieldKind::CheckBox,
            Some(b"Ch") if field_flags & flags::COMBO != 0 => FieldKind::Dropdown,
            Some(b"Ch") => FieldKind::OptionList,
            Some(b"Sig") => FieldKind::Signature,
            _ => FieldKind::Unknown,
        }
    }

    /// Name used in reports and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "Text",
            FieldKind::CheckBox => "CheckBox",
            FieldKind::Dropdown => "Dropdown",
            FieldKind::RadioGroup => "RadioGroup",
            FieldKind::OptionList => "OptionList",
            FieldKind::PushButton => "PushButton",
            FieldKind::Signature => "Signature",
            FieldKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor of one terminal field, as enumerated by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Fully qualified field name (partial names joined with `.`).
    pub name: String,
    /// Field kind.
    pub kind: FieldKind,
    /// Effective `/Ff` flags.
    pub flags: u32,
}

impl FormField {
    /// Create a descriptor with no flags set.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            flags: 0,
        }
    }

    /// Set the field flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Whether a text field accepts rich text. Always false for other kinds.
    pub fn is_rich_text(&self) -> bool {
        self.kind == FieldKind::Text && self.flags & flags::RICH_TEXT != 0
    }
}

/// Trait for the interactive form layer of a loaded document.
///
/// Accessors address fields by their full name. A name that does not exist
/// fails with [`FieldError::NotFound`]; a name that refers to a field of another
/// kind fails with [`FieldError::KindMismatch`]. When several fields share a
/// full name, accessors resolve to the first of them in [`FormDocument::fields`]
/// order.
pub trait FormDocument {
    /// All terminal fields in the form's native order.
    fn fields(&self) -> Vec<FormField>;

    /// Current content of a text field (empty when unset).
    fn text(&self, name: &str) -> FieldResult<String>;

    /// Whether a checkbox is checked.
    fn is_checked(&self, name: &str) -> FieldResult<bool>;

    /// Selected option of a dropdown, if any.
    fn selected_option(&self, name: &str) -> FieldResult<Option<String>>;

    /// Selected option of a radio group, if any.
    fn selected_radio(&self, name: &str) -> FieldResult<Option<String>>;

    /// Replace the content of a text field.
    fn set_text(&mut self, name: &str, value: &str) -> FieldResult<()>;

    /// Check or uncheck a checkbox.
    fn set_checked(&mut self, name: &str, checked: bool) -> FieldResult<()>;

    /// Select a dropdown option. An empty value clears the selection.
    fn select_option(&mut self, name: &str, value: &str) -> FieldResult<()>;

    /// Select a radio group option.
    fn select_radio(&mut self, name: &str, value: &str) -> FieldResult<()>;

    /// Serialize the document.
    fn save(&mut self) -> Result<Vec<u8>>;
}
