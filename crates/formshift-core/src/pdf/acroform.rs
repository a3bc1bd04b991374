//! AcroForm field access using lopdf.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use tracing::{debug, trace, warn};

use super::{FieldKind, FieldResult, FormDocument, FormField, Result};
use crate::error::{FieldError, FormshiftError, PdfError};

const OFF: &[u8] = b"Off";
const DEFAULT_ON_STATE: &[u8] = b"Yes";

/// Interactive form of a PDF document loaded with lopdf.
pub struct AcroForm {
    document: Document,
    fields: Vec<FieldNode>,
    modified: bool,
    need_appearances: bool,
}

/// A terminal field and the widgets that display it.
#[derive(Debug, Clone)]
struct FieldNode {
    id: ObjectId,
    name: String,
    kind: FieldKind,
    flags: u32,
    widgets: Vec<ObjectId>,
}

/// One selectable button of a radio group.
struct RadioOption {
    widget: ObjectId,
    state: Vec<u8>,
    export: String,
}

impl AcroForm {
    /// Load a form from PDF bytes.
    ///
    /// Encrypted documents are opened with the empty password. When that
    /// fails the document is still read as stored; only unparseable bytes are
    /// rejected.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // The reader already decrypts when the empty password is accepted.
        if document.is_encrypted() {
            match document.decrypt("") {
                Ok(()) => debug!("Decrypted PDF with empty password"),
                Err(e) => warn!("Could not decrypt PDF, reading it as stored: {}", e),
            }
        }

        let fields = collect_fields(&document)?;
        debug!("Loaded form with {} fields", fields.len());

        Ok(Self {
            document,
            fields,
            modified: false,
            need_appearances: true,
        })
    }

    /// Read and load a form from a file.
    pub fn open(path: &Path) -> crate::Result<Self> {
        let load = || -> Result<Self> {
            let data = fs::read(path)?;
            Self::load(&data)
        };
        load().map_err(|source| FormshiftError::Load {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set whether viewers are asked to regenerate field appearances after writes.
    pub fn with_need_appearances(mut self, enabled: bool) -> Self {
        self.need_appearances = enabled;
        self
    }

    fn node(&self, name: &str) -> FieldResult<&FieldNode> {
        self.fields
            .iter()
            .find(|node| node.name == name)
            .ok_or_else(|| FieldError::NotFound(name.to_string()))
    }

    fn node_of_kind(&self, name: &str, expected: FieldKind) -> FieldResult<FieldNode> {
        let node = self.node(name)?;
        if node.kind != expected {
            return Err(FieldError::KindMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: node.kind.to_string(),
            });
        }
        Ok(node.clone())
    }

    fn field_dict(&self, node: &FieldNode) -> FieldResult<&Dictionary> {
        self.document
            .get_dictionary(node.id)
            .map_err(|e| corrupt(&node.name, e))
    }

    fn field_dict_mut(&mut self, node: &FieldNode) -> FieldResult<&mut Dictionary> {
        self.document
            .get_dictionary_mut(node.id)
            .map_err(|e| corrupt(&node.name, e))
    }

    fn value<'a>(&'a self, dict: &'a Dictionary) -> Option<&'a Object> {
        let value = dict.get(b"V").ok()?;
        Some(resolve(&self.document, value))
    }

    fn resolve_dict<'a>(&'a self, object: &'a Object) -> Option<&'a Dictionary> {
        resolve(&self.document, object).as_dict().ok()
    }

    /// First non-`Off` appearance state of a button widget.
    fn on_state(&self, widget: ObjectId) -> Option<Vec<u8>> {
        let dict = self.document.get_dictionary(widget).ok()?;
        let appearances = self.resolve_dict(dict.get(b"AP").ok()?)?;
        for key in [b"N".as_slice(), b"D".as_slice()] {
            let Some(states) = appearances.get(key).ok().and_then(|s| self.resolve_dict(s)) else {
                continue;
            };
            if let Some((state, _)) = states.iter().find(|(state, _)| state.as_slice() != OFF) {
                return Some(state.clone());
            }
        }
        None
    }

    fn appearance_state(&self, widget: ObjectId) -> Option<&[u8]> {
        self.document
            .get_dictionary(widget)
            .ok()?
            .get(b"AS")
            .ok()?
            .as_name()
            .ok()
    }

    fn set_appearance_state(&mut self, widget: ObjectId, state: Vec<u8>) {
        if let Ok(dict) = self.document.get_dictionary_mut(widget) {
            dict.set("AS", Object::Name(state));
        }
    }

    /// Export values of a choice field's `/Opt` entries.
    fn choice_options(&self, node: &FieldNode) -> FieldResult<Vec<String>> {
        let dict = self.field_dict(node)?;
        let Ok(options) = dict.get(b"Opt") else {
            return Ok(Vec::new());
        };
        let options = resolve(&self.document, options)
            .as_array()
            .map_err(|_| corrupt(&node.name, "/Opt is not an array"))?;

        options
            .iter()
            .map(|entry| {
                let option = match resolve(&self.document, entry) {
                    Object::Array(pair) => pair.first().and_then(text_of),
                    other => text_of(other),
                };
                option.ok_or_else(|| corrupt(&node.name, "unreadable /Opt entry"))
            })
            .collect()
    }

    fn radio_options(&self, node: &FieldNode) -> FieldResult<Vec<RadioOption>> {
        let dict = self.field_dict(node)?;
        let exports = dict
            .get(b"Opt")
            .ok()
            .and_then(|o| resolve(&self.document, o).as_array().ok());

        let mut options = Vec::with_capacity(node.widgets.len());
        for (index, widget) in node.widgets.iter().enumerate() {
            let Some(state) = self.on_state(*widget) else {
                trace!("Radio widget {:?} of '{}' has no on state", widget, node.name);
                continue;
            };
            let export = exports
                .and_then(|values| values.get(index))
                .and_then(text_of)
                .unwrap_or_else(|| decode_name(&state));
            options.push(RadioOption {
                widget: *widget,
                state,
                export,
            });
        }
        Ok(options)
    }

    fn set_need_appearances(&mut self) -> Result<()> {
        let root = self
            .document
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|e| PdfError::Malformed(format!("missing document catalog: {e}")))?;

        let form_ref = match self.document.get_dictionary(root).and_then(|c| c.get(b"AcroForm")) {
            Ok(Object::Reference(id)) => Some(*id),
            Ok(_) => None,
            Err(_) => return Ok(()),
        };

        let form = match form_ref {
            Some(id) => self.document.get_dictionary_mut(id),
            None => self
                .document
                .get_dictionary_mut(root)
                .and_then(|catalog| catalog.get_mut(b"AcroForm"))
                .and_then(Object::as_dict_mut),
        }
        .map_err(|e| PdfError::Malformed(format!("unreadable /AcroForm: {e}")))?;

        form.set("NeedAppearances", true);
        Ok(())
    }
}

impl FormDocument for AcroForm {
    fn fields(&self) -> Vec<FormField> {
        self.fields
            .iter()
            .map(|node| FormField {
                name: node.name.clone(),
                kind: node.kind,
                flags: node.flags,
            })
            .collect()
    }

    fn text(&self, name: &str) -> FieldResult<String> {
        let node = self.node_of_kind(name, FieldKind::Text)?;
        let dict = self.field_dict(&node)?;

        match self.value(dict) {
            None | Some(Object::Null) => Ok(String::new()),
            Some(Object::String(bytes, _)) => Ok(decode_text(bytes)),
            Some(Object::Stream(stream)) => {
                let content = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                Ok(decode_text(&content))
            }
            Some(other) => Err(unexpected_value(name, other)),
        }
    }

    fn is_checked(&self, name: &str) -> FieldResult<bool> {
        let node = self.node_of_kind(name, FieldKind::CheckBox)?;
        let dict = self.field_dict(&node)?;

        match self.value(dict) {
            Some(Object::Name(state)) => Ok(state.as_slice() != OFF),
            None | Some(Object::Null) => Ok(node
                .widgets
                .iter()
                .any(|widget| self.appearance_state(*widget).is_some_and(|s| s != OFF))),
            Some(other) => Err(unexpected_value(name, other)),
        }
    }

    fn selected_option(&self, name: &str) -> FieldResult<Option<String>> {
        let node = self.node_of_kind(name, FieldKind::Dropdown)?;
        let dict = self.field_dict(&node)?;

        let selected = match self.value(dict) {
            None | Some(Object::Null) => None,
            Some(Object::Array(values)) => values.first().and_then(text_of),
            Some(value) => Some(text_of(value).ok_or_else(|| unexpected_value(name, value))?),
        };
        Ok(selected.filter(|s| !s.is_empty()))
    }

    fn selected_radio(&self, name: &str) -> FieldResult<Option<String>> {
        let node = self.node_of_kind(name, FieldKind::RadioGroup)?;
        let dict = self.field_dict(&node)?;

        match self.value(dict) {
            None | Some(Object::Null) => Ok(None),
            Some(Object::Name(state)) if state.as_slice() == OFF => Ok(None),
            Some(Object::Name(state)) => {
                let export = self
                    .radio_options(&node)?
                    .into_iter()
                    .find(|option| &option.state == state)
                    .map(|option| option.export)
                    .unwrap_or_else(|| decode_name(state));
                Ok(Some(export))
            }
            Some(other) => Err(unexpected_value(name, other)),
        }
    }

    fn set_text(&mut self, name: &str, value: &str) -> FieldResult<()> {
        let node = self.node_of_kind(name, FieldKind::Text)?;
        self.field_dict_mut(&node)?.set("V", encode_text(value));
        self.modified = true;
        Ok(())
    }

    fn set_checked(&mut self, name: &str, checked: bool) -> FieldResult<()> {
        let node = self.node_of_kind(name, FieldKind::CheckBox)?;
        let states: Vec<(ObjectId, Vec<u8>)> = node
            .widgets
            .iter()
            .map(|widget| {
                let on = self.on_state(*widget).unwrap_or_else(|| DEFAULT_ON_STATE.to_vec());
                (*widget, on)
            })
            .collect();

        let value = match (checked, states.first()) {
            (true, Some((_, on))) => on.clone(),
            (true, None) => DEFAULT_ON_STATE.to_vec(),
            (false, _) => OFF.to_vec(),
        };
        self.field_dict_mut(&node)?.set("V", Object::Name(value));

        for (widget, on) in states {
            let state = if checked { on } else { OFF.to_vec() };
            self.set_appearance_state(widget, state);
        }
        self.modified = true;
        Ok(())
    }

    fn select_option(&mut self, name: &str, value: &str) -> FieldResult<()> {
        let node = self.node_of_kind(name, FieldKind::Dropdown)?;

        if value.is_empty() {
            self.field_dict_mut(&node)?.remove(b"V");
            self.modified = true;
            return Ok(());
        }

        let options = self.choice_options(&node)?;
        if !options.iter().any(|option| option == value) {
            return Err(FieldError::InvalidOption {
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        self.field_dict_mut(&node)?.set("V", encode_text(value));
        self.modified = true;
        Ok(())
    }

    fn select_radio(&mut self, name: &str, value: &str) -> FieldResult<()> {
        let node = self.node_of_kind(name, FieldKind::RadioGroup)?;
        let options = self.radio_options(&node)?;

        let chosen = options
            .iter()
            .find(|option| option.export == value)
            .map(|option| option.state.clone())
            .ok_or_else(|| FieldError::InvalidOption {
                name: name.to_string(),
                value: value.to_string(),
            })?;

        self.field_dict_mut(&node)?.set("V", Object::Name(chosen.clone()));
        for option in options {
            let state = if option.state == chosen { chosen.clone() } else { OFF.to_vec() };
            self.set_appearance_state(option.widget, state);
        }
        self.modified = true;
        Ok(())
    }

    fn save(&mut self) -> Result<Vec<u8>> {
        if self.modified && self.need_appearances {
            self.set_need_appearances()?;
        }

        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|e| PdfError::Save(e.to_string()))?;
        Ok(buffer)
    }
}

/// Inheritable entries passed down the field tree.
#[derive(Debug, Clone, Default)]
struct Inherited {
    field_type: Option<Vec<u8>>,
    flags: Option<u32>,
}

struct FieldWalker<'a> {
    document: &'a Document,
    visited: HashSet<ObjectId>,
    fields: Vec<FieldNode>,
}

impl FieldWalker<'_> {
    fn visit(&mut self, id: ObjectId, parent_name: Option<&str>, inherited: &Inherited) {
        let document = self.document;

        if !self.visited.insert(id) {
            trace!("Field object {:?} already visited", id);
            return;
        }
        let Ok(dict) = document.get_dictionary(id) else {
            trace!("Field object {:?} is not a dictionary", id);
            return;
        };

        let partial = dict.get(b"T").ok().and_then(text_of);
        let name = match (parent_name, partial) {
            (Some(parent), Some(partial)) => format!("{parent}.{partial}"),
            (Some(parent), None) => parent.to_string(),
            (None, Some(partial)) => partial,
            (None, None) => String::new(),
        };

        let inherited = Inherited {
            field_type: dict
                .get(b"FT")
                .and_then(Object::as_name)
                .ok()
                .map(<[u8]>::to_vec)
                .or_else(|| inherited.field_type.clone()),
            flags: dict
                .get(b"Ff")
                .and_then(Object::as_i64)
                .ok()
                .map(|f| f as u32)
                .or(inherited.flags),
        };

        let kids: Vec<ObjectId> = dict
            .get(b"Kids")
            .ok()
            .and_then(|kids| resolve(document, kids).as_array().ok())
            .map(|kids| kids.iter().filter_map(|kid| kid.as_reference().ok()).collect())
            .unwrap_or_default();

        // Kids carrying /T are child fields; the rest are widget annotations.
        let (children, widgets): (Vec<ObjectId>, Vec<ObjectId>) = kids
            .into_iter()
            .partition(|kid| document.get_dictionary(*kid).is_ok_and(|d| d.has(b"T")));

        if !children.is_empty() {
            let parent = Some(name.as_str()).filter(|n| !n.is_empty());
            for child in children {
                self.visit(child, parent, &inherited);
            }
            return;
        }

        if name.is_empty() {
            trace!("Skipping unnamed field {:?}", id);
            return;
        }

        let widgets = if widgets.is_empty() { vec![id] } else { widgets };
        let flags = inherited.flags.unwrap_or(0);
        let kind = FieldKind::classify(inherited.field_type.as_deref(), flags);

        trace!("Found field '{}' ({})", name, kind);
        self.fields.push(FieldNode {
            id,
            name,
            kind,
            flags,
            widgets,
        });
    }
}

fn collect_fields(document: &Document) -> Result<Vec<FieldNode>> {
    let catalog = document
        .catalog()
        .map_err(|e| PdfError::Malformed(format!("missing document catalog: {e}")))?;

    let roots = catalog
        .get(b"AcroForm")
        .ok()
        .and_then(|form| resolve(document, form).as_dict().ok())
        .and_then(|form| form.get(b"Fields").ok())
        .and_then(|fields| resolve(document, fields).as_array().ok());

    let Some(roots) = roots else {
        debug!("Document has no interactive form");
        return Ok(Vec::new());
    };

    let mut walker = FieldWalker {
        document,
        visited: HashSet::new(),
        fields: Vec::new(),
    };
    for root in roots {
        match root {
            Object::Reference(id) => walker.visit(*id, None, &Inherited::default()),
            _ => trace!("Skipping direct object in /Fields"),
        }
    }
    Ok(walker.fields)
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> &'a Object {
    document
        .dereference(object)
        .map(|(_, resolved)| resolved)
        .unwrap_or(object)
}

fn text_of(object: &Object) -> Option<String> {
    match object {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        Object::Name(bytes) => Some(decode_name(bytes)),
        _ => None,
    }
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8 with BOM, or PDFDocEncoding).
fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    bytes.iter().map(|&b| pdf_doc_char(b)).collect()
}

/// Map one PDFDocEncoding byte to its character.
fn pdf_doc_char(byte: u8) -> char {
    match byte {
        0x18 => '\u{02D8}',
        0x19 => '\u{02C7}',
        0x1A => '\u{02C6}',
        0x1B => '\u{02D9}',
        0x1C => '\u{02DD}',
        0x1D => '\u{02DB}',
        0x1E => '\u{02DA}',
        0x1F => '\u{02DC}',
        0x80 => '\u{2022}',
        0x81 => '\u{2020}',
        0x82 => '\u{2021}',
        0x83 => '\u{2026}',
        0x84 => '\u{2014}',
        0x85 => '\u{2013}',
        0x86 => '\u{0192}',
        0x87 => '\u{2044}',
        0x88 => '\u{2039}',
        0x89 => '\u{203A}',
        0x8A => '\u{2212}',
        0x8B => '\u{2030}',
        0x8C => '\u{201E}',
        0x8D => '\u{201C}',
        0x8E => '\u{201D}',
        0x8F => '\u{2018}',
        0x90 => '\u{2019}',
        0x91 => '\u{201A}',
        0x92 => '\u{2122}',
        0x93 => '\u{FB01}',
        0x94 => '\u{FB02}',
        0x95 => '\u{0141}',
        0x96 => '\u{0152}',
        0x97 => '\u{0160}',
        0x98 => '\u{0178}',
        0x99 => '\u{017D}',
        0x9A => '\u{0131}',
        0x9B => '\u{0142}',
        0x9C => '\u{0153}',
        0x9D => '\u{0161}',
        0x9E => '\u{017E}',
        0xA0 => '\u{20AC}',
        0x7F | 0x9F | 0xAD => char::REPLACEMENT_CHARACTER,
        other => other as char,
    }
}

fn decode_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn encode_text(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn corrupt(name: &str, reason: impl ToString) -> FieldError {
    FieldError::Corrupt {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn unexpected_value(name: &str, value: &Object) -> FieldError {
    let found = match value {
        Object::Null => "null",
        Object::Boolean(_) => "boolean",
        Object::Integer(_) => "integer",
        Object::Real(_) => "real number",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "reference",
    };
    corrupt(name, format!("unexpected {found} in /V"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::FormBuilder;
    use pretty_assertions::assert_eq;

    fn sample() -> AcroForm {
        let bytes = FormBuilder::new()
            .text("FamilyName", "Doe")
            .checkbox("Married", true)
            .dropdown("Country", &["AR", "US"], Some("US"))
            .radio("Gender", &["M", "F"], Some("F"))
            .signature("Signature")
            .build();
        AcroForm::load(&bytes).unwrap()
    }

    #[test]
    fn test_enumerates_fields_in_order() {
        let form = sample();
        let names: Vec<(String, FieldKind)> =
            form.fields().into_iter().map(|f| (f.name, f.kind)).collect();
        assert_eq!(
            names,
            vec![
                ("FamilyName".to_string(), FieldKind::Text),
                ("Married".to_string(), FieldKind::CheckBox),
                ("Country".to_string(), FieldKind::Dropdown),
                ("Gender".to_string(), FieldKind::RadioGroup),
                ("Signature".to_string(), FieldKind::Signature),
            ]
        );
    }

    #[test]
    fn test_reads_values() {
        let form = sample();
        assert_eq!(form.text("FamilyName").unwrap(), "Doe");
        assert!(form.is_checked("Married").unwrap());
        assert_eq!(form.selected_option("Country").unwrap(), Some("US".to_string()));
        assert_eq!(form.selected_radio("Gender").unwrap(), Some("F".to_string()));
    }

    #[test]
    fn test_hierarchical_names() {
        let bytes = FormBuilder::new().nested_text("Applicant", "Name", "Ann").build();
        let form = AcroForm::load(&bytes).unwrap();
        assert_eq!(form.fields()[0].name, "Applicant.Name");
        assert_eq!(form.text("Applicant.Name").unwrap(), "Ann");
    }

    #[test]
    fn test_document_without_form_has_no_fields() {
        let form = AcroForm::load(&FormBuilder::new().build_without_form()).unwrap();
        assert!(form.fields().is_empty());
    }

    #[test]
    fn test_invalid_bytes_fail_to_load() {
        assert!(matches!(AcroForm::load(b"not a pdf"), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_kind_mismatch_and_missing_field() {
        let mut form = sample();
        assert!(matches!(
            form.set_text("Married", "x"),
            Err(FieldError::KindMismatch { .. })
        ));
        assert_eq!(
            form.set_text("Nope", "x"),
            Err(FieldError::NotFound("Nope".to_string()))
        );
    }

    #[test]
    fn test_writes_survive_save_and_reload() {
        let mut form = sample();
        form.set_text("FamilyName", "Müller").unwrap();
        form.set_checked("Married", false).unwrap();
        form.select_option("Country", "AR").unwrap();
        form.select_radio("Gender", "M").unwrap();

        let reloaded = AcroForm::load(&form.save().unwrap()).unwrap();
        assert_eq!(reloaded.text("FamilyName").unwrap(), "Müller");
        assert!(!reloaded.is_checked("Married").unwrap());
        assert_eq!(reloaded.selected_option("Country").unwrap(), Some("AR".to_string()));
        assert_eq!(reloaded.selected_radio("Gender").unwrap(), Some("M".to_string()));
    }

    #[test]
    fn test_rejects_unknown_options() {
        let mut form = sample();
        assert!(matches!(
            form.select_option("Country", "Bogus"),
            Err(FieldError::InvalidOption { .. })
        ));
        assert!(matches!(
            form.select_radio("Gender", "X"),
            Err(FieldError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let bytes = FormBuilder::new().corrupt_text("Broken").build();
        let form = AcroForm::load(&bytes).unwrap();
        assert!(matches!(form.text("Broken"), Err(FieldError::Corrupt { .. })));
    }

    #[test]
    fn test_encrypted_form_reads_plain_names_and_values() {
        let bytes = FormBuilder::new()
            .text("FamilyName", "Doe")
            .checkbox("Married", true)
            .dropdown("Country", &["AR", "US"], Some("US"))
            .radio("Gender", &["M", "F"], Some("F"))
            .nested_text("Applicant", "Name", "Ann")
            .build_encrypted("owner-secret");

        let form = AcroForm::load(&bytes).unwrap();
        let names: Vec<String> = form.fields().into_iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec!["FamilyName", "Married", "Country", "Gender", "Applicant.Name"]
        );
        assert_eq!(form.text("FamilyName").unwrap(), "Doe");
        assert!(form.is_checked("Married").unwrap());
        assert_eq!(form.selected_option("Country").unwrap(), Some("US".to_string()));
        assert_eq!(form.selected_radio("Gender").unwrap(), Some("F".to_string()));
        assert_eq!(form.text("Applicant.Name").unwrap(), "Ann");
    }

    #[test]
    fn test_encrypted_form_saves_readable_values() {
        let bytes = FormBuilder::new()
            .text("FamilyName", "Doe")
            .dropdown("Country", &["AR", "US"], None)
            .build_encrypted("owner-secret");

        let mut form = AcroForm::load(&bytes).unwrap();
        form.set_text("FamilyName", "Roe").unwrap();
        form.select_option("Country", "AR").unwrap();

        let reloaded = AcroForm::load(&form.save().unwrap()).unwrap();
        assert_eq!(reloaded.text("FamilyName").unwrap(), "Roe");
        assert_eq!(reloaded.selected_option("Country").unwrap(), Some("AR".to_string()));
    }

    #[test]
    fn test_pdf_doc_encoded_value() {
        let bytes = FormBuilder::new()
            .raw_text("Name", &[b'O', 0x90, b'B', 0x84])
            .build();
        let mut form = AcroForm::load(&bytes).unwrap();
        let value = form.text("Name").unwrap();
        assert_eq!(value, "O\u{2019}B\u{2014}");

        form.set_text("Name", &value).unwrap();
        let reloaded = AcroForm::load(&form.save().unwrap()).unwrap();
        assert_eq!(reloaded.text("Name").unwrap(), "O\u{2019}B\u{2014}");
    }

    #[test]
    fn test_pdf_doc_encoding_table() {
        assert_eq!(decode_text(&[0x80, 0x8D, 0x8E, 0xA0]), "\u{2022}\u{201C}\u{201D}\u{20AC}");
        assert_eq!(decode_text(&[0x18, 0x1F]), "\u{02D8}\u{02DC}");
        assert_eq!(decode_text(&[0xE9, 0xF1]), "éñ");
        assert_eq!(decode_text(&[0x9F]), "\u{FFFD}");
    }

    #[test]
    fn test_text_encoding() {
        assert_eq!(decode_text(b"plain"), "plain");
        match encode_text("Peña") {
            Object::String(bytes, _) => assert_eq!(decode_text(&bytes), "Peña"),
            other => panic!("unexpected object {:?}", other),
        }
    }
}
