//! Small form-bearing PDFs built in memory for tests.

use lopdf::{
    Dictionary, Document, EncryptionState, EncryptionVersion, Object, ObjectId, Permissions,
    Stream, StringFormat, dictionary,
};

use super::flags;

/// Builds a one-page PDF with an AcroForm holding the requested fields.
pub(crate) struct FormBuilder {
    document: Document,
    fields: Vec<Object>,
    annots: Vec<Object>,
}

impl FormBuilder {
    pub(crate) fn new() -> Self {
        Self {
            document: Document::with_version("1.5"),
            fields: Vec::new(),
            annots: Vec::new(),
        }
    }

    pub(crate) fn text(mut self, name: &str, value: &str) -> Self {
        let mut field = dictionary! { "FT" => "Tx", "T" => Object::string_literal(name) };
        if !value.is_empty() {
            field.set("V", Object::string_literal(value));
        }
        self.push_widget_field(field);
        self
    }

    /// A text field whose `/V` holds `bytes` as stored, without re-encoding.
    pub(crate) fn raw_text(mut self, name: &str, bytes: &[u8]) -> Self {
        let field = dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "V" => Object::String(bytes.to_vec(), StringFormat::Literal),
        };
        self.push_widget_field(field);
        self
    }

    pub(crate) fn rich_text(mut self, name: &str) -> Self {
        let field = dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "Ff" => flags::RICH_TEXT as i64,
        };
        self.push_widget_field(field);
        self
    }

    pub(crate) fn corrupt_text(mut self, name: &str) -> Self {
        let field = dictionary! { "FT" => "Tx", "T" => Object::string_literal(name), "V" => 42 };
        self.push_widget_field(field);
        self
    }

    pub(crate) fn checkbox(mut self, name: &str, checked: bool) -> Self {
        let state = if checked { "Yes" } else { "Off" };
        let appearance = self.appearance("Yes");
        let field = dictionary! {
            "FT" => "Btn",
            "T" => Object::string_literal(name),
            "V" => state,
            "AS" => state,
            "AP" => appearance,
        };
        self.push_widget_field(field);
        self
    }

    pub(crate) fn dropdown(mut self, name: &str, options: &[&str], selected: Option<&str>) -> Self {
        let opt: Vec<Object> = options.iter().map(|o| Object::string_literal(*o)).collect();
        let mut field = dictionary! {
            "FT" => "Ch",
            "T" => Object::string_literal(name),
            "Ff" => flags::COMBO as i64,
            "Opt" => opt,
        };
        if let Some(selected) = selected {
            field.set("V", Object::string_literal(selected));
        }
        self.push_widget_field(field);
        self
    }

    pub(crate) fn radio(mut self, name: &str, options: &[&str], selected: Option<&str>) -> Self {
        let parent_id = self.document.new_object_id();
        let mut kids = Vec::with_capacity(options.len());
        for option in options {
            let appearance = self.appearance(option);
            let state = if selected == Some(*option) { *option } else { "Off" };
            let widget = self.document.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "Parent" => parent_id,
                "Rect" => rect(),
                "AS" => state,
                "AP" => appearance,
            });
            kids.push(Object::Reference(widget));
            self.annots.push(Object::Reference(widget));
        }
        let parent = dictionary! {
            "FT" => "Btn",
            "T" => Object::string_literal(name),
            "Ff" => flags::RADIO as i64,
            "V" => selected.unwrap_or("Off"),
            "Kids" => kids,
        };
        self.document.objects.insert(parent_id, Object::Dictionary(parent));
        self.fields.push(Object::Reference(parent_id));
        self
    }

    pub(crate) fn signature(mut self, name: &str) -> Self {
        let field = dictionary! { "FT" => "Sig", "T" => Object::string_literal(name) };
        self.push_widget_field(field);
        self
    }

    pub(crate) fn push_button(mut self, name: &str) -> Self {
        let field = dictionary! {
            "FT" => "Btn",
            "T" => Object::string_literal(name),
            "Ff" => flags::PUSH_BUTTON as i64,
        };
        self.push_widget_field(field);
        self
    }

    /// A parent field `parent` with one text child `child`.
    pub(crate) fn nested_text(mut self, parent: &str, child: &str, value: &str) -> Self {
        let parent_id = self.document.new_object_id();
        let child_id = self.document.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::string_literal(child),
            "V" => Object::string_literal(value),
            "Parent" => parent_id,
            "Rect" => rect(),
        });
        self.annots.push(Object::Reference(child_id));
        let parent = dictionary! {
            "T" => Object::string_literal(parent),
            "Kids" => vec![Object::Reference(child_id)],
        };
        self.document.objects.insert(parent_id, Object::Dictionary(parent));
        self.fields.push(Object::Reference(parent_id));
        self
    }

    pub(crate) fn build(mut self) -> Vec<u8> {
        self.assemble(true);
        save(self.document)
    }

    pub(crate) fn build_without_form(mut self) -> Vec<u8> {
        self.assemble(false);
        save(self.document)
    }

    /// Encrypt with an owner password and an empty user password.
    pub(crate) fn build_encrypted(mut self, owner_password: &str) -> Vec<u8> {
        self.assemble(true);
        let id = Object::String(b"formshift-fixture".to_vec(), StringFormat::Hexadecimal);
        self.document.trailer.set("ID", vec![id.clone(), id]);

        let state = EncryptionState::try_from(EncryptionVersion::V2 {
            document: &self.document,
            owner_password,
            user_password: "",
            key_length: 128,
            permissions: Permissions::PRINTABLE | Permissions::FILLABLE,
        })
        .expect("fixture encryption parameters are valid");
        self.document
            .encrypt(&state)
            .expect("fixture document encrypts");
        save(self.document)
    }

    fn assemble(&mut self, with_form: bool) {
        let pages_id = self.document.new_object_id();
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => self.annots.clone(),
        });
        self.document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );

        let mut catalog = dictionary! { "Type" => "Catalog", "Pages" => pages_id };
        if with_form {
            let form_id = self.document.add_object(dictionary! { "Fields" => self.fields.clone() });
            catalog.set("AcroForm", form_id);
        }
        let catalog_id = self.document.add_object(catalog);
        self.document.trailer.set("Root", catalog_id);
    }

    fn push_widget_field(&mut self, mut field: Dictionary) -> ObjectId {
        field.set("Type", "Annot");
        field.set("Subtype", "Widget");
        field.set("Rect", rect());
        let id = self.document.add_object(field);
        self.fields.push(Object::Reference(id));
        self.annots.push(Object::Reference(id));
        id
    }

    fn appearance(&mut self, on_state: &str) -> Dictionary {
        let on = self.document.add_object(Stream::new(dictionary! {}, Vec::new()));
        let off = self.document.add_object(Stream::new(dictionary! {}, Vec::new()));
        dictionary! { "N" => dictionary! { on_state => on, "Off" => off } }
    }
}

fn save(mut document: Document) -> Vec<u8> {
    let mut buffer = Vec::new();
    document
        .save_to(&mut buffer)
        .expect("fixture document serializes");
    buffer
}

fn rect() -> Vec<Object> {
    vec![0.into(), 0.into(), 100.into(), 20.into()]
}
