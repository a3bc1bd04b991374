//! Form PDFs for CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Document, Object, Stream, dictionary};

/// A form field to put into a test document.
pub enum Field<'a> {
    Text(&'a str, &'a str),
    CheckBox(&'a str, bool),
}

/// Write a one-page PDF with the given form fields to `dir/name`.
pub fn write_form(dir: &Path, name: &str, fields: &[Field<'_>]) -> PathBuf {
    let mut document = Document::with_version("1.5");
    let mut refs = Vec::new();

    for field in fields {
        let dict = match field {
            Field::Text(name, value) => dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => "Tx",
                "T" => Object::string_literal(*name),
                "V" => Object::string_literal(*value),
                "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
            },
            Field::CheckBox(name, checked) => {
                let on = document.add_object(Stream::new(dictionary! {}, Vec::new()));
                let off = document.add_object(Stream::new(dictionary! {}, Vec::new()));
                let state = if *checked { "Yes" } else { "Off" };
                dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Widget",
                    "FT" => "Btn",
                    "T" => Object::string_literal(*name),
                    "V" => state,
                    "AS" => state,
                    "AP" => dictionary! { "N" => dictionary! { "Yes" => on, "Off" => off } },
                    "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
                }
            }
        };
        refs.push(Object::Reference(document.add_object(dict)));
    }

    let pages_id = document.new_object_id();
    let page_id = document.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Annots" => refs.clone(),
    });
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let form_id = document.add_object(dictionary! { "Fields" => refs });
    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => form_id,
    });
    document.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    let mut buffer = Vec::new();
    document.save_to(&mut buffer).unwrap();
    fs::write(&path, buffer).unwrap();
    path
}
