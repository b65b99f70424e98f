use formular_forms::{fill_pdf_form, FillError, FillOptions};
use lopdf::{dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;

/// Build a one-page document with a text field "Firma", a checkbox
/// "givve StandardCard" (on-state "Yes") and a dropdown "Land".
fn order_form_template() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();

    let text_field = doc.add_object(dictionary! {
        "FT" => "Tx",
        "T" => Object::string_literal("Firma"),
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => vec![50.into(), 700.into(), 300.into(), 720.into()],
    });
    let checkbox = doc.add_object(dictionary! {
        "FT" => "Btn",
        "T" => Object::string_literal("givve StandardCard"),
        "V" => Object::Name(b"Off".to_vec()),
        "AS" => Object::Name(b"Off".to_vec()),
        "AP" => dictionary! {
            "N" => dictionary! {
                "Yes" => dictionary! {},
                "Off" => dictionary! {},
            },
        },
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => vec![50.into(), 660.into(), 70.into(), 680.into()],
    });
    let dropdown = doc.add_object(dictionary! {
        "FT" => "Ch",
        "T" => Object::string_literal("Land"),
        "Opt" => vec![
            Object::string_literal("Deutschland"),
            Object::string_literal("Österreich"),
        ],
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => vec![50.into(), 620.into(), 200.into(), 640.into()],
    });

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Annots" => vec![
            Object::Reference(text_field),
            Object::Reference(checkbox),
            Object::Reference(dropdown),
        ],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1i64,
        }),
    );

    let acro_form = doc.add_object(dictionary! {
        "Fields" => vec![
            Object::Reference(text_field),
            Object::Reference(checkbox),
            Object::Reference(dropdown),
        ],
    });
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => Object::Reference(acro_form),
    });
    doc.trailer.set("Root", catalog);

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

fn field_dict(doc: &Document, name: &str) -> lopdf::Dictionary {
    for (_, object) in doc.objects.iter() {
        if let Ok(dict) = object.as_dict() {
            if let Ok(Object::String(bytes, _)) = dict.get(b"T") {
                if bytes == name.as_bytes() {
                    return dict.clone();
                }
            }
        }
    }
    panic!("field {name:?} not found");
}

fn name_of(dict: &lopdf::Dictionary, key: &[u8]) -> String {
    match dict.get(key).unwrap() {
        Object::Name(name) => String::from_utf8_lossy(name).into_owned(),
        other => panic!("expected name, got {other:?}"),
    }
}

#[test]
fn test_fills_text_and_checkbox_and_ignores_unknown_keys() {
    let template = order_form_template();
    let mut values = BTreeMap::new();
    values.insert("Firma".to_string(), "Acme GmbH".to_string());
    values.insert("givve StandardCard".to_string(), "Yes".to_string());
    values.insert("Unrelated".to_string(), "ignored".to_string());

    let filled = fill_pdf_form(&template, &values, &FillOptions::default()).unwrap();
    let doc = Document::load_mem(&filled).unwrap();

    let firma = field_dict(&doc, "Firma");
    match firma.get(b"V").unwrap() {
        Object::String(bytes, _) => assert_eq!(bytes, b"Acme GmbH"),
        other => panic!("expected string value, got {other:?}"),
    }

    let card = field_dict(&doc, "givve StandardCard");
    assert_eq!(name_of(&card, b"V"), "Yes");
    assert_eq!(name_of(&card, b"AS"), "Yes");
}

#[test]
fn test_falsy_value_unchecks_checkbox() {
    let template = order_form_template();
    let mut values = BTreeMap::new();
    values.insert("givve StandardCard".to_string(), "Off".to_string());

    let filled = fill_pdf_form(&template, &values, &FillOptions::default()).unwrap();
    let doc = Document::load_mem(&filled).unwrap();

    let card = field_dict(&doc, "givve StandardCard");
    assert_eq!(name_of(&card, b"V"), "Off");
    assert_eq!(name_of(&card, b"AS"), "Off");
}

#[test]
fn test_dropdown_value_is_written_as_string() {
    let template = order_form_template();
    let mut values = BTreeMap::new();
    values.insert("Land".to_string(), "Deutschland".to_string());

    let filled = fill_pdf_form(&template, &values, &FillOptions::default()).unwrap();
    let doc = Document::load_mem(&filled).unwrap();

    let land = field_dict(&doc, "Land");
    match land.get(b"V").unwrap() {
        Object::String(bytes, _) => assert_eq!(bytes, b"Deutschland"),
        other => panic!("expected string value, got {other:?}"),
    }
}

#[test]
fn test_strict_mode_rejects_unknown_keys() {
    let template = order_form_template();
    let mut values = BTreeMap::new();
    values.insert("Firma".to_string(), "Acme GmbH".to_string());
    values.insert("Unrelated".to_string(), "x".to_string());

    let err = fill_pdf_form(&template, &values, &FillOptions::strict()).unwrap_err();
    match err {
        FillError::UnknownFields(keys) => assert_eq!(keys, vec!["Unrelated".to_string()]),
        other => panic!("expected UnknownFields, got {other:?}"),
    }
}

#[test]
fn test_need_appearances_is_set() {
    let template = order_form_template();
    let filled = fill_pdf_form(&template, &BTreeMap::new(), &FillOptions::default()).unwrap();
    let doc = Document::load_mem(&filled).unwrap();

    let root: ObjectId = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    let catalog = doc.get_object(root).unwrap().as_dict().unwrap();
    let acro_id = catalog.get(b"AcroForm").unwrap().as_reference().unwrap();
    let acro = doc.get_object(acro_id).unwrap().as_dict().unwrap();
    assert!(matches!(
        acro.get(b"NeedAppearances").unwrap(),
        Object::Boolean(true)
    ));
}

#[test]
fn test_template_without_acroform_is_rejected() {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1i64,
        }),
    );
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();

    let err = fill_pdf_form(&bytes, &BTreeMap::new(), &FillOptions::default()).unwrap_err();
    assert!(matches!(err, FillError::NoAcroForm));
}
