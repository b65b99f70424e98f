//! PDF form filler.
//!
//! Loads an AcroForm template, enumerates its interactive fields with their
//! control type, writes the supplied values using the operation appropriate
//! to each type (text set, check/uncheck, radio select, dropdown select) and
//! serializes the result.
//!
//! Keys absent from the template are silently ignored by default. That
//! tolerates template drift, but it also means a field-name typo in a mapper
//! is a silent no-op rather than a failure, so mapping tests assert
//! field-by-field. [`FillOptions::strict`] turns unknown mapped keys into an
//! error for compliance-sensitive callers.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;

/// Values that check a button field: {"yes", "true", "1"}, case-insensitive.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}

#[derive(Debug, thiserror::Error)]
pub enum FillError {
    #[error("failed to parse PDF template: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to serialize filled PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("template has no AcroForm dictionary")]
    NoAcroForm,

    #[error("mapped fields not present in template: {0:?}")]
    UnknownFields(Vec<String>),
}

/// Fill behavior options.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillOptions {
    /// Fail when a mapped key does not exist in the template instead of
    /// silently skipping it.
    pub strict: bool,
}

impl FillOptions {
    pub fn strict() -> Self {
        FillOptions { strict: true }
    }
}

/// Control type of an interactive form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Checkbox,
    Radio,
    Dropdown,
    Other,
}

/// Everything the apply phase needs about one terminal field, copied out of
/// the document so mutation can run without outstanding borrows.
#[derive(Debug)]
struct CollectedField {
    id: ObjectId,
    name: String,
    kind: FieldKind,
    /// The non-"Off" appearance state of a button field, from /AP /N.
    on_state: Option<String>,
    /// Widget kids with their available appearance states (radio groups).
    kids: Vec<(ObjectId, Vec<String>)>,
}

/// Fill an AcroForm template with the given field values and serialize it.
pub fn fill_pdf_form(
    template: &[u8],
    values: &BTreeMap<String, String>,
    options: &FillOptions,
) -> Result<Vec<u8>, FillError> {
    let mut doc = Document::load_mem(template)?;

    let fields = collect_fields(&doc)?;

    let mut missing = Vec::new();
    let mut filled = 0usize;
    for (key, value) in values {
        let Some(field) = lookup_field(&fields, key) else {
            missing.push(key.clone());
            continue;
        };
        apply_value(&mut doc, field, value)?;
        filled += 1;
    }

    if options.strict && !missing.is_empty() {
        return Err(FillError::UnknownFields(missing));
    }
    if !missing.is_empty() {
        tracing::debug!(
            skipped = missing.len(),
            "ignoring mapped keys absent from template"
        );
    }
    tracing::debug!(filled, total = values.len(), "filled form fields");

    set_need_appearances(&mut doc)?;

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

/// Follow a reference chain to the target object.
fn resolve<'a>(doc: &'a Document, mut obj: &'a Object) -> Result<&'a Object, lopdf::Error> {
    while let Object::Reference(id) = obj {
        obj = doc.get_object(*id)?;
    }
    Ok(obj)
}

fn pdf_string(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Locate the AcroForm dictionary. Returns its object id when it is an
/// indirect object, or `None` for a dictionary inlined into the catalog.
fn acro_form(doc: &Document) -> Result<(Option<ObjectId>, Dictionary), FillError> {
    let root_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(FillError::Pdf)?;
    let catalog = doc.get_object(root_id)?.as_dict()?;
    let entry = catalog.get(b"AcroForm").map_err(|_| FillError::NoAcroForm)?;
    match entry {
        Object::Reference(id) => Ok((Some(*id), doc.get_object(*id)?.as_dict()?.clone())),
        Object::Dictionary(dict) => Ok((None, dict.clone())),
        _ => Err(FillError::NoAcroForm),
    }
}

fn collect_fields(doc: &Document) -> Result<Vec<CollectedField>, FillError> {
    let (_, acro) = acro_form(doc)?;
    let fields = acro
        .get(b"Fields")
        .and_then(Object::as_array)
        .map_err(|_| FillError::NoAcroForm)?
        .clone();

    let mut out = Vec::new();
    for entry in &fields {
        walk_field(doc, entry, None, None, 0, &mut out)?;
    }
    Ok(out)
}

/// Recursively walk a field tree entry. `inherited_ft`/`inherited_ff` carry
/// /FT and /Ff down to kids that omit them.
fn walk_field(
    doc: &Document,
    entry: &Object,
    prefix: Option<&str>,
    inherited: Option<(Vec<u8>, i64)>,
    depth: usize,
    out: &mut Vec<CollectedField>,
) -> Result<(), FillError> {
    // Field trees are shallow in practice; cap the walk so a malformed
    // self-referencing tree cannot recurse forever.
    if depth > 8 {
        return Ok(());
    }
    let Ok(id) = entry.as_reference() else {
        return Ok(());
    };
    let dict = doc.get_object(id)?.as_dict()?;

    let partial = dict.get(b"T").ok().and_then(pdf_string);
    let name = match (prefix, partial.as_deref()) {
        (Some(p), Some(t)) => format!("{}.{}", p, t),
        (Some(p), None) => p.to_string(),
        (None, Some(t)) => t.to_string(),
        (None, None) => String::new(),
    };

    let ft = match dict.get(b"FT") {
        Ok(Object::Name(name)) => Some(name.clone()),
        _ => inherited.as_ref().map(|(ft, _)| ft.clone()),
    };
    let ff = dict
        .get(b"Ff")
        .and_then(Object::as_i64)
        .ok()
        .or_else(|| inherited.as_ref().map(|(_, ff)| *ff))
        .unwrap_or(0);

    let kid_refs: Vec<Object> = dict
        .get(b"Kids")
        .and_then(Object::as_array)
        .map(|a| a.to_vec())
        .unwrap_or_default();

    // Kids that carry their own /T are sub-fields; kids without /T are
    // widget annotations of this terminal field (e.g. radio buttons).
    let has_named_kids = kid_refs.iter().any(|k| {
        k.as_reference()
            .ok()
            .and_then(|kid_id| doc.get_object(kid_id).ok())
            .and_then(|o| o.as_dict().ok())
            .map(|d| d.has(b"T"))
            .unwrap_or(false)
    });

    if has_named_kids {
        let inherited = ft.map(|ft| (ft, ff));
        for kid in &kid_refs {
            walk_field(doc, kid, Some(&name), inherited.clone(), depth + 1, out)?;
        }
        return Ok(());
    }

    let kind = match ft.as_deref() {
        Some(b"Tx") => FieldKind::Text,
        Some(b"Ch") => FieldKind::Dropdown,
        Some(b"Btn") => {
            if ff & (1 << 16) != 0 {
                FieldKind::Other // pushbutton, nothing to fill
            } else if ff & (1 << 15) != 0 {
                FieldKind::Radio
            } else {
                FieldKind::Checkbox
            }
        }
        _ => FieldKind::Other,
    };

    let mut kids = Vec::new();
    for kid in &kid_refs {
        if let Ok(kid_id) = kid.as_reference() {
            kids.push((kid_id, appearance_states(doc, kid_id)));
        }
    }

    let on_state = appearance_states(doc, id)
        .into_iter()
        .find(|s| s != "Off")
        .or_else(|| {
            kids.iter()
                .flat_map(|(_, states)| states.iter())
                .find(|s| *s != "Off")
                .cloned()
        });

    out.push(CollectedField {
        id,
        name,
        kind,
        on_state,
        kids,
    });
    Ok(())
}

/// Names of the normal appearance states (/AP /N keys) of a widget.
fn appearance_states(doc: &Document, id: ObjectId) -> Vec<String> {
    let states = (|| -> Result<Vec<String>, lopdf::Error> {
        let dict = doc.get_object(id)?.as_dict()?;
        let ap = resolve(doc, dict.get(b"AP")?)?.as_dict()?;
        let n = resolve(doc, ap.get(b"N")?)?.as_dict()?;
        Ok(n.iter()
            .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
            .collect())
    })();
    states.unwrap_or_default()
}

/// Find a field by full dotted name, falling back to the terminal segment so
/// flat mapper names match fields nested under a group.
fn lookup_field<'a>(fields: &'a [CollectedField], key: &str) -> Option<&'a CollectedField> {
    fields.iter().find(|f| f.name == key).or_else(|| {
        fields
            .iter()
            .find(|f| f.name.rsplit('.').next() == Some(key))
    })
}

fn apply_value(
    doc: &mut Document,
    field: &CollectedField,
    value: &str,
) -> Result<(), FillError> {
    match field.kind {
        FieldKind::Text => {
            let dict = doc.get_object_mut(field.id)?.as_dict_mut()?;
            dict.set("V", Object::string_literal(value));
        }
        FieldKind::Checkbox => {
            let state = if is_truthy(value) {
                field.on_state.clone().unwrap_or_else(|| "Yes".to_string())
            } else {
                "Off".to_string()
            };
            let dict = doc.get_object_mut(field.id)?.as_dict_mut()?;
            dict.set("V", Object::Name(state.clone().into_bytes()));
            dict.set("AS", Object::Name(state.into_bytes()));
        }
        FieldKind::Radio => {
            let dict = doc.get_object_mut(field.id)?.as_dict_mut()?;
            dict.set("V", Object::Name(value.as_bytes().to_vec()));
            if field.kids.is_empty() {
                dict.set("AS", Object::Name(value.as_bytes().to_vec()));
            }
            for (kid_id, states) in &field.kids {
                let state = if states.iter().any(|s| s == value) {
                    value
                } else {
                    "Off"
                };
                let kid = doc.get_object_mut(*kid_id)?.as_dict_mut()?;
                kid.set("AS", Object::Name(state.as_bytes().to_vec()));
            }
        }
        FieldKind::Dropdown => {
            let dict = doc.get_object_mut(field.id)?.as_dict_mut()?;
            dict.set("V", Object::string_literal(value));
        }
        FieldKind::Other => {}
    }
    Ok(())
}

/// Ask viewers to regenerate field appearances from the new values.
fn set_need_appearances(doc: &mut Document) -> Result<(), FillError> {
    let (acro_id, mut acro) = acro_form(doc)?;
    match acro_id {
        Some(id) => {
            let dict = doc.get_object_mut(id)?.as_dict_mut()?;
            dict.set("NeedAppearances", Object::Boolean(true));
        }
        None => {
            acro.set("NeedAppearances", Object::Boolean(true));
            let root_id = doc
                .trailer
                .get(b"Root")
                .and_then(Object::as_reference)
                .map_err(FillError::Pdf)?;
            let catalog = doc.get_object_mut(root_id)?.as_dict_mut()?;
            catalog.set("AcroForm", Object::Dictionary(acro));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        for v in ["Yes", "yes", "TRUE", "1", " yes "] {
            assert!(is_truthy(v), "{v:?} should be truthy");
        }
        for v in ["Off", "no", "0", "", "ja"] {
            assert!(!is_truthy(v), "{v:?} should be falsy");
        }
    }

    #[test]
    fn test_lookup_falls_back_to_terminal_segment() {
        let fields = vec![
            CollectedField {
                id: (1, 0),
                name: "order.Firma".to_string(),
                kind: FieldKind::Text,
                on_state: None,
                kids: Vec::new(),
            },
            CollectedField {
                id: (2, 0),
                name: "Datum".to_string(),
                kind: FieldKind::Text,
                on_state: None,
                kids: Vec::new(),
            },
        ];
        assert_eq!(lookup_field(&fields, "order.Firma").unwrap().id, (1, 0));
        assert_eq!(lookup_field(&fields, "Firma").unwrap().id, (1, 0));
        assert_eq!(lookup_field(&fields, "Datum").unwrap().id, (2, 0));
        assert!(lookup_field(&fields, "Unrelated").is_none());
    }

    #[test]
    fn test_io_errors_convert() {
        let err = FillError::from(std::io::Error::other("disk full"));
        assert!(matches!(err, FillError::Io(_)));
    }
}
