//! AcroForm filling with `lopdf`.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

use super::{DocumentFiller, FillReport};
use crate::error::FillError;
use crate::export::FieldTable;

/// Guards against reference cycles in malformed field trees.
const MAX_FIELD_DEPTH: usize = 32;

/// Fills the text fields of a PDF form template.
///
/// Field names are fully qualified (`parent.child`) the way form editors show
/// them. The filled document asks viewers to regenerate field appearances, so
/// the template's own appearance streams do not need to be rewritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfFormFiller;

impl PdfFormFiller {
    pub fn new() -> Self {
        Self
    }

    /// Names of the form fields in a template, sorted.
    pub fn field_names(&self, template: &Path) -> Result<Vec<String>, FillError> {
        let doc = load(template)?;
        Ok(form_fields(&doc).into_keys().collect())
    }

    /// Current values of the form fields in a document, keyed by field name.
    /// Fields without a value are omitted.
    pub fn read_values(&self, document: &Path) -> Result<BTreeMap<String, String>, FillError> {
        let doc = load(document)?;
        let mut values = BTreeMap::new();
        for (name, id) in form_fields(&doc) {
            if let Ok(Object::Dictionary(dict)) = doc.get_object(id) {
                if let Ok(Object::String(bytes, _)) = dict.get(b"V") {
                    values.insert(name, decode_text(bytes));
                }
            }
        }
        Ok(values)
    }
}

impl DocumentFiller for PdfFormFiller {
    fn fill(
        &self,
        template: &Path,
        fields: &FieldTable,
        destination: &Path,
    ) -> Result<FillReport, FillError> {
        let mut doc = load(template)?;

        let targets = form_fields(&doc);
        if targets.is_empty() {
            return Err(FillError::NoFormFields(template.to_path_buf()));
        }

        let mut report = FillReport::default();
        for entry in fields {
            match targets.get(&entry.name) {
                Some(id) => {
                    set_value(&mut doc, *id, &entry.value)?;
                    report.filled.push(entry.name.clone());
                }
                None => report.skipped.push(entry.name.clone()),
            }
        }
        request_appearance_regeneration(&mut doc)?;

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| classify(destination, "failed to serialize document", lopdf::Error::IO(e)))?;
        std::fs::write(destination, &bytes).map_err(|source| FillError::Io {
            path: destination.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            filled = report.filled.len(),
            skipped = report.skipped.len(),
            bytes = bytes.len(),
            "PDF form filled"
        );
        Ok(report)
    }
}

fn load(path: &Path) -> Result<Document, FillError> {
    Document::load(path).map_err(|e| classify(path, &path.display().to_string(), e))
}

/// I/O failures stay retryable; anything else means a malformed document.
fn classify(path: &Path, context: &str, error: lopdf::Error) -> FillError {
    match error {
        lopdf::Error::IO(source) => FillError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => FillError::Document(format!("{}: {}", context, other)),
    }
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}

fn catalog_id(doc: &Document) -> Option<ObjectId> {
    match doc.trailer.get(b"Root") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    }
}

fn acro_form(doc: &Document) -> Option<&Dictionary> {
    let catalog = match doc.get_object(catalog_id(doc)?) {
        Ok(Object::Dictionary(dict)) => dict,
        _ => return None,
    };
    match resolve(doc, catalog.get(b"AcroForm").ok()?) {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Map of fully qualified field name to the object holding its value.
fn form_fields(doc: &Document) -> BTreeMap<String, ObjectId> {
    let mut fields = BTreeMap::new();
    if let Some(form) = acro_form(doc) {
        if let Ok(roots) = form.get(b"Fields") {
            if let Object::Array(roots) = resolve(doc, roots) {
                collect_fields(doc, roots, None, 0, &mut fields);
            }
        }
    }
    fields
}

fn collect_fields(
    doc: &Document,
    nodes: &[Object],
    parent: Option<&str>,
    depth: usize,
    out: &mut BTreeMap<String, ObjectId>,
) {
    if depth > MAX_FIELD_DEPTH {
        return;
    }

    for node in nodes {
        let Object::Reference(id) = node else {
            continue;
        };
        let Ok(Object::Dictionary(dict)) = doc.get_object(*id) else {
            continue;
        };

        // Widgets merged into a field have no /T and inherit the parent's name
        let partial = match dict.get(b"T") {
            Ok(Object::String(bytes, _)) => Some(decode_text(bytes)),
            _ => None,
        };
        let full_name = match (parent, partial.as_deref()) {
            (Some(parent), Some(partial)) => Some(format!("{}.{}", parent, partial)),
            (None, Some(partial)) => Some(partial.to_string()),
            (parent, None) => parent.map(str::to_string),
        };

        if let (Some(name), Some(_)) = (&full_name, &partial) {
            out.insert(name.clone(), *id);
        }

        if let Ok(kids) = dict.get(b"Kids") {
            if let Object::Array(kids) = resolve(doc, kids) {
                collect_fields(doc, kids, full_name.as_deref(), depth + 1, out);
            }
        }
    }
}

fn set_value(doc: &mut Document, id: ObjectId, value: &str) -> Result<(), FillError> {
    match doc.get_object_mut(id) {
        Ok(Object::Dictionary(dict)) => {
            dict.set("V", encode_text(value));
            Ok(())
        }
        _ => Err(FillError::Document(format!(
            "form field {} {} is not a dictionary",
            id.0, id.1
        ))),
    }
}

fn request_appearance_regeneration(doc: &mut Document) -> Result<(), FillError> {
    let root = catalog_id(doc)
        .ok_or_else(|| FillError::Document("document has no catalog".to_string()))?;

    let form_ref = match doc.get_object(root) {
        Ok(Object::Dictionary(catalog)) => match catalog.get(b"AcroForm") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        },
        _ => None,
    };

    let form = match form_ref {
        Some(id) => match doc.get_object_mut(id) {
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        },
        None => match doc.get_object_mut(root) {
            Ok(Object::Dictionary(catalog)) => match catalog.get_mut(b"AcroForm") {
                Ok(Object::Dictionary(dict)) => Some(dict),
                _ => None,
            },
            _ => None,
        },
    };

    if let Some(form) = form {
        form.set("NeedAppearances", true);
    }
    Ok(())
}

/// PDF text strings are PDFDocEncoding unless they carry a UTF-16BE BOM.
fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn encode_text(value: &str) -> Object {
    if value.is_ascii() {
        Object::String(value.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in value.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_encoding_round_trips() {
        for value in ["Serves 4", "Crème brûlée", ""] {
            match encode_text(value) {
                Object::String(bytes, _) => assert_eq!(decode_text(&bytes), value),
                other => panic!("unexpected object: {other:?}"),
            }
        }
    }

    #[test]
    fn latin1_bytes_decode_per_byte() {
        assert_eq!(decode_text(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    }
}
