use crate::detector::{classify_markers, MarkerKind};
use crate::extractor::{DataShape, Field};
use crate::parser::{FieldDecl, ParsedFile};
use crate::type_parser::{parse_type, ParseMode};
use log::debug;
use std::collections::BTreeMap;

/// Extracts payload metadata from a data-shape source file.
///
/// Every class declared in the file yields a [`DataShape`]. Field types run
/// through normalization, so container types collapse to the canonical
/// `List<T>` / `Map<String, Object>` / `Optional<T>` forms.
pub struct DtoExtractor;

impl DtoExtractor {
    /// Extracts one data shape per class declared in the file.
    pub fn extract(file: &ParsedFile) -> Vec<DataShape> {
        file.classes
            .iter()
            .map(|class| {
                debug!("Extracting fields from data shape {}", class.name);
                DataShape {
                    class_name: class.name.clone(),
                    fields: class.fields.iter().filter_map(Self::extract_field).collect(),
                    existing_annotations: BTreeMap::new(),
                    file_path: file.path.to_string_lossy().to_string(),
                }
            })
            .collect()
    }

    /// Extracts one field descriptor.
    ///
    /// Only the first declared variable of a multi-variable statement is
    /// consulted; the remaining names are dropped.
    fn extract_field(field: &FieldDecl) -> Option<Field> {
        let name = field.names.first()?.clone();
        let markers = classify_markers(&field.annotations);

        let validation_annotations = markers
            .iter()
            .filter(|m| m.kind.is_field_validation())
            .map(|m| m.annotation.name.clone())
            .collect();

        let required = markers.iter().any(|m| m.kind.implies_required_field());

        Some(Field {
            name,
            ty: parse_type(&field.ty, ParseMode::FieldNormalization).base_type,
            validation_annotations,
            description: Self::field_description(field),
            required,
        })
    }

    /// Resolves a field description: the schema marker's `description`
    /// attribute wins, then the legacy marker's `value`, then the first
    /// non-empty line of an attached doc comment.
    fn field_description(field: &FieldDecl) -> String {
        let markers = classify_markers(&field.annotations);

        let schema_description = markers
            .iter()
            .find(|m| m.kind == MarkerKind::SchemaDoc)
            .and_then(|m| m.annotation.attr("description"))
            .filter(|text| !text.is_empty());
        if let Some(text) = schema_description {
            return text.to_string();
        }

        let legacy_description = markers
            .iter()
            .find(|m| m.kind == MarkerKind::LegacyDoc)
            .and_then(|m| m.annotation.attr("value"))
            .filter(|text| !text.is_empty());
        if let Some(text) = legacy_description {
            return text.to_string();
        }

        field
            .doc_comment
            .as_deref()
            .map(first_doc_line)
            .unwrap_or_default()
    }
}

/// The first non-empty line of a `/** ... */` comment, with the comment
/// markers and leading asterisks stripped.
fn first_doc_line(comment: &str) -> String {
    comment
        .trim_start_matches("/**")
        .trim_end_matches("*/")
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}
