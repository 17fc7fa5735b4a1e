//! Extraction of endpoint and payload metadata from classified declarations.
//!
//! Two extractors operate on the declaration facts produced by the parser:
//!
//! - [`controller::ControllerExtractor`] turns a routable class into a
//!   [`RouteGroup`] with one [`Handler`] per mapped method
//! - [`dto::DtoExtractor`] turns a data-shape file into [`DataShape`] entries
//!   with normalized [`Field`] descriptors
//!
//! Both return plain values; accumulation and deduplication are owned by the
//! document builder.

pub mod controller;
pub mod dto;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One routable class and its endpoint-serving methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteGroup {
    /// Declared class name
    pub class_name: String,
    /// Declaring package, empty when the file has no package declaration
    pub package_name: String,
    /// Shared path prefix from the class-level mapping marker, empty if absent
    pub request_mapping: String,
    /// Handlers in declaration order
    pub methods: Vec<Handler>,
    /// Forward-compatibility slot; serialized but never populated by extraction
    #[serde(default)]
    pub existing_annotations: BTreeMap<String, Value>,
}

/// One endpoint-serving method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handler {
    pub method_name: String,
    /// Derived HTTP verb, e.g. `GET`
    pub http_method: String,
    /// Path segment from the verb-bearing marker, empty if absent
    pub path: String,
    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,
    /// Return type expression, raw and unresolved
    pub return_type: String,
    /// Declared failure types, verbatim
    pub exceptions: Vec<String>,
    /// Forward-compatibility slot; serialized but never populated by extraction
    #[serde(default)]
    pub existing_annotations: BTreeMap<String, Value>,
    /// 1-based source line of the method declaration
    pub line_number: usize,
}

/// Where a handler parameter's value is bound from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Body,
    Path,
    Header,
    Query,
}

/// One handler parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    /// Raw type expression
    #[serde(rename = "type")]
    pub ty: String,
    /// Binding location
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// True only when a body- or path-binding marker is present
    pub required: bool,
    /// Recognized validation marker names, in declaration order
    pub validation_annotations: Vec<String>,
}

/// One request/response payload class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataShape {
    /// Class name; the deduplication key, case-sensitive and namespace-blind
    pub class_name: String,
    /// Fields in declaration order; empty for synthesized placeholders
    pub fields: Vec<Field>,
    /// Forward-compatibility slot; serialized but never populated by extraction
    #[serde(default)]
    pub existing_annotations: BTreeMap<String, Value>,
    /// Defining file, best-effort; may be an estimated path that does not exist
    pub file_path: String,
}

/// One payload field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    /// Normalized type name
    #[serde(rename = "type")]
    pub ty: String,
    /// Recognized validation marker names, in declaration order
    pub validation_annotations: Vec<String>,
    /// Free-text description, empty when no source provides one
    pub description: String,
    /// True only when a non-null-like or explicit required marker is present
    pub required: bool,
}

impl DataShape {
    /// A placeholder for a payload type referenced from a handler signature
    /// but not extracted from its own file.
    pub fn placeholder(class_name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: Vec::new(),
            existing_annotations: BTreeMap::new(),
            file_path: file_path.into(),
        }
    }
}
