use crate::extractor::{DataShape, RouteGroup};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The complete extraction output.
///
/// `controllers` keeps traversal order; `dataShapes` has set semantics, its
/// order carries no meaning. Built once at the end of a run and read-only
/// thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointsDocument {
    pub controllers: Vec<RouteGroup>,
    pub data_shapes: Vec<DataShape>,
    /// RFC 3339 timestamp of the extraction run
    pub extracted_at: String,
    pub total_methods: usize,
    pub total_data_shapes: usize,
}

/// Accumulator for a single extraction run.
///
/// The builder is the only owner of the shared collections; extractors and
/// the resolver hand it pure values. Data shapes deduplicate by class name
/// with first-insertion-wins semantics: once a name is present, later entries
/// for the same name are dropped, even when they carry richer field data.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    controllers: Vec<RouteGroup>,
    data_shapes: Vec<DataShape>,
    known_names: HashSet<String>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route group in traversal order.
    pub fn add_route_group(&mut self, group: RouteGroup) {
        debug!(
            "Adding route group {} with {} handlers",
            group.class_name,
            group.methods.len()
        );
        self.controllers.push(group);
    }

    /// Inserts a data shape unless its class name is already present.
    /// Returns whether the shape was kept.
    pub fn add_data_shape(&mut self, shape: DataShape) -> bool {
        if !self.known_names.insert(shape.class_name.clone()) {
            debug!("Dropping duplicate data shape {}", shape.class_name);
            return false;
        }
        self.data_shapes.push(shape);
        true
    }

    /// The class names currently present, for reference discovery.
    pub fn known_names(&self) -> &HashSet<String> {
        &self.known_names
    }

    /// Finalizes the document, deriving totals from the collection sizes.
    pub fn build(self) -> EndpointsDocument {
        let total_methods = self.controllers.iter().map(|c| c.methods.len()).sum();
        let total_data_shapes = self.data_shapes.len();

        EndpointsDocument {
            controllers: self.controllers,
            data_shapes: self.data_shapes,
            extracted_at: chrono::Utc::now().to_rfc3339(),
            total_methods,
            total_data_shapes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{Field, Handler};
    use std::collections::BTreeMap;

    fn handler(name: &str) -> Handler {
        Handler {
            method_name: name.to_string(),
            http_method: "GET".to_string(),
            path: format!("/{}", name),
            parameters: Vec::new(),
            return_type: "String".to_string(),
            exceptions: Vec::new(),
            existing_annotations: BTreeMap::new(),
            line_number: 1,
        }
    }

    fn group(class_name: &str, handlers: Vec<Handler>) -> RouteGroup {
        RouteGroup {
            class_name: class_name.to_string(),
            package_name: String::new(),
            request_mapping: String::new(),
            methods: handlers,
            existing_annotations: BTreeMap::new(),
        }
    }

    #[test]
    fn test_totals_derive_from_collections() {
        let mut builder = DocumentBuilder::new();
        builder.add_route_group(group("A", vec![handler("a"), handler("b")]));
        builder.add_route_group(group("B", vec![handler("c")]));
        builder.add_data_shape(DataShape::placeholder("UserDto", "UserDto.java"));

        let document = builder.build();
        assert_eq!(document.total_methods, 3);
        assert_eq!(document.total_data_shapes, 1);
        assert_eq!(document.controllers.len(), 2);
        assert!(!document.extracted_at.is_empty());
    }

    #[test]
    fn test_first_insertion_wins() {
        let mut builder = DocumentBuilder::new();

        let placeholder = DataShape::placeholder("UserDto", "estimated/UserDto.java");
        assert!(builder.add_data_shape(placeholder));

        // A richer entry arriving later for the same name is dropped.
        let richer = DataShape {
            class_name: "UserDto".to_string(),
            fields: vec![Field {
                name: "name".to_string(),
                ty: "String".to_string(),
                validation_annotations: Vec::new(),
                description: String::new(),
                required: false,
            }],
            existing_annotations: BTreeMap::new(),
            file_path: "real/UserDto.java".to_string(),
        };
        assert!(!builder.add_data_shape(richer));

        let document = builder.build();
        assert_eq!(document.data_shapes.len(), 1);
        assert!(document.data_shapes[0].fields.is_empty());
        assert_eq!(document.data_shapes[0].file_path, "estimated/UserDto.java");
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut builder = DocumentBuilder::new();
        assert!(builder.add_data_shape(DataShape::placeholder("UserDto", "a.java")));
        assert!(builder.add_data_shape(DataShape::placeholder("UserDTO", "b.java")));

        assert_eq!(builder.build().data_shapes.len(), 2);
    }

    #[test]
    fn test_known_names_tracks_insertions() {
        let mut builder = DocumentBuilder::new();
        builder.add_data_shape(DataShape::placeholder("OrderDto", "OrderDto.java"));

        assert!(builder.known_names().contains("OrderDto"));
        assert!(!builder.known_names().contains("UserDto"));
    }

    #[test]
    fn test_empty_run_builds_empty_document() {
        let document = DocumentBuilder::new().build();
        assert!(document.controllers.is_empty());
        assert!(document.data_shapes.is_empty());
        assert_eq!(document.total_methods, 0);
        assert_eq!(document.total_data_shapes, 0);
    }
}
