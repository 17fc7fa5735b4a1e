use crate::detector::{classify_markers, HttpVerb, Marker, MarkerKind};
use crate::extractor::{Handler, Parameter, ParameterLocation, RouteGroup};
use crate::parser::{ClassDecl, MethodDecl, ParamDecl};
use log::debug;
use std::collections::BTreeMap;

/// Extracts endpoint metadata from a routable class.
///
/// A method is a handler iff it carries a verb-bearing mapping marker. The
/// first such marker in declaration order decides both the verb and the path;
/// later mapping markers on the same method are ignored. Missing annotation
/// data never fails extraction, it degrades to empty strings and defaults.
pub struct ControllerExtractor;

impl ControllerExtractor {
    /// Builds the route group for a routable class.
    pub fn extract(class: &ClassDecl, package_name: &str) -> RouteGroup {
        debug!("Extracting handlers from class {}", class.name);

        let methods = class
            .methods
            .iter()
            .filter_map(Self::extract_handler)
            .collect();

        RouteGroup {
            class_name: class.name.clone(),
            package_name: package_name.to_string(),
            request_mapping: Self::request_mapping_prefix(class),
            methods,
            existing_annotations: BTreeMap::new(),
        }
    }

    /// The class-level mapping marker's path value, empty if absent.
    fn request_mapping_prefix(class: &ClassDecl) -> String {
        classify_markers(&class.annotations)
            .into_iter()
            .find(|marker| matches!(marker.kind, MarkerKind::Mapping(_)))
            .and_then(|marker| marker.annotation.value_attr().map(str::to_string))
            .unwrap_or_default()
    }

    /// Extracts one handler, or `None` for methods without a mapping marker.
    fn extract_handler(method: &MethodDecl) -> Option<Handler> {
        let markers = classify_markers(&method.annotations);
        let mapping = markers
            .iter()
            .find(|marker| matches!(marker.kind, MarkerKind::Mapping(_)))?;

        Some(Handler {
            method_name: method.name.clone(),
            http_method: Self::derive_verb(mapping).as_str().to_string(),
            path: mapping
                .annotation
                .value_attr()
                .unwrap_or_default()
                .to_string(),
            parameters: method.parameters.iter().map(Self::extract_parameter).collect(),
            return_type: method.return_type.clone(),
            exceptions: method.throws.clone(),
            existing_annotations: BTreeMap::new(),
            line_number: method.line,
        })
    }

    /// Derives the HTTP verb from the first verb-bearing marker.
    ///
    /// Named mappings carry their verb; the generic mapping marker consults
    /// its `method` attribute and falls back to GET when it has none.
    fn derive_verb(mapping: &Marker) -> HttpVerb {
        match mapping.kind {
            MarkerKind::Mapping(Some(verb)) => verb,
            _ => mapping
                .annotation
                .attr("method")
                .and_then(HttpVerb::parse)
                .unwrap_or(HttpVerb::Get),
        }
    }

    /// Extracts one parameter descriptor.
    ///
    /// The binding location follows a strict priority: a body marker beats a
    /// path marker beats a header marker; anything else binds from the query
    /// string. Only body and path bindings make a parameter required.
    fn extract_parameter(param: &ParamDecl) -> Parameter {
        let markers = classify_markers(&param.annotations);

        let location = if markers.iter().any(|m| m.kind == MarkerKind::Body) {
            ParameterLocation::Body
        } else if markers.iter().any(|m| m.kind == MarkerKind::PathVar) {
            ParameterLocation::Path
        } else if markers.iter().any(|m| m.kind == MarkerKind::Header) {
            ParameterLocation::Header
        } else {
            ParameterLocation::Query
        };

        let required = matches!(location, ParameterLocation::Body | ParameterLocation::Path);

        let validation_annotations = markers
            .iter()
            .filter(|m| m.kind.is_param_validation())
            .map(|m| m.annotation.name.clone())
            .collect();

        Parameter {
            name: param.name.clone(),
            ty: param.ty.clone(),
            location,
            required,
            validation_annotations,
        }
    }
}
