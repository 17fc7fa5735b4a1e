use crate::parser::{Annotation, ClassDecl, ParsedFile};
use log::debug;
use std::path::Path;

/// File-name suffixes that mark a payload (request/response) class.
pub const PAYLOAD_SUFFIXES: [&str; 6] = ["Dto", "DTO", "Req", "Res", "Request", "Response"];

/// HTTP verbs derivable from verb-bearing markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Patch => "PATCH",
        }
    }

    /// Parses a verb name such as `POST` or `RequestMethod.POST`.
    pub fn parse(name: &str) -> Option<HttpVerb> {
        let bare = name.rsplit('.').next().unwrap_or(name);
        match bare {
            "GET" => Some(HttpVerb::Get),
            "POST" => Some(HttpVerb::Post),
            "PUT" => Some(HttpVerb::Put),
            "DELETE" => Some(HttpVerb::Delete),
            "PATCH" => Some(HttpVerb::Patch),
            _ => None,
        }
    }
}

/// The closed set of marker annotations the extractors recognize.
///
/// Markers are classified once per declaration by [`classify_markers`]; the
/// extractors consume the tagged result by pattern matching instead of
/// re-scanning annotation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `@Controller` / `@RestController` on a class
    Controller,
    /// A verb-bearing mapping marker; `None` is the generic `@RequestMapping`
    Mapping(Option<HttpVerb>),
    /// `@RequestBody`
    Body,
    /// `@PathVariable`
    PathVar,
    /// `@RequestHeader`
    Header,
    /// `@RequestParam`
    QueryParam,
    // Validation markers
    Valid,
    NotNull,
    NotBlank,
    NotEmpty,
    Size,
    Min,
    Max,
    Email,
    Pattern,
    DecimalMin,
    DecimalMax,
    Digits,
    Future,
    Past,
    AssertTrue,
    AssertFalse,
    /// Explicit `@Required`
    Required,
    /// `@Schema`, carrying a structured `description` attribute
    SchemaDoc,
    /// `@ApiModelProperty`, the legacy documentation marker
    LegacyDoc,
    /// Anything else
    Other,
}

impl MarkerKind {
    /// Classifies a single annotation name.
    pub fn of(name: &str) -> MarkerKind {
        match name {
            "Controller" | "RestController" => MarkerKind::Controller,
            "RequestMapping" => MarkerKind::Mapping(None),
            "GetMapping" => MarkerKind::Mapping(Some(HttpVerb::Get)),
            "PostMapping" => MarkerKind::Mapping(Some(HttpVerb::Post)),
            "PutMapping" => MarkerKind::Mapping(Some(HttpVerb::Put)),
            "DeleteMapping" => MarkerKind::Mapping(Some(HttpVerb::Delete)),
            "PatchMapping" => MarkerKind::Mapping(Some(HttpVerb::Patch)),
            "RequestBody" => MarkerKind::Body,
            "PathVariable" => MarkerKind::PathVar,
            "RequestHeader" => MarkerKind::Header,
            "RequestParam" => MarkerKind::QueryParam,
            "Valid" => MarkerKind::Valid,
            "NotNull" => MarkerKind::NotNull,
            "NotBlank" => MarkerKind::NotBlank,
            "NotEmpty" => MarkerKind::NotEmpty,
            "Size" => MarkerKind::Size,
            "Min" => MarkerKind::Min,
            "Max" => MarkerKind::Max,
            "Email" => MarkerKind::Email,
            "Pattern" => MarkerKind::Pattern,
            "DecimalMin" => MarkerKind::DecimalMin,
            "DecimalMax" => MarkerKind::DecimalMax,
            "Digits" => MarkerKind::Digits,
            "Future" => MarkerKind::Future,
            "Past" => MarkerKind::Past,
            "AssertTrue" => MarkerKind::AssertTrue,
            "AssertFalse" => MarkerKind::AssertFalse,
            "Required" => MarkerKind::Required,
            "Schema" => MarkerKind::SchemaDoc,
            "ApiModelProperty" => MarkerKind::LegacyDoc,
            _ => MarkerKind::Other,
        }
    }

    /// Whether this marker is recorded in a field's validation list.
    pub fn is_field_validation(&self) -> bool {
        matches!(
            self,
            MarkerKind::Valid
                | MarkerKind::NotNull
                | MarkerKind::NotBlank
                | MarkerKind::NotEmpty
                | MarkerKind::Size
                | MarkerKind::Min
                | MarkerKind::Max
                | MarkerKind::Email
                | MarkerKind::Pattern
                | MarkerKind::DecimalMin
                | MarkerKind::DecimalMax
                | MarkerKind::Digits
                | MarkerKind::Future
                | MarkerKind::Past
                | MarkerKind::AssertTrue
                | MarkerKind::AssertFalse
        )
    }

    /// Whether this marker is recorded in a parameter's validation list.
    /// Binding markers are included alongside the narrow validation set.
    pub fn is_param_validation(&self) -> bool {
        matches!(
            self,
            MarkerKind::Valid
                | MarkerKind::NotNull
                | MarkerKind::Size
                | MarkerKind::NotBlank
                | MarkerKind::Body
                | MarkerKind::PathVar
                | MarkerKind::QueryParam
                | MarkerKind::Header
        )
    }

    /// Whether this marker makes a field required.
    pub fn implies_required_field(&self) -> bool {
        matches!(
            self,
            MarkerKind::NotNull | MarkerKind::NotBlank | MarkerKind::NotEmpty | MarkerKind::Required
        )
    }
}

/// An annotation paired with its classified kind.
#[derive(Debug, Clone, Copy)]
pub struct Marker<'a> {
    pub kind: MarkerKind,
    pub annotation: &'a Annotation,
}

/// Classifies a declaration's annotations in one pass, preserving order.
pub fn classify_markers(annotations: &[Annotation]) -> Vec<Marker<'_>> {
    annotations
        .iter()
        .map(|annotation| Marker {
            kind: MarkerKind::of(&annotation.name),
            annotation,
        })
        .collect()
}

/// How a parsed file participates in extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// At least one class serves endpoints
    Routable,
    /// The file defines request/response payload classes
    DataShape,
    /// Nothing to extract
    Skip,
}

/// Declaration classifier.
///
/// A file is a data-shape source when its name (without extension) ends with a
/// payload suffix; this is decided from the path alone, before the body is
/// consulted. Otherwise the file is routable when any declared class carries a
/// controller marker, and skipped when none does.
pub struct DeclClassifier;

impl DeclClassifier {
    /// Classifies a parsed file.
    pub fn classify(path: &Path, file: &ParsedFile) -> Classification {
        if Self::is_data_shape_file(path) {
            return Classification::DataShape;
        }

        if file.classes.iter().any(Self::is_routable_class) {
            return Classification::Routable;
        }

        debug!("No routable or data-shape declaration in {}", path.display());
        Classification::Skip
    }

    /// Whether the file name (sans extension) ends with a payload suffix.
    pub fn is_data_shape_file(path: &Path) -> bool {
        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => return false,
        };
        PAYLOAD_SUFFIXES.iter().any(|suffix| stem.ends_with(suffix))
    }

    /// Whether a class carries a controller marker.
    pub fn is_routable_class(class: &ClassDecl) -> bool {
        class
            .annotations
            .iter()
            .any(|a| MarkerKind::of(&a.name) == MarkerKind::Controller)
    }

    /// Whether a bare class name matches the payload suffix pattern.
    pub fn is_payload_class_name(name: &str) -> bool {
        PAYLOAD_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::AstParser;
    use std::path::PathBuf;

    fn parse(source: &str) -> ParsedFile {
        AstParser::parse_source(source).unwrap()
    }

    #[test]
    fn test_marker_classification() {
        assert_eq!(MarkerKind::of("RestController"), MarkerKind::Controller);
        assert_eq!(MarkerKind::of("Controller"), MarkerKind::Controller);
        assert_eq!(
            MarkerKind::of("GetMapping"),
            MarkerKind::Mapping(Some(HttpVerb::Get))
        );
        assert_eq!(MarkerKind::of("RequestMapping"), MarkerKind::Mapping(None));
        assert_eq!(MarkerKind::of("RequestBody"), MarkerKind::Body);
        assert_eq!(MarkerKind::of("Autowired"), MarkerKind::Other);
    }

    #[test]
    fn test_verb_parse_handles_qualified_constant() {
        assert_eq!(HttpVerb::parse("RequestMethod.POST"), Some(HttpVerb::Post));
        assert_eq!(HttpVerb::parse("DELETE"), Some(HttpVerb::Delete));
        assert_eq!(HttpVerb::parse("TRACE"), None);
    }

    #[test]
    fn test_data_shape_file_suffixes() {
        for name in [
            "UserDto.java",
            "UserDTO.java",
            "CreateUserReq.java",
            "CreateUserRes.java",
            "CreateUserRequest.java",
            "UserResponse.java",
        ] {
            assert!(
                DeclClassifier::is_data_shape_file(&PathBuf::from(name)),
                "{} should be a data-shape file",
                name
            );
        }

        assert!(!DeclClassifier::is_data_shape_file(&PathBuf::from(
            "UserController.java"
        )));
        assert!(!DeclClassifier::is_data_shape_file(&PathBuf::from(
            "UserService.java"
        )));
    }

    #[test]
    fn test_classify_routable_file() {
        let file = parse(
            r#"
@RestController
public class UserController {
}
"#,
        );
        assert_eq!(
            DeclClassifier::classify(&PathBuf::from("UserController.java"), &file),
            Classification::Routable
        );
    }

    #[test]
    fn test_classify_skips_unannotated_class() {
        let file = parse("public class UserService {}");
        assert_eq!(
            DeclClassifier::classify(&PathBuf::from("UserService.java"), &file),
            Classification::Skip
        );
    }

    #[test]
    fn test_file_name_decides_before_class_markers() {
        // Even a controller-annotated class in a Dto-suffixed file is treated
        // as a data-shape source; the file name is checked first.
        let file = parse(
            r#"
@RestController
public class StrangeDto {
}
"#,
        );
        assert_eq!(
            DeclClassifier::classify(&PathBuf::from("StrangeDto.java"), &file),
            Classification::DataShape
        );
    }

    #[test]
    fn test_validation_marker_sets() {
        assert!(MarkerKind::of("Size").is_field_validation());
        assert!(MarkerKind::of("Email").is_field_validation());
        assert!(!MarkerKind::of("Email").is_param_validation());
        assert!(MarkerKind::of("PathVariable").is_param_validation());
        assert!(!MarkerKind::of("PathVariable").is_field_validation());
        assert!(MarkerKind::of("NotEmpty").implies_required_field());
        assert!(!MarkerKind::of("Size").implies_required_field());
    }

    #[test]
    fn test_classify_markers_preserves_order() {
        let file = parse(
            r#"
@RestController
@RequestMapping("/api")
public class ApiController {
}
"#,
        );
        let markers = classify_markers(&file.classes[0].annotations);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].kind, MarkerKind::Controller);
        assert_eq!(markers[1].kind, MarkerKind::Mapping(None));
        assert_eq!(markers[1].annotation.value_attr(), Some("/api"));
    }
}
