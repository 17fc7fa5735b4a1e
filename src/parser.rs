use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser as TsParser};

/// AST parser for Java source files.
///
/// The `AstParser` uses tree-sitter with the Java grammar to parse source text and
/// reduce the syntax tree to the declaration-level facts the extractors consume:
/// classes, their annotations, methods, parameters, fields and attached doc comments.
///
/// # Example
///
/// ```no_run
/// use endpoints_from_source::parser::AstParser;
/// use std::path::Path;
///
/// let parsed = AstParser::parse_file(Path::new("UserController.java")).unwrap();
/// println!("Parsed {} classes", parsed.classes.len());
/// ```
pub struct AstParser;

/// A successfully parsed Java file reduced to declaration facts.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// Declared package name, empty if the file has no package declaration
    pub package_name: String,
    /// All class and interface declarations found in the file, in source order
    pub classes: Vec<ClassDecl>,
}

/// A class or interface declaration.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    /// 1-based line of the declaration
    pub line: usize,
    pub annotations: Vec<Annotation>,
    pub methods: Vec<MethodDecl>,
    pub fields: Vec<FieldDecl>,
}

/// A method declaration with its signature facts.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    /// 1-based line of the declaration
    pub line: usize,
    pub annotations: Vec<Annotation>,
    pub parameters: Vec<ParamDecl>,
    /// Return type expression, verbatim source text
    pub return_type: String,
    /// Declared throw list, verbatim type names
    pub throws: Vec<String>,
}

/// A single formal parameter.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    /// Type expression, verbatim source text
    pub ty: String,
    pub annotations: Vec<Annotation>,
}

/// A field declaration statement. May declare several variables; the names are
/// kept in declaration order.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub names: Vec<String>,
    /// Type expression, verbatim source text
    pub ty: String,
    pub annotations: Vec<Annotation>,
    /// Raw text of an attached `/** ... */` doc comment, if present
    pub doc_comment: Option<String>,
}

/// An annotation attached to a declaration.
///
/// `@Foo` yields no arguments, `@Foo("x")` a positional value, and
/// `@Foo(key = "x")` named pairs. String literal quoting is stripped.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub name: String,
    /// Positional (single-member) argument, if any
    pub value: Option<String>,
    /// Named arguments in source order
    pub pairs: Vec<(String, String)>,
}

impl Annotation {
    /// The annotation's string value: the positional argument or the named
    /// `value` attribute, whichever is present.
    pub fn value_attr(&self) -> Option<&str> {
        self.value.as_deref().or_else(|| self.attr("value"))
    }

    /// Looks up a named attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl AstParser {
    /// Parses a single Java source file into declaration facts.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the source does not
    /// parse as Java. A tree containing syntax errors is treated as a parse
    /// failure; no partial facts are extracted from a broken file.
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path)?;
        let mut parsed = Self::parse_source(&content).map_err(|message| Error::ParseError {
            file: path.to_path_buf(),
            message,
        })?;
        parsed.path = path.to_path_buf();

        debug!("Successfully parsed file: {}", path.display());
        Ok(parsed)
    }

    /// Parses Java source text. The returned file carries an empty path.
    pub fn parse_source(content: &str) -> std::result::Result<ParsedFile, String> {
        let mut parser = TsParser::new();
        let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();
        parser
            .set_language(&language)
            .map_err(|e| format!("failed to load Java grammar: {}", e))?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| "parser returned no tree".to_string())?;

        let root = tree.root_node();
        if root.has_error() {
            return Err("source contains Java syntax errors".to_string());
        }

        let source = content.as_bytes();
        let mut classes = Vec::new();
        collect_classes(root, source, &mut classes);

        Ok(ParsedFile {
            path: PathBuf::new(),
            package_name: package_name(root, source),
            classes,
        })
    }

    /// Parses multiple Java source files, continuing even if some fail.
    ///
    /// Files that fail to parse are logged as warnings; the failure is isolated
    /// to the single file and parsing continues for the rest.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<ParsedFile>> {
        debug!("Parsing {} files", paths.len());

        let results: Vec<Result<ParsedFile>> = paths
            .iter()
            .map(|path| match Self::parse_file(path) {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Err(e)
                }
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        debug!(
            "Parsing complete: {} succeeded, {} failed",
            success_count,
            results.len() - success_count
        );

        results
    }
}

fn package_name(root: Node, source: &[u8]) -> String {
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() == "package_declaration" {
            let mut inner = child.walk();
            for part in child.named_children(&mut inner) {
                if matches!(part.kind(), "identifier" | "scoped_identifier") {
                    return node_text(part, source);
                }
            }
        }
    }
    String::new()
}

/// Collects class and interface declarations at any nesting depth.
fn collect_classes(node: Node, source: &[u8], out: &mut Vec<ClassDecl>) {
    if matches!(node.kind(), "class_declaration" | "interface_declaration") {
        if let Some(class) = read_class(node, source) {
            out.push(class);
        }
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_classes(child, source, out);
    }
}

fn read_class(node: Node, source: &[u8]) -> Option<ClassDecl> {
    let name = node_text(node.child_by_field_name("name")?, source);
    let annotations = read_annotations(node, source);

    let mut methods = Vec::new();
    let mut fields = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "method_declaration" => {
                    if let Some(method) = read_method(member, source) {
                        methods.push(method);
                    }
                }
                "field_declaration" => {
                    if let Some(field) = read_field(member, source) {
                        fields.push(field);
                    }
                }
                _ => {}
            }
        }
    }

    Some(ClassDecl {
        name,
        line: node.start_position().row + 1,
        annotations,
        methods,
        fields,
    })
}

fn read_method(node: Node, source: &[u8]) -> Option<MethodDecl> {
    let name = node_text(node.child_by_field_name("name")?, source);
    let return_type = node
        .child_by_field_name("type")
        .map(|t| node_text(t, source))
        .unwrap_or_default();

    let mut parameters = Vec::new();
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            if param.kind() == "formal_parameter" {
                if let Some(decl) = read_parameter(param, source) {
                    parameters.push(decl);
                }
            }
        }
    }

    let mut throws = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "throws" {
            let mut inner = child.walk();
            for thrown in child.named_children(&mut inner) {
                throws.push(node_text(thrown, source));
            }
        }
    }

    Some(MethodDecl {
        name,
        line: node.start_position().row + 1,
        annotations: read_annotations(node, source),
        parameters,
        return_type,
        throws,
    })
}

fn read_parameter(node: Node, source: &[u8]) -> Option<ParamDecl> {
    let name = node_text(node.child_by_field_name("name")?, source);
    let ty = node
        .child_by_field_name("type")
        .map(|t| node_text(t, source))
        .unwrap_or_default();

    Some(ParamDecl {
        name,
        ty,
        annotations: read_annotations(node, source),
    })
}

fn read_field(node: Node, source: &[u8]) -> Option<FieldDecl> {
    let ty = node
        .child_by_field_name("type")
        .map(|t| node_text(t, source))
        .unwrap_or_default();

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for declarator in node.children_by_field_name("declarator", &mut cursor) {
        if let Some(name) = declarator.child_by_field_name("name") {
            names.push(node_text(name, source));
        }
    }
    if names.is_empty() {
        return None;
    }

    Some(FieldDecl {
        names,
        ty,
        annotations: read_annotations(node, source),
        doc_comment: doc_comment_of(node, source),
    })
}

/// Reads the annotations out of a declaration's `modifiers` node, if any.
fn read_annotations(node: Node, source: &[u8]) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "modifiers" {
            continue;
        }
        let mut inner = child.walk();
        for modifier in child.named_children(&mut inner) {
            match modifier.kind() {
                "marker_annotation" | "annotation" => {
                    if let Some(annotation) = read_annotation(modifier, source) {
                        annotations.push(annotation);
                    }
                }
                _ => {}
            }
        }
    }

    annotations
}

fn read_annotation(node: Node, source: &[u8]) -> Option<Annotation> {
    let name = node_text(node.child_by_field_name("name")?, source);

    let mut value = None;
    let mut pairs = Vec::new();
    if let Some(arguments) = node.child_by_field_name("arguments") {
        let mut cursor = arguments.walk();
        for argument in arguments.named_children(&mut cursor) {
            if argument.kind() == "element_value_pair" {
                let key = argument
                    .child_by_field_name("key")
                    .map(|k| node_text(k, source));
                let val = argument
                    .child_by_field_name("value")
                    .map(|v| literal_text(v, source));
                if let (Some(key), Some(val)) = (key, val) {
                    pairs.push((key, val));
                }
            } else {
                value = Some(literal_text(argument, source));
            }
        }
    }

    Some(Annotation { name, value, pairs })
}

/// Finds the `/** ... */` comment immediately preceding a declaration.
fn doc_comment_of(node: Node, source: &[u8]) -> Option<String> {
    let previous = node.prev_named_sibling()?;
    if previous.kind() == "block_comment" {
        let text = node_text(previous, source);
        if text.starts_with("/**") {
            return Some(text);
        }
    }
    None
}

fn node_text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or_default().to_string()
}

/// The value of an annotation argument. String literals lose their quotes;
/// other expressions keep their source text with quote characters removed.
fn literal_text(node: Node, source: &[u8]) -> String {
    let text = node_text(node, source);
    if node.kind() == "string_literal" {
        text.trim_matches('"').to_string()
    } else {
        text.replace('"', "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// Helper function to create a temporary file with content
    fn create_temp_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    const CONTROLLER_SOURCE: &str = r#"
package com.example.web;

import org.springframework.web.bind.annotation.*;

@RestController
@RequestMapping("/api/users")
public class UserController {

    @GetMapping("/{id}")
    public UserResponse getUser(@PathVariable Long id) throws UserNotFoundException {
        return null;
    }

    @PostMapping(value = "/")
    public ResponseEntity<UserResponse> createUser(@Valid @RequestBody CreateUserRequest request) {
        return null;
    }

    public String notAnEndpoint() {
        return "";
    }
}
"#;

    #[test]
    fn test_parse_controller_source() {
        let parsed = AstParser::parse_source(CONTROLLER_SOURCE).unwrap();

        assert_eq!(parsed.package_name, "com.example.web");
        assert_eq!(parsed.classes.len(), 1);

        let class = &parsed.classes[0];
        assert_eq!(class.name, "UserController");
        let annotation_names: Vec<_> = class.annotations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(annotation_names, vec!["RestController", "RequestMapping"]);
        assert_eq!(class.annotations[1].value_attr(), Some("/api/users"));

        assert_eq!(class.methods.len(), 3);
    }

    #[test]
    fn test_parse_method_facts() {
        let parsed = AstParser::parse_source(CONTROLLER_SOURCE).unwrap();
        let class = &parsed.classes[0];

        let get_user = &class.methods[0];
        assert_eq!(get_user.name, "getUser");
        assert_eq!(get_user.return_type, "UserResponse");
        assert_eq!(get_user.throws, vec!["UserNotFoundException".to_string()]);
        assert_eq!(get_user.parameters.len(), 1);
        assert_eq!(get_user.parameters[0].name, "id");
        assert_eq!(get_user.parameters[0].ty, "Long");
        assert_eq!(get_user.parameters[0].annotations[0].name, "PathVariable");

        let create_user = &class.methods[1];
        assert_eq!(create_user.return_type, "ResponseEntity<UserResponse>");
        assert_eq!(create_user.annotations[0].value_attr(), Some("/"));
        let param_annotations: Vec<_> = create_user.parameters[0]
            .annotations
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(param_annotations, vec!["Valid", "RequestBody"]);
    }

    #[test]
    fn test_parse_dto_fields_with_doc_comments() {
        let source = r#"
public class UserDto {
    /**
     * The user's display name.
     */
    @NotBlank
    @Size(min = 1, max = 64)
    private String name;

    private int age, score;
}
"#;
        let parsed = AstParser::parse_source(source).unwrap();
        let class = &parsed.classes[0];
        assert_eq!(class.fields.len(), 2);

        let name_field = &class.fields[0];
        assert_eq!(name_field.names, vec!["name".to_string()]);
        assert_eq!(name_field.ty, "String");
        assert!(name_field
            .doc_comment
            .as_deref()
            .unwrap()
            .contains("display name"));
        let annotation_names: Vec<_> = name_field
            .annotations
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(annotation_names, vec!["NotBlank", "Size"]);

        // Multi-variable statements keep every declarator name in order.
        assert_eq!(
            class.fields[1].names,
            vec!["age".to_string(), "score".to_string()]
        );
    }

    #[test]
    fn test_annotation_named_attributes() {
        let source = r#"
public class OrderDto {
    @Schema(description = "Order total", example = "10.50")
    private BigDecimal total;
}
"#;
        let parsed = AstParser::parse_source(source).unwrap();
        let annotation = &parsed.classes[0].fields[0].annotations[0];
        assert_eq!(annotation.name, "Schema");
        assert_eq!(annotation.attr("description"), Some("Order total"));
        assert_eq!(annotation.attr("example"), Some("10.50"));
        assert_eq!(annotation.value, None);
    }

    #[test]
    fn test_parse_invalid_java_is_an_error() {
        let result = AstParser::parse_source("public class Broken { void x( }");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_file(&temp_dir, "UserController.java", CONTROLLER_SOURCE);

        let parsed = AstParser::parse_file(&path).unwrap();
        assert_eq!(parsed.path, path);
        assert_eq!(parsed.classes.len(), 1);
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let result = AstParser::parse_file(Path::new("/nonexistent/UserController.java"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_files_isolates_failures() {
        let temp_dir = TempDir::new().unwrap();
        let good = create_temp_file(&temp_dir, "Good.java", "public class Good {}");
        let bad = create_temp_file(&temp_dir, "Bad.java", "class {{{");

        let results = AstParser::parse_files(&[good, bad]);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_parse_empty_source() {
        let parsed = AstParser::parse_source("").unwrap();
        assert!(parsed.classes.is_empty());
        assert!(parsed.package_name.is_empty());
    }

    #[test]
    fn test_nested_classes_are_collected() {
        let source = r#"
public class Outer {
    public class InnerDto {
        private String value;
    }
}
"#;
        let parsed = AstParser::parse_source(source).unwrap();
        let names: Vec<_> = parsed.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "InnerDto"]);
    }
}
