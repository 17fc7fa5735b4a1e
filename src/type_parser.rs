//! Parsing of textual Java type expressions.
//!
//! Type expressions arrive as raw source text (e.g. `ResponseEntity<List<UserDto>>`)
//! and are decomposed into a base type plus its type arguments. Nested generics are
//! handled by callers invoking [`parse_type`] again on each argument string; the
//! splitter itself does not track bracket depth.

/// Controls how much canonicalization [`parse_type`] applies to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Keep the base type verbatim; used when unwrapping generics to find DTO names.
    DtoExtraction,
    /// Canonicalize well-known containers and strip built-in qualifiers; used for DTO fields.
    FieldNormalization,
    /// Reduce the base type to a bare class name (qualifier prefix removed).
    ClassNameOnly,
}

/// Result of decomposing a type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParseResult {
    /// The (possibly normalized) base type name.
    pub base_type: String,
    /// The type argument expressions, in declaration order.
    pub generic_types: Vec<String>,
}

impl TypeParseResult {
    fn new(base_type: impl Into<String>, generic_types: Vec<String>) -> Self {
        Self {
            base_type: base_type.into(),
            generic_types,
        }
    }
}

/// Decomposes a type expression into a base type and its type arguments.
///
/// Empty input yields the `Object` sentinel with no arguments; this function
/// has no failure modes.
pub fn parse_type(type_name: &str, mode: ParseMode) -> TypeParseResult {
    if type_name.is_empty() {
        return TypeParseResult::new("Object", Vec::new());
    }

    if let (Some(lt), Some(gt)) = (type_name.find('<'), type_name.rfind('>')) {
        if lt < gt {
            return parse_generic_type(type_name, lt, gt, mode);
        }
    }

    parse_simple_type(type_name, mode)
}

fn parse_generic_type(type_name: &str, lt: usize, gt: usize, mode: ParseMode) -> TypeParseResult {
    let base_type = &type_name[..lt];
    let generic_content = &type_name[lt + 1..gt];

    let generic_types = extract_generic_types(generic_content);

    match mode {
        ParseMode::DtoExtraction => TypeParseResult::new(base_type, generic_types),
        ParseMode::FieldNormalization => normalize_generic_type(base_type, generic_types),
        ParseMode::ClassNameOnly => {
            TypeParseResult::new(extract_class_name(base_type), generic_types)
        }
    }
}

fn parse_simple_type(type_name: &str, mode: ParseMode) -> TypeParseResult {
    let normalized = if mode == ParseMode::FieldNormalization {
        normalize_simple_type(type_name)
    } else {
        extract_class_name(type_name)
    };

    TypeParseResult::new(normalized, Vec::new())
}

fn normalize_generic_type(base_type: &str, generic_types: Vec<String>) -> TypeParseResult {
    let normalized_base = normalize_simple_type(base_type);

    match normalized_base.as_str() {
        "List" | "Set" => {
            let element = first_element_class_name(&generic_types);
            TypeParseResult::new(format!("{}<{}>", normalized_base, element), generic_types)
        }
        "Map" => TypeParseResult::new("Map<String, Object>", generic_types),
        "Optional" => {
            let element = first_element_class_name(&generic_types);
            TypeParseResult::new(format!("Optional<{}>", element), generic_types)
        }
        _ => TypeParseResult::new(normalized_base, generic_types),
    }
}

fn first_element_class_name(generic_types: &[String]) -> String {
    generic_types
        .first()
        .map(|t| parse_type(t, ParseMode::ClassNameOnly).base_type)
        .unwrap_or_else(|| "Object".to_string())
}

fn normalize_simple_type(type_name: &str) -> String {
    if let Some(rest) = type_name.strip_prefix("java.lang.") {
        return rest.to_string();
    }
    if let Some(rest) = type_name.strip_prefix("java.util.") {
        return rest.to_string();
    }
    extract_class_name(type_name)
}

fn extract_class_name(type_name: &str) -> String {
    match type_name.rfind('.') {
        Some(dot) => type_name[dot + 1..].to_string(),
        None => type_name.to_string(),
    }
}

/// Splits the content between the outer angle brackets on commas.
///
/// The split is depth-naive: a comma inside a nested generic also splits.
/// Callers recover nested arguments by recursing on each piece, so
/// single-argument nesting such as `List<Map<K>>` still round-trips.
fn extract_generic_types(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
