use crate::detector::DeclClassifier;
use crate::extractor::DataShape;
use crate::type_parser::{parse_type, ParseMode};
use log::debug;
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Discovers payload types referenced from handler signatures.
///
/// Handler return types and body-bound parameter types are unwrapped
/// recursively; every embedded class name matching the payload suffix pattern
/// becomes a placeholder [`DataShape`] unless the name is already known. The
/// defining file is located by searching the project tree for
/// `<ClassName>.java`; when that fails, a deterministic estimated path is
/// assigned even though it may not exist on disk. Matching is by bare class
/// name, so same-named classes in different packages collapse to one entry.
pub struct DtoResolver {
    project_root: PathBuf,
}

/// Estimated location for a payload class whose file was not found.
const ESTIMATED_DTO_DIR: &str = "src/main/java/com/example/dto";

impl DtoResolver {
    /// Creates a resolver searching under the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Walks a type expression and returns placeholders for referenced
    /// payload types not present in `known`.
    ///
    /// The walk is depth-first and pre-order: a type's own name is tested
    /// before its arguments are examined. Each discovered name appears at
    /// most once in the result regardless of how often or how deep it occurs.
    pub fn discover_references(
        &self,
        type_expr: &str,
        known: &HashSet<String>,
    ) -> Vec<DataShape> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        self.collect(type_expr, known, &mut seen, &mut found);
        found
    }

    fn collect(
        &self,
        type_expr: &str,
        known: &HashSet<String>,
        seen: &mut HashSet<String>,
        found: &mut Vec<DataShape>,
    ) {
        let class_name = parse_type(type_expr, ParseMode::ClassNameOnly).base_type;
        if DeclClassifier::is_payload_class_name(&class_name)
            && !known.contains(&class_name)
            && seen.insert(class_name.clone())
        {
            debug!("Discovered referenced data shape: {}", class_name);
            let file_path = self.resolve_file_path(&class_name);
            found.push(DataShape::placeholder(class_name, file_path));
        }

        for argument in parse_type(type_expr, ParseMode::DtoExtraction).generic_types {
            self.collect(&argument, known, seen, found);
        }
    }

    /// Locates the file defining a class by exact file-name match.
    ///
    /// The first `<ClassName>.java` found under the project root wins; when
    /// nothing matches, the estimated path is returned unchanged.
    fn resolve_file_path(&self, class_name: &str) -> String {
        let wanted = format!("{}.java", class_name);

        for entry in WalkDir::new(&self.project_root)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() && entry.file_name().to_string_lossy() == wanted {
                return entry.path().to_string_lossy().to_string();
            }
        }

        debug!(
            "No file named {} under {}, using estimated path",
            wanted,
            self.project_root.display()
        );
        format!("{}/{}", ESTIMATED_DTO_DIR, wanted)
    }
}
