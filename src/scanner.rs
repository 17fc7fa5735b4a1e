use anyhow::Result;
use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Substring a file path must contain to be admitted by the directory scan.
/// The match is case-sensitive, so `Controller` alone does not qualify a path.
const CONTROLLER_PATH_MARKER: &str = "controller";

/// Extension of admissible source files.
const JAVA_EXTENSION: &str = "java";

/// File scanner for collecting the Java sources to extract from.
///
/// In directory mode the scanner recursively walks a project root and keeps
/// controller-like files: `.java` files whose path contains the `controller`
/// marker substring. Build output (`target`) and hidden directories are
/// skipped. In explicit-file mode an ordered list of paths is filtered
/// instead; missing files and files without the Java extension are skipped
/// with a diagnostic, never a hard failure.
///
/// # Example
///
/// ```no_run
/// use endpoints_from_source::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./my-project"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} controller files", result.java_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
}

/// Result of collecting candidate source files.
pub struct ScanResult {
    /// Admitted `.java` files, in traversal or argument order
    pub java_files: Vec<PathBuf>,
    /// Warning messages for skipped or inaccessible entries
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a new `FileScanner` for the specified root directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Scans the directory tree and collects controller-like Java files.
    ///
    /// Admission requires both the `.java` extension and the case-sensitive
    /// `controller` substring somewhere in the path. Inaccessible entries are
    /// recorded as warnings and scanning continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be accessed at all.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut java_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path).into_iter().filter_entry(|e| {
            if e.path() == self.root_path {
                return true;
            }

            // Skip build output and hidden directories
            let file_name = e.file_name().to_string_lossy();
            let is_hidden = file_name.starts_with('.');
            let is_target = file_name == "target";

            !is_hidden && !is_target
        }) {
            match entry {
                Ok(entry) => {
                    let path = entry.path();

                    if path.is_file()
                        && path.extension().and_then(|s| s.to_str()) == Some(JAVA_EXTENSION)
                        && path.to_string_lossy().contains(CONTROLLER_PATH_MARKER)
                    {
                        java_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Ok(ScanResult {
            java_files,
            warnings,
        })
    }

    /// Filters an explicit list of file paths, preserving argument order.
    ///
    /// Files that do not exist or lack the `.java` extension are skipped with
    /// a diagnostic; the remaining files are admitted without the
    /// controller-substring requirement of directory mode.
    pub fn filter_explicit(files: &[PathBuf]) -> ScanResult {
        let mut java_files = Vec::new();
        let mut warnings = Vec::new();

        for path in files {
            if !path.exists() {
                let warning = format!("Skipping missing file: {}", path.display());
                warn!("{}", warning);
                warnings.push(warning);
                continue;
            }
            if path.extension().and_then(|s| s.to_str()) != Some(JAVA_EXTENSION) {
                let warning = format!("Skipping non-Java file: {}", path.display());
                warn!("{}", warning);
                warnings.push(warning);
                continue;
            }
            java_files.push(path.clone());
        }

        ScanResult {
            java_files,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_keeps_only_controller_marked_java_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("src/controller")).unwrap();
        fs::create_dir_all(root.join("src/service")).unwrap();

        fs::write(root.join("src/controller/UserController.java"), "class A {}").unwrap();
        fs::write(root.join("src/controller/notes.md"), "# notes").unwrap();
        fs::write(root.join("src/service/UserService.java"), "class B {}").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(result.java_files.len(), 1);
        assert!(result.warnings.is_empty());
        assert_eq!(
            result.java_files[0].file_name().unwrap().to_string_lossy(),
            "UserController.java"
        );
    }

    #[test]
    fn test_scan_marker_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("src/Controller")).unwrap();
        fs::write(root.join("src/Controller/UserController.java"), "class A {}").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        // "Controller" in the directory name does not match the lowercase marker,
        // and the file name itself has no lowercase "controller" either.
        assert!(result.java_files.is_empty());
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let scanner = FileScanner::new(temp_dir.path().to_path_buf());
        let result = scanner.scan().unwrap();

        assert!(result.java_files.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_skips_target_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("target/controller")).unwrap();
        fs::create_dir_all(root.join("src/controller")).unwrap();
        fs::write(root.join("target/controller/Gen.java"), "class G {}").unwrap();
        fs::write(root.join("src/controller/ApiController.java"), "class C {}").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(result.java_files.len(), 1);
        assert_eq!(
            result.java_files[0].file_name().unwrap().to_string_lossy(),
            "ApiController.java"
        );
    }

    #[test]
    fn test_scan_skips_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join(".git/controller")).unwrap();
        fs::create_dir_all(root.join("controller")).unwrap();
        fs::write(root.join(".git/controller/Hidden.java"), "class H {}").unwrap();
        fs::write(root.join("controller/HomeController.java"), "class C {}").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(result.java_files.len(), 1);
        assert_eq!(
            result.java_files[0].file_name().unwrap().to_string_lossy(),
            "HomeController.java"
        );
    }

    #[test]
    fn test_filter_explicit_mixed_paths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let valid = root.join("OrderController.java");
        fs::write(&valid, "class C {}").unwrap();
        let wrong_ext = root.join("schema.sql");
        fs::write(&wrong_ext, "select 1;").unwrap();
        let missing = root.join("Missing.java");

        let result =
            FileScanner::filter_explicit(&[missing.clone(), wrong_ext.clone(), valid.clone()]);

        assert_eq!(result.java_files, vec![valid]);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("Missing.java"));
        assert!(result.warnings[1].contains("schema.sql"));
    }

    #[test]
    fn test_filter_explicit_does_not_require_controller_marker() {
        let temp_dir = TempDir::new().unwrap();
        let dto = temp_dir.path().join("UserDto.java");
        fs::write(&dto, "class UserDto {}").unwrap();

        let result = FileScanner::filter_explicit(&[dto.clone()]);

        assert_eq!(result.java_files, vec![dto]);
        assert!(result.warnings.is_empty());
    }
}
