//! Endpoints-from-source - API endpoint metadata from annotated Java projects.
//!
//! This library extracts structured endpoint metadata (routes, parameters,
//! request/response payload shapes) from Spring-style annotated Java source by
//! static analysis of the syntax tree. No code is executed; annotations such as
//! `@RestController`, `@GetMapping` or `@RequestBody` are read as classification
//! markers and the result is emitted as a JSON or YAML document.
//!
//! # Architecture
//!
//! The library is organized into several modules that work together:
//!
//! 1. [`scanner`] - Collects candidate Java files, by directory scan or explicit list
//! 2. [`parser`] - Parses Java source into declaration-level facts (tree-sitter)
//! 3. [`detector`] - Classifies files and annotation markers
//! 4. [`type_parser`] - Decomposes textual type expressions and their generics
//! 5. [`extractor`] - Extracts route groups from controllers and fields from DTOs
//! 6. [`dto_resolver`] - Discovers payload types referenced from handler signatures
//! 7. [`document_builder`] - Accumulates and deduplicates into the final document
//! 8. [`serializer`] - Serializes the document to JSON or YAML
//!
//! # Example Usage
//!
//! ```no_run
//! use endpoints_from_source::{
//!     detector::{Classification, DeclClassifier},
//!     document_builder::DocumentBuilder,
//!     dto_resolver::DtoResolver,
//!     extractor::controller::ControllerExtractor,
//!     extractor::dto::DtoExtractor,
//!     parser::AstParser,
//!     scanner::FileScanner,
//!     serializer::serialize_json,
//! };
//! use std::path::PathBuf;
//!
//! // Scan the project for controller-like files
//! let root = PathBuf::from("./my-java-project");
//! let scanner = FileScanner::new(root.clone());
//! let scan_result = scanner.scan().unwrap();
//!
//! // Parse files; broken files are skipped whole
//! let parsed_files: Vec<_> = AstParser::parse_files(&scan_result.java_files)
//!     .into_iter()
//!     .filter_map(Result::ok)
//!     .collect();
//!
//! // Classify and extract
//! let resolver = DtoResolver::new(root);
//! let mut builder = DocumentBuilder::new();
//! for file in &parsed_files {
//!     match DeclClassifier::classify(&file.path, file) {
//!         Classification::DataShape => {
//!             for shape in DtoExtractor::extract(file) {
//!                 builder.add_data_shape(shape);
//!             }
//!         }
//!         Classification::Routable => {
//!             for class in file.classes.iter().filter(|c| DeclClassifier::is_routable_class(c)) {
//!                 builder.add_route_group(ControllerExtractor::extract(class, &file.package_name));
//!             }
//!         }
//!         Classification::Skip => {}
//!     }
//! }
//!
//! // Serialize
//! let document = builder.build();
//! println!("{}", serialize_json(&document).unwrap());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI
//! application.

pub mod cli;
pub mod detector;
pub mod document_builder;
pub mod dto_resolver;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod scanner;
pub mod serializer;
pub mod type_parser;
