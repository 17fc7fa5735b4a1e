use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Endpoints-from-source - Extract API endpoint metadata from annotated Java projects
#[derive(Parser, Debug)]
#[command(name = "endpoints-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Java project directory to scan for controller files
    #[arg(value_name = "PROJECT_PATH", required_unless_present = "files")]
    pub project_path: Option<PathBuf>,

    /// Explicit list of source files to process instead of scanning a directory
    #[arg(long = "files", value_name = "FILE", num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if let Some(ref project_path) = args.project_path {
        if !project_path.exists() {
            anyhow::bail!("Project path does not exist: {}", project_path.display());
        }
        if !project_path.is_dir() {
            anyhow::bail!("Project path is not a directory: {}", project_path.display());
        }
        info!("Project path: {}", project_path.display());
    }
    if !args.files.is_empty() {
        info!("Explicit file list: {} files", args.files.len());
    }

    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::detector::{Classification, DeclClassifier};
    use crate::document_builder::DocumentBuilder;
    use crate::dto_resolver::DtoResolver;
    use crate::extractor::controller::ControllerExtractor;
    use crate::extractor::dto::DtoExtractor;
    use crate::extractor::ParameterLocation;
    use crate::parser::{AstParser, ParsedFile};
    use crate::scanner::FileScanner;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting endpoint metadata extraction...");

    // Step 1: Collect candidate files, by directory scan or explicit list
    let scan_result = if !args.files.is_empty() {
        info!("Filtering {} explicit files...", args.files.len());
        FileScanner::filter_explicit(&args.files)
    } else if let Some(project_path) = args.project_path.clone() {
        info!("Scanning project directory...");
        FileScanner::new(project_path).scan()?
    } else {
        anyhow::bail!("Either a project path or --files must be provided");
    };

    info!("Found {} candidate files", scan_result.java_files.len());
    for warning in &scan_result.warnings {
        warn!("{}", warning);
    }

    // Step 2: Parse files into declaration facts; broken files are skipped whole
    info!("Parsing Java files...");
    let parse_results = AstParser::parse_files(&scan_result.java_files);

    let parsed_files: Vec<ParsedFile> = parse_results
        .into_iter()
        .filter_map(|r| match r {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Skipping file due to parse error: {}", e);
                None
            }
        })
        .collect();

    info!("Successfully parsed {} files", parsed_files.len());

    if parsed_files.is_empty() {
        warn!("No files could be processed; emitting an empty result");
    }

    // The resolver searches for referenced payload files under the project
    // root; in explicit-file mode the current directory stands in for it.
    let search_root = args
        .project_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let resolver = DtoResolver::new(search_root);

    // Step 3: Classify each file and fold extraction results into the builder
    info!("Extracting endpoint metadata...");
    let mut builder = DocumentBuilder::new();

    for parsed_file in &parsed_files {
        match DeclClassifier::classify(&parsed_file.path, parsed_file) {
            Classification::DataShape => {
                for shape in DtoExtractor::extract(parsed_file) {
                    builder.add_data_shape(shape);
                }
            }
            Classification::Routable => {
                for class in &parsed_file.classes {
                    if !DeclClassifier::is_routable_class(class) {
                        continue;
                    }

                    let group = ControllerExtractor::extract(class, &parsed_file.package_name);

                    // Handler signatures reference payload types that may not
                    // be visited directly; synthesize placeholders for them.
                    for handler in &group.methods {
                        let mut reference_exprs: Vec<&str> = handler
                            .parameters
                            .iter()
                            .filter(|p| p.location == ParameterLocation::Body)
                            .map(|p| p.ty.as_str())
                            .collect();
                        reference_exprs.push(handler.return_type.as_str());

                        for expr in reference_exprs {
                            for shape in resolver.discover_references(expr, builder.known_names())
                            {
                                builder.add_data_shape(shape);
                            }
                        }
                    }

                    builder.add_route_group(group);
                }
            }
            Classification::Skip => {
                debug!("Skipping {}", parsed_file.path.display());
            }
        }
    }

    // Step 4: Build the final document
    let document = builder.build();
    info!("Extraction document built successfully");

    // Step 5: Serialize to the requested format
    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&document)?,
        OutputFormat::Yaml => serialize_yaml(&document)?,
    };

    // Step 6: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!("Output written to: {}", output_path.display());
    } else {
        println!("{}", content);
    }

    // Step 7: Display summary
    info!("Extraction complete!");
    info!(
        "Found {} methods in {} controllers",
        document.total_methods,
        document.controllers.len()
    );
    info!("Data shapes collected: {}", document.total_data_shapes);

    Ok(())
}
