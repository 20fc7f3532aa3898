//! PDF Dimensions CLI tool
//!
//! A command-line tool for measuring PDF pages and matching them to paper sizes.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use std::path::{Path, PathBuf};
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pdf_dimensions::analysis::{analyze_pdf, Analysis};
use pdf_dimensions::catalog::CatalogPreset;
use pdf_dimensions::classify::Classifier;
use pdf_dimensions::config::{load_config, Config};
use pdf_dimensions::export::{self, ExportFormat};
use pdf_dimensions::pdf::{extract_metadata, format_file_size};
use pdf_dimensions::units::mm_to_pt;

/// PDF Dimensions - Measure pages and identify paper sizes
#[derive(Parser)]
#[command(name = "pdf-dimensions")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Show a size table and statistics for a PDF
    pdf-dimensions analyze report.pdf

    # Export every page of several PDFs as CSV files next to the inputs
    pdf-dimensions analyze --format csv --save \"scans/*.pdf\"

    # Write a JSON report using the minimal catalog
    pdf-dimensions --catalog minimal analyze report.pdf --format json -o report.json

    # List the paper sizes pages are matched against
    pdf-dimensions catalog")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, default_value = "pdf-dimensions.toml")]
    config: PathBuf,

    /// Built-in paper catalog to match against (overrides the config file)
    #[arg(long, global = true)]
    catalog: Option<Preset>,

    /// Maximum difference in millimeters for a paper size match
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Side difference in points below which a page counts as square
    #[arg(long, global = true)]
    square_threshold: Option<f64>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure every page of one or more PDF files
    Analyze {
        /// Input PDF files. Supports glob patterns like "*.pdf"
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the export to this file instead of stdout (single input only)
        #[arg(short, long, conflicts_with = "save")]
        output: Option<PathBuf>,

        /// Write the export next to each input as <name>_analysis.<ext>
        #[arg(long)]
        save: bool,
    },

    /// List the paper formats in the active catalog
    Catalog,

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned table with statistics
    Table,
    Csv,
    Json,
    /// One summary line per page
    Text,
}

impl OutputFormat {
    fn export_format(self) -> Option<ExportFormat> {
        match self {
            OutputFormat::Table => None,
            OutputFormat::Csv => Some(ExportFormat::Csv),
            OutputFormat::Json => Some(ExportFormat::Json),
            OutputFormat::Text => Some(ExportFormat::Text),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Minimal,
    Extended,
}

impl From<Preset> for CatalogPreset {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Minimal => CatalogPreset::Minimal,
            Preset::Extended => CatalogPreset::Extended,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = build_classifier(&cli).and_then(|classifier| match cli.command {
        Commands::Analyze {
            inputs,
            format,
            output,
            save,
        } => cmd_analyze(&classifier, inputs, format, output, save),
        Commands::Catalog => cmd_catalog(&classifier),
        Commands::Info { input } => cmd_info(input),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pdf_dimensions={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Combine the config file with command-line overrides
fn build_classifier(cli: &Cli) -> Result<Classifier, Box<dyn std::error::Error>> {
    let mut config: Config = load_config(&cli.config)?;

    if let Some(preset) = cli.catalog {
        config.set_preset(preset.into());
    }
    if let Some(tolerance) = cli.tolerance {
        config.set_match_tolerance(tolerance);
    }
    if let Some(threshold) = cli.square_threshold {
        config.set_square_threshold(threshold);
    }

    Ok(config.classifier()?)
}

/// Expand glob patterns in input paths
fn expand_globs(patterns: Vec<String>) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        // Check if pattern contains glob characters
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let mut matched = Vec::new();
            for entry in glob(&pattern)? {
                match entry {
                    Ok(path) => matched.push(path),
                    Err(e) => warn!("glob error for {}: {}", pattern, e),
                }
            }
            if matched.is_empty() {
                return Err(format!("No files matched pattern: {}", pattern).into());
            }
            // Sort matches for consistent ordering within a pattern
            matched.sort();
            paths.extend(matched);
        } else {
            // No glob characters, treat as literal path
            paths.push(PathBuf::from(pattern));
        }
    }

    Ok(paths)
}

/// Analyze each input in turn; one failing file does not stop the others
fn cmd_analyze(
    classifier: &Classifier,
    inputs: Vec<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
    save: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = expand_globs(inputs)?;

    if output.is_some() && inputs.len() > 1 {
        return Err("--output needs a single input file; use --save for several".into());
    }
    if save && format == OutputFormat::Table {
        return Err("--save needs an export format (csv, json or text)".into());
    }

    let mut failures = 0;
    for (i, input) in inputs.iter().enumerate() {
        if i > 0 && format == OutputFormat::Table {
            println!();
        }

        // A fresh analysis per file; nothing carries over between inputs
        let analysis = match analyze_pdf(input, classifier) {
            Ok(analysis) => analysis,
            Err(e) => {
                eprintln!("Error processing {}: {}", input.display(), e);
                failures += 1;
                continue;
            }
        };

        match format.export_format() {
            None => print_report(input, &analysis)?,
            Some(export_format) => {
                let rendered = export::render(&analysis, export_format)?;
                let destination = match &output {
                    Some(path) => Some(path.clone()),
                    None if save => Some(export::export_path(input, export_format)),
                    None => None,
                };
                match destination {
                    Some(path) => {
                        write_export(&path, &rendered)?;
                        eprintln!("Exported: {}", path.display());
                    }
                    None => println!("{}", rendered),
                }
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} files could not be analyzed", failures, inputs.len()).into());
    }

    Ok(())
}

fn write_export(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write export file: {}", path.display()))
}

/// Print the table, uniformity line and statistics for one file
fn print_report(input: &Path, analysis: &Analysis) -> Result<(), Box<dyn std::error::Error>> {
    let file_size = std::fs::metadata(input)?.len();

    println!("File: {}", analysis.file_name);
    println!("Size: {}", format_file_size(file_size));
    println!("Pages: {}", analysis.total_pages());
    println!();
    println!("{}", export::to_table(&analysis.pages));
    println!();
    println!("{}", export::uniformity_message(&analysis.summary));
    println!();
    println!("{}", export::statistics_text(&analysis.summary));

    Ok(())
}

/// List the active catalog in match order
fn cmd_catalog(classifier: &Classifier) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = classifier.catalog();
    let thresholds = classifier.thresholds();

    let name_width = catalog
        .formats()
        .iter()
        .map(|format| format.name.chars().count())
        .max()
        .unwrap_or(0);

    for format in catalog.formats() {
        println!(
            "{:<width$}  {:>6.1} × {:>6.1} mm  {:>7.1} × {:>7.1} pt",
            format.name,
            format.width_mm,
            format.height_mm,
            mm_to_pt(format.width_mm),
            mm_to_pt(format.height_mm),
            width = name_width
        );
    }
    println!();
    println!(
        "{} formats, tolerance {} mm, square below {} pt",
        catalog.len(),
        thresholds.match_tolerance_mm,
        thresholds.square_threshold_pt
    );

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }

    let metadata = extract_metadata(&input)?;

    println!("File: {}", input.display());
    println!("Size: {}", format_file_size(metadata.file_size));
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }

    Ok(())
}
