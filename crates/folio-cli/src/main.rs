//! folio - archival OCR text analyzer
//!
//! Classifies a page of OCR text, extracts type-specific fields, segments
//! the body, and links entities against a reference registry. Reads from a
//! file or stdin, writes JSON to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use folio_core::{
    all_scores, classify_with, extract_fields, Analyzer, EntityIndex, EntityLinker, StrsimScorer,
    DEFAULT_HEADER_LINES,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio", version, about = "Analyze OCR text from scanned archival documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Classify the document type
    Classify {
        /// Input text file (stdin when omitted)
        file: Option<PathBuf>,
        /// Header lines to sample for fingerprinting
        #[arg(long, default_value_t = DEFAULT_HEADER_LINES)]
        header_lines: usize,
        /// Include normalized scores for every document type
        #[arg(long)]
        all_scores: bool,
        /// Disable the fuzzy fallback stage
        #[arg(long)]
        no_fuzzy: bool,
    },
    /// Classify, then extract type-specific fields
    Extract {
        file: Option<PathBuf>,
    },
    /// Link entity mentions against a registry
    Entities {
        file: Option<PathBuf>,
        /// Entity registry JSON (built-in sample data when omitted)
        #[arg(long)]
        registry: Option<PathBuf>,
        /// Skip new-candidate discovery
        #[arg(long)]
        no_candidates: bool,
    },
    /// Full pipeline: classify, extract, segment, link
    Analyze {
        file: Option<PathBuf>,
        /// Entity registry JSON; segments carry no entities when omitted
        #[arg(long)]
        registry: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_HEADER_LINES)]
        header_lines: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Classify { file, header_lines, all_scores: with_scores, no_fuzzy } => {
            let text = read_input(file.as_deref())?;
            let scorer = StrsimScorer;
            let fuzzy = if *no_fuzzy { None } else { Some(&scorer as &dyn folio_core::FuzzyScorer) };
            let result = classify_with(&text, *header_lines, fuzzy);

            eprintln!(
                "{} {} ({:.1}% {})",
                "classified:".dimmed(),
                result.doc_type.to_string().bold(),
                result.confidence * 100.0,
                result.confidence_label()
            );

            let mut json = serde_json::to_value(&result)?;
            json["confidence_label"] =
                serde_json::Value::String(result.confidence_label().to_string());
            if *with_scores {
                let scores: serde_json::Map<String, serde_json::Value> =
                    all_scores(&text, *header_lines)
                        .into_iter()
                        .map(|(doc_type, score)| {
                            (doc_type.to_string(), serde_json::json!(round3(score)))
                        })
                        .collect();
                json["all_scores"] = serde_json::Value::Object(scores);
            }
            print_json(&json, cli.compact)
        }
        Command::Extract { file } => {
            let text = read_input(file.as_deref())?;
            let classification = classify_with(&text, DEFAULT_HEADER_LINES, Some(&StrsimScorer));
            let result = extract_fields(&text, &classification);
            eprintln!(
                "{} {} field(s) from {}",
                "extracted:".dimmed(),
                result.fields.len(),
                result.doc_type.to_string().bold()
            );
            print_json(&serde_json::to_value(&result)?, cli.compact)
        }
        Command::Entities { file, registry, no_candidates } => {
            let text = read_input(file.as_deref())?;
            let index = load_registry(registry.as_deref())?;
            let scorer = StrsimScorer;
            let linker = EntityLinker::with_fuzzy(&index, &scorer);

            let json = if *no_candidates {
                serde_json::json!({ "entities": linker.link(&text) })
            } else {
                serde_json::to_value(linker.report(&text))?
            };
            print_json(&json, cli.compact)
        }
        Command::Analyze { file, registry, header_lines } => {
            let text = read_input(file.as_deref())?;
            let index = match registry.as_deref() {
                Some(path) => Some(load_registry(Some(path))?),
                None => None,
            };

            let mut analyzer = Analyzer::new().header_lines(*header_lines);
            if let Some(index) = index.as_ref() {
                analyzer = analyzer.with_index(index);
            }
            let analysis = analyzer.analyze(&text);

            eprintln!(
                "{} {} ({:.1}%), {} field(s), {} segment(s)",
                "analyzed:".dimmed(),
                analysis.classification.doc_type.to_string().bold(),
                analysis.classification.confidence * 100.0,
                analysis.extraction.fields.len(),
                analysis.segments.len()
            );
            print_json(&serde_json::to_value(&analysis)?, cli.compact)
        }
    }
}

/// Read the input text from a file, or stdin when no path is given.
fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Load a registry file, or fall back to the built-in sample data.
fn load_registry(path: Option<&std::path::Path>) -> Result<EntityIndex> {
    match path {
        Some(path) => EntityIndex::from_json_file(path)
            .with_context(|| format!("failed to load registry {}", path.display())),
        None => Ok(EntityIndex::sample()),
    }
}

fn print_json(value: &serde_json::Value, compact: bool) -> Result<()> {
    if compact {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
