//! Command-line front end for Lemma Scan
//!
//! Usage: lemma-scan <extract|erase|list> [options]

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use simplelog::{Config, LevelFilter, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

use lemma_scan::parser::LineIndex;
use lemma_scan::{erase_with_report, extract_lemmas, list_lemmas, ErasureCache, LemmaScanError};

// CLI modules live in src/bin/cli/
mod cli;

#[derive(Parser)]
#[command(name = "lemma-scan")]
#[command(about = "Extract lemmas from Dafny specifications and erase their proofs", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full text of one or more lemmas
    Extract {
        /// Specification file to read
        file: PathBuf,

        /// Lemma names to extract
        #[arg(required = true)]
        names: Vec<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Empty every lemma body and mark the lemma {:axiom}
    Erase {
        /// Files or directories (directories are searched for .dfy files)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Write erased files under this directory, mirroring the input layout
        #[arg(short, long, conflicts_with = "in_place")]
        output_dir: Option<PathBuf>,

        /// Overwrite the input files
        #[arg(long)]
        in_place: bool,

        /// Reuse erasures of unchanged sources from this directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// List lemma declarations and whether they carry a proof
    List {
        /// Files or directories (directories are searched for .dfy files)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Filter by lemma name (supports * wildcards)
        #[arg(long)]
        name: Option<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Human,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Expected: human, json, markdown", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract { file, names, format } => handle_extract(&file, &names, format),
        Commands::Erase {
            paths,
            output_dir,
            in_place,
            cache_dir,
        } => handle_erase(&paths, output_dir.as_deref(), in_place, cache_dir.as_deref()),
        Commands::List { paths, name, format } => handle_list(&paths, name.as_deref(), format),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Fails only if a logger is already installed
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr);
}

fn handle_extract(file: &Path, names: &[String], format: OutputFormat) -> anyhow::Result<i32> {
    if format == OutputFormat::Markdown {
        bail!("Markdown format not supported for extract");
    }

    let source = cli::discover::read_source(file)?;
    let results = extract_lemmas(&source, names);

    print!("{}", cli::output::format_extractions(&results, format));

    let mut missing = 0;
    for (name, text) in &results {
        if text.is_none() {
            let err = LemmaScanError::NotFound {
                name: name.clone(),
                path: file.to_path_buf(),
            };
            eprintln!("{}", err);
            missing += 1;
        }
    }

    // Return exit code: 0 if every lemma was found, 1 otherwise
    Ok(if missing > 0 { 1 } else { 0 })
}

fn handle_erase(
    paths: &[PathBuf],
    output_dir: Option<&Path>,
    in_place: bool,
    cache_dir: Option<&Path>,
) -> anyhow::Result<i32> {
    let sources = cli::discover::discover_sources(paths)?;
    if sources.is_empty() {
        bail!("No .dfy files found");
    }
    if output_dir.is_none() && !in_place && sources.len() > 1 {
        bail!(
            "{} input files: use --output-dir or --in-place to write more than one result",
            sources.len()
        );
    }
    if let Some(dir) = output_dir {
        if let Some(relative) = cli::discover::find_duplicate_relative(&sources) {
            bail!(
                "several inputs would be written to {}",
                dir.join(relative).display()
            );
        }
    }

    let cache = cache_dir
        .map(ErasureCache::new)
        .transpose()
        .context("Error opening erasure cache")?;

    for source_file in &sources {
        let source = cli::discover::read_source(&source_file.path)?;
        let erasure = match &cache {
            Some(cache) => cache.erase(&source)?,
            None => erase_with_report(&source),
        };

        match output_dir {
            Some(dir) => {
                cli::discover::write_output(&dir.join(&source_file.relative), &erasure.output)?
            }
            None if in_place => {
                if erasure.changed() {
                    cli::discover::write_output(&source_file.path, &erasure.output)?;
                }
            }
            None => print!("{}", erasure.output),
        }

        eprintln!("{}", cli::output::format_erasure_summary(&source_file.path, &erasure));
    }

    Ok(0)
}

fn handle_list(paths: &[PathBuf], name: Option<&str>, format: OutputFormat) -> anyhow::Result<i32> {
    let sources = cli::discover::discover_sources(paths)?;
    let pattern = name.map(cli::filters::NamePattern::new).transpose()?;

    let mut rows = Vec::new();
    for source_file in &sources {
        let source = cli::discover::read_source(&source_file.path)?;
        let declarations = cli::filters::filter_declarations(list_lemmas(&source), pattern.as_ref());
        let lines = LineIndex::new(&source);
        rows.extend(
            declarations
                .iter()
                .map(|decl| cli::output::LemmaRow::new(&source_file.path, &lines, decl)),
        );
    }

    print!("{}", cli::output::format_lemma_list(&rows, format));
    Ok(0)
}
