//! notegraph CLI: turn an exported note graph into cross-linked markdown.
//!
//! Logging: set `RUST_LOG=notegraph=debug,notegraph_core=debug` for per-note
//! output on stderr.

mod config;
mod links;
mod writer;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notegraph_core::{
    read_note_directory_with, transform_notes, BackLinkIndex, NoteCollection, ReadOptions,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{FileConfig, Overrides, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "notegraph",
    version,
    about = "Turn an exported note graph into a cross-linked markdown tree with backlinks"
)]
struct Cli {
    /// Config file (defaults to ./notegraph.toml when present).
    #[arg(long, short = 'c', env = "NOTEGRAPH_CONFIG", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory holding the raw exported notes.
    #[arg(long, short = 'i', env = "NOTEGRAPH_INPUT", value_name = "DIR", global = true)]
    input: Option<PathBuf>,

    /// Leave out notes of three bytes or fewer (default: true).
    #[arg(long, env = "NOTEGRAPH_SKIP_BLANKS", value_name = "BOOL", global = true)]
    skip_blanks: Option<bool>,

    /// Debug logging unless RUST_LOG is set.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform the notes and write them to the output directory.
    Format {
        /// Destination directory for the formatted notes.
        #[arg(long, short = 'o', env = "NOTEGRAPH_OUTPUT", value_name = "DIR")]
        output: Option<PathBuf>,

        /// Do not clear the output directory before writing.
        #[arg(long)]
        keep_output: bool,

        /// Print what would be written as JSON and write nothing.
        #[arg(long)]
        dry_run: bool,
    },
    /// Show backlinks and forward links of one note.
    Links {
        /// Note key, with or without the .md extension (e.g. "Projects/Alpha").
        note: String,

        /// Print the full occurrences as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct DryRunNote<'a> {
    key: &'a str,
    bytes: usize,
}

#[derive(Serialize)]
struct DryRunSummary<'a> {
    input_dir: &'a std::path::Path,
    output_dir: &'a std::path::Path,
    clear_output: bool,
    notes_read: usize,
    notes: Vec<DryRunNote<'a>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "notegraph=debug,notegraph_core=debug"
        } else {
            "notegraph=info,notegraph_core=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let file_config = FileConfig::load(cli.config.as_deref())?;
    let (output, keep_output) = match &cli.command {
        Command::Format { output, keep_output, .. } => (output.clone(), *keep_output),
        Command::Links { .. } => (None, false),
    };
    let settings = Settings::resolve(
        file_config,
        Overrides {
            input_dir: cli.input.clone(),
            output_dir: output,
            skip_blank_notes: cli.skip_blanks,
            keep_output,
        },
    )?;

    let notes = read_notes(&settings)?;

    match cli.command {
        Command::Format { dry_run, .. } => run_format(&settings, &notes, dry_run).await,
        Command::Links { note, json } => run_links(&notes, &note, json),
    }
}

fn read_notes(settings: &Settings) -> Result<NoteCollection> {
    let options = ReadOptions {
        skip_blank_notes: settings.skip_blank_notes,
    };
    read_note_directory_with(&settings.input_dir, options)
        .with_context(|| format!("failed to read notes from {}", settings.input_dir.display()))
}

async fn run_format(settings: &Settings, notes: &NoteCollection, dry_run: bool) -> Result<()> {
    let output_dir = settings.require_output_dir()?;
    let outputs = transform_notes(notes);

    if dry_run {
        let summary = DryRunSummary {
            input_dir: &settings.input_dir,
            output_dir,
            clear_output: settings.clear_output,
            notes_read: notes.len(),
            notes: outputs
                .iter()
                .map(|(key, content)| DryRunNote { key, bytes: content.len() })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if settings.clear_output {
        writer::clear_output_dir(output_dir).await?;
    }
    let written = writer::write_outputs(output_dir, &outputs).await?;
    tracing::info!(
        "Formatted {} of {} notes into {}",
        written,
        notes.len(),
        output_dir.display()
    );
    Ok(())
}

fn run_links(notes: &NoteCollection, note: &str, json: bool) -> Result<()> {
    let index = BackLinkIndex::build(notes);
    let report = links::build_report(notes, &index, note)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", links::render_report(&report));
    }
    Ok(())
}
