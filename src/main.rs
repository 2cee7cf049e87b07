//! Command-line front end: extract records from a directory of thread exports.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thread_extract::{
    Config, DialectPreset, DialectSetting, EmissionPolicy, Pipeline, write_json, write_json_lines,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Split email thread exports into message records.
#[derive(Debug, Parser)]
#[command(name = "thread-extract")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing the exports
    root: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in marker dialect
    #[arg(short, long, value_enum)]
    dialect: Option<CliDialect>,

    /// File extension to search for, without the dot
    #[arg(short, long)]
    extension: Option<String>,

    /// Which segments become records
    #[arg(long, value_enum)]
    emit: Option<CliEmission>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliFormat::Json)]
    format: CliFormat,

    /// Write records here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse sources one at a time
    #[arg(long)]
    sequential: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDialect {
    English,
    Polish,
}

impl From<CliDialect> for DialectPreset {
    fn from(d: CliDialect) -> Self {
        match d {
            CliDialect::English => Self::English,
            CliDialect::Polish => Self::Polish,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliEmission {
    /// Require a sender or recipient
    Identity,
    /// Also keep messages that only have a body
    AnyContent,
}

impl From<CliEmission> for EmissionPolicy {
    fn from(e: CliEmission) -> Self {
        match e {
            CliEmission::Identity => Self::IdentityRequired,
            CliEmission::AnyContent => Self::AnyContent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliFormat {
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(dialect) = cli.dialect {
        config.dialect = DialectSetting::Preset(dialect.into());
    }
    if let Some(extension) = cli.extension {
        config.extension = extension;
    }
    if let Some(emit) = cli.emit {
        config.emission = emit.into();
    }
    if cli.sequential {
        config.parallel = false;
    }

    let pipeline = Pipeline::new(config)?;
    let extraction = pipeline.run(&cli.root)?;

    if extraction.is_empty_corpus() {
        info!("Nothing to extract under {}", cli.root.display());
    }

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    match cli.format {
        CliFormat::Json => write_json(&mut writer, &extraction.records)?,
        CliFormat::Jsonl => write_json_lines(&mut writer, &extraction.records)?,
    }
    if cli.format == CliFormat::Json {
        writeln!(writer)?;
    }
    writer.flush()?;

    Ok(())
}
