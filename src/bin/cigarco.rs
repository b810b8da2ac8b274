// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! cigarco CLI
//!
//! Command-line interface for transforming coordinates through CIGAR alignments.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cigarco::batch::{BatchProcessor, ErrorMode};
use cigarco::cli::{open_input, OutputFormat};
use cigarco::config::CigarcoConfig;
use cigarco::{Alignment, CoordinateMapper, Direction, Strand};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cigarco")]
#[command(author, version, about = "CIGAR coordinate mapper")]
#[command(
    long_about = "Transform coordinates between query and target sequences of CIGAR alignments.

Examples:
  cigarco transform -a alignments.tsv -q queries.tsv
  cigarco transform -a alignments.tsv.gz -q - --format json
  cigarco map --cigar 8M7D6M2I2M11D7M --start 3 4 13"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform query records against a file of alignments
    Transform {
        /// Alignment records: QNAME TNAME START CIGAR [STRAND] (use - for stdin)
        #[arg(short, long)]
        alignments: PathBuf,

        /// Query records: QNAME COORDINATE [QT|TQ] (use - for stdin)
        #[arg(short, long)]
        queries: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Error mode: I (ignore), R (report), F (fail)
        #[arg(long)]
        error_mode: Option<ErrorMode>,

        /// Output format
        #[arg(short = 'f', long, value_parser = ["text", "json"])]
        format: Option<String>,

        /// Bound each mapper's result cache to N entries
        #[arg(long)]
        cache_capacity: Option<usize>,

        /// Log level filter (e.g. info, debug, cigarco=trace); defaults to RUST_LOG, then info
        #[arg(long)]
        log_level: Option<String>,
    },

    /// Transform coordinates through a single CIGAR string
    Map {
        /// CIGAR string
        #[arg(long)]
        cigar: String,

        /// 0-based target start of the alignment
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        start: i64,

        /// The query was reverse-complemented before alignment
        #[arg(long)]
        reverse: bool,

        /// Direction: QT or TQ
        #[arg(short, long, default_value = "QT")]
        direction: Direction,

        /// Coordinates to transform
        #[arg(required = true)]
        coordinates: Vec<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Transform {
            alignments,
            queries,
            output,
            error_mode,
            format,
            cache_capacity,
            log_level,
        } => init_tracing(log_level.as_deref()).and_then(|()| {
            run_transform(
                &alignments,
                &queries,
                output.as_deref(),
                error_mode,
                format.as_deref(),
                cache_capacity,
            )
        }),
        Commands::Map {
            cigar,
            start,
            reverse,
            direction,
            coordinates,
        } => run_map(&cigar, start, reverse, direction, &coordinates),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| format!("Invalid log level '{}': {}", level, e))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}

fn run_transform(
    alignments: &Path,
    queries: &Path,
    output: Option<&Path>,
    error_mode: Option<ErrorMode>,
    format: Option<&str>,
    cache_capacity: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    if alignments == Path::new("-") && queries == Path::new("-") {
        return Err("alignments and queries cannot both be read from stdin".into());
    }

    // load() warns about any config file it had to skip
    let file_config = CigarcoConfig::load().unwrap_or_default();
    let format = format.and_then(|f| f.parse::<OutputFormat>().ok());
    let config = file_config.merge_with_cli(error_mode, format, cache_capacity);
    info!(
        error_mode = %config.error_mode,
        format = %config.format,
        "starting cigarco"
    );

    let mut processor = BatchProcessor::new(config);
    processor
        .load_alignments(open_input(alignments)?)
        .inspect_err(|e| error!(error = %e, "failed to load alignments"))?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    processor
        .run_queries(open_input(queries)?, &mut writer)
        .inspect_err(|e| error!(error = %e, "failed to process queries"))?;
    Ok(())
}

fn run_map(
    cigar: &str,
    start: i64,
    reverse: bool,
    direction: Direction,
    coordinates: &[u64],
) -> Result<(), Box<dyn std::error::Error>> {
    let strand = if reverse {
        Strand::Reverse
    } else {
        Strand::Forward
    };
    let alignment = Alignment::new("query", "target", start, cigar, strand)
        .map_err(|e| e.detailed_message())?;
    let mapper = CoordinateMapper::new(alignment);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for &coordinate in coordinates {
        match mapper.transform(coordinate, direction) {
            Ok(result) => writeln!(out, "{}\t{}", coordinate, result)?,
            Err(e) => writeln!(out, "{}\tERROR: {}", coordinate, e)?,
        }
    }
    Ok(())
}
