//! SeqPair - Pairwise Alignment Viewer
//!
//! A terminal viewer for two aligned amino acid sequences.
//!
//! ## Usage
//!
//! ```bash
//! seqpair MKTAYIAKQR MKTAHIAKQ-
//! seqpair --fasta pair.fasta
//! seqpair --fasta pair.fasta -o - -w 60   # plain text, no TUI
//! ```
//!
//! ## Controls
//!
//! - Drag with the left button: select and copy residues
//! - `j/k`, wheel, `PageUp/PageDown`: scroll
//! - `q`: Quit

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use seqpair::colors::AminoAcidColorScheme;
use seqpair::controller::run_app;
use seqpair::fasta::read_pair;
use seqpair::grid::AlignmentGrid;
use seqpair::input::validate_pair;
use seqpair::layout::RowCapacity;
use seqpair::logging::{self, LogSettings};
use seqpair::model::{AlignedPair, AlignmentView, AppState, Sequence};

/// Width used for wrapping error messages.
const MESSAGE_WIDTH: usize = 80;
/// Residues per row in plain text mode unless `--width` is given.
const DEFAULT_ROW_WIDTH: usize = 60;

/// SeqPair - view two aligned protein sequences with mismatches highlighted
///
/// When run without -o/--output, opens an interactive TUI viewer.
/// With -o/--output, writes the wrapped alignment as plain text to a file
/// (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First (reference) sequence
    #[arg(required_unless_present = "fasta")]
    seq1: Option<String>,

    /// Second sequence, same length as the first
    #[arg(required_unless_present = "fasta")]
    seq2: Option<String>,

    /// Read both sequences from a FASTA file (first two records)
    #[arg(short = 'i', long = "fasta", conflicts_with_all = ["seq1", "seq2"])]
    fasta: Option<PathBuf>,

    /// Output file (enables plain text mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Residues per row in plain text mode [default: 60]
    #[arg(short = 'w', long = "width")]
    width: Option<usize>,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "info")]
    log_level: String,

    /// Log file (default: a new file in the system temp directory)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Disable logging
    #[arg(long = "no-log")]
    no_log: bool,
}

/// Loads and checks the two sequences from the arguments.
fn load_pair(args: &Args) -> Result<AlignedPair> {
    let (first, second) = match &args.fasta {
        Some(path) => read_pair(path)
            .with_context(|| format!("Could not read sequences from {}", path.display()))?,
        None => (
            Sequence::new("seq1", args.seq1.clone().unwrap_or_default()),
            Sequence::new("seq2", args.seq2.clone().unwrap_or_default()),
        ),
    };

    validate_pair(first, second)
        .map_err(|err| anyhow::anyhow!(textwrap::fill(&err.to_string(), MESSAGE_WIDTH)))
}

/// Writes the alignment wrapped at `width` residues per row.
fn run_cli_mode(pair: &AlignedPair, output: &str, width: usize) -> Result<()> {
    let view = AlignmentView::build(pair, RowCapacity::new(width));
    let grid = AlignmentGrid::build(&view, &AminoAcidColorScheme);
    info!(width, rows = view.row_count(), output, "writing plain alignment");

    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        grid.write_text(&mut handle)?;
    } else {
        let file = File::create(output).with_context(|| format!("Could not create {}", output))?;
        let mut writer = BufWriter::new(file);
        grid.write_text(&mut writer)?;
        writer.flush()?;
        eprintln!("Wrote {} rows to {}", view.row_count(), output);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The guard flushes the log file on exit
    let _log_guard = if args.no_log {
        None
    } else {
        let settings = LogSettings {
            level: args.log_level.clone(),
            file: args.log_file.clone(),
        };
        match logging::init(&settings) {
            Ok((guard, path)) => {
                info!(log_file = %path.display(), "logging started");
                Some(guard)
            }
            Err(err) => {
                eprintln!("Warning: logging disabled: {:#}", err);
                None
            }
        }
    };

    let pair = load_pair(&args)?;
    info!(
        top = %pair.top.id,
        bottom = %pair.bottom.id,
        length = pair.shared_len(),
        mismatches = pair.mismatch_count(),
        "sequences loaded"
    );

    if let Some(output) = args.output.as_deref() {
        run_cli_mode(&pair, output, args.width.unwrap_or(DEFAULT_ROW_WIDTH))?;
    } else {
        if args.width.is_some() {
            warn!("--width only applies with --output; the viewer wraps to the terminal");
        }
        run_app(AppState::new(pair))?;
    }

    Ok(())
}
