//! tflex - Extract a TensorFlow Lite Micro model from a raw memory dump.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use tflex::{
    default_output_path, extract_file, parse_marker_bytes, parse_size, ExtractionOptions,
    ExtractionPolicy, DEFAULT_MAGIC, DEFAULT_OFFSET_BEFORE_MAGIC,
};

/// Extract a TFLM model from a memory dump.
///
/// Finds the "TFL3" flatbuffer identifier, backs up four bytes to the start
/// of the model and copies until EOF, an explicit size, or an end marker.
#[derive(Parser, Debug)]
#[command(name = "tflex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the memory dump (e.g., x_heep_uart_dump.bin)
    input: PathBuf,

    /// Path for the extracted model (default: <input>_model.tflite)
    output: Option<PathBuf>,

    /// Bytes to copy, decimal or hex (e.g., 0x1A00). Overrides --end-marker
    #[arg(short, long, value_name = "SIZE", allow_hyphen_values = true)]
    size: Option<String>,

    /// ASCII text or hex bytes (e.g., ENDM, 0x0000) marking the exclusive end of the model
    #[arg(short, long, value_name = "END", allow_hyphen_values = true)]
    end_marker: Option<String>,

    /// Start marker to search for, ASCII or hex
    #[arg(short, long, value_name = "MAGIC", allow_hyphen_values = true)]
    magic: Option<String>,

    /// Bytes before the start marker that belong to the model, decimal or hex
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    offset_before: Option<String>,

    /// Verbosity level (0=quiet, 1=warnings, 2=info, 3=debug)
    #[arg(short, long, default_value = "1")]
    verbosity: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbosity);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[!] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        _ => Level::DEBUG,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Builds extraction options from the raw command-line strings.
fn build_options(cli: &Cli) -> Result<ExtractionOptions> {
    let size = cli.size.as_deref().map(parse_size).transpose()?;
    let end_marker = cli
        .end_marker
        .as_deref()
        .map(parse_marker_bytes)
        .transpose()?;

    if size.is_some() && end_marker.is_some() {
        warn!("Both --size and --end-marker given; using --size");
    }

    let magic = match cli.magic.as_deref() {
        Some(text) => parse_marker_bytes(text)?,
        None => DEFAULT_MAGIC.to_vec(),
    };
    let offset_before_magic = match cli.offset_before.as_deref() {
        Some(text) => parse_size(text)?,
        None => DEFAULT_OFFSET_BEFORE_MAGIC,
    };

    Ok(ExtractionOptions {
        magic,
        offset_before_magic,
        policy: ExtractionPolicy::select(size, end_marker),
    })
}

fn run(cli: Cli) -> Result<()> {
    let options = build_options(&cli)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    let extraction = extract_file(&cli.input, &output, &options)
        .with_context(|| format!("Failed to extract model from {}", cli.input.display()))?;

    println!(
        "[+] Extracted {} bytes from offset {} to {} into {}",
        extraction.len(),
        extraction.start,
        extraction.end,
        output.display()
    );

    Ok(())
}
