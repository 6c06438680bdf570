//! Output file handling for extracted models.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::extractor::Extraction;

/// Suffix appended to the dump's file name when no output path is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_model.tflite";

/// Derives the output path from the input path.
///
/// `dumps/uart_dump.bin` becomes `dumps/uart_dump.bin_model.tflite`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{name}{DEFAULT_OUTPUT_SUFFIX}"))
}

/// Writes the extracted bytes verbatim to `path`.
pub fn write_extraction<P: AsRef<Path>>(extraction: &Extraction, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Writing {} bytes to {}", extraction.len(), path.display());

    let write_err = |e: std::io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(extraction.bytes()).map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    Ok(())
}
