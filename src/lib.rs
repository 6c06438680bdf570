//! tflex - Extract an embedded TensorFlow Lite Micro model from a memory dump.
//!
//! A TFLM model linked into firmware is a flatbuffer whose identifier `TFL3`
//! sits four bytes into the buffer. Given a raw memory image captured from a
//! device, this crate finds that identifier, backs up to the start of the
//! flatbuffer and copies the model out.
//!
//! Where the model ends is selected with an [`ExtractionPolicy`]: up to the
//! end of the dump, an explicit byte count, or up to a sentinel marker.
//!
//! # Example
//!
//! ```no_run
//! use tflex::{extract_file, ExtractionOptions, ExtractionPolicy};
//!
//! fn main() -> tflex::Result<()> {
//!     let options = ExtractionOptions {
//!         policy: ExtractionPolicy::FixedSize(0x1A00),
//!         ..Default::default()
//!     };
//!
//!     let model = extract_file("x_heep_uart_dump.bin", "model.tflite", &options)?;
//!     println!("{} bytes at {:#x}", model.len(), model.start);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dump;
pub mod error;
pub mod extractor;
pub mod parse;
pub mod util;
pub mod writer;

// Re-export main types
pub use dump::DumpFile;
pub use error::{Error, ErrorKind, Result};
pub use extractor::{
    extract, locate, Extraction, ExtractionPolicy, DEFAULT_MAGIC, DEFAULT_OFFSET_BEFORE_MAGIC,
};
pub use parse::{parse_marker_bytes, parse_size};
pub use writer::{default_output_path, write_extraction, DEFAULT_OUTPUT_SUFFIX};

use std::path::Path;

use tracing::info;

/// Options for model extraction.
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// Marker that anchors the model
    pub magic: Vec<u8>,
    /// Bytes before the marker that belong to the model
    pub offset_before_magic: usize,
    /// How the end of the model is found
    pub policy: ExtractionPolicy,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            magic: DEFAULT_MAGIC.to_vec(),
            offset_before_magic: DEFAULT_OFFSET_BEFORE_MAGIC,
            policy: ExtractionPolicy::ToEof,
        }
    }
}

/// Extracts the model from the dump at `input_path` and writes it to
/// `output_path`.
///
/// The output file is only created once extraction has succeeded.
pub fn extract_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    options: &ExtractionOptions,
) -> Result<Extraction> {
    let dump = DumpFile::open(input_path)?;
    info!(
        "Searching {} ({} bytes) with policy {}",
        dump.path().display(),
        dump.len(),
        options.policy.name()
    );

    let extraction = extract(
        &dump,
        &options.magic,
        options.offset_before_magic,
        &options.policy,
    )?;

    write_extraction(&extraction, output_path)?;

    Ok(extraction)
}
