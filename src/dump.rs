//! Memory dump loading.
//!
//! The whole dump is mapped read-only; extraction then runs over the mapped
//! bytes and copies out only the model.

use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::debug;

use crate::error::{Error, Result};

/// A memory dump opened for extraction.
#[derive(Debug)]
pub struct DumpFile {
    path: PathBuf,
    /// `None` for an empty file, which cannot be mapped on every platform
    mmap: Option<Mmap>,
}

impl DumpFile {
    /// Opens and memory-maps a dump file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path).map_err(|e| Error::FileOpen {
            path: path.clone(),
            source: e,
        })?;

        let file_len = file
            .metadata()
            .map_err(|e| Error::FileOpen {
                path: path.clone(),
                source: e,
            })?
            .len();

        let mmap = if file_len == 0 {
            None
        } else {
            // SAFETY: the mapping is read-only and the dump is not expected to
            // change underneath us for the duration of a single extraction.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::MemoryMap {
                path: path.clone(),
                source: e,
            })?;
            Some(mmap)
        };

        debug!("Mapped {} ({} bytes)", path.display(), file_len);

        Ok(Self { path, mmap })
    }

    /// Path the dump was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the dump contents.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}

impl Deref for DumpFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data()
    }
}
