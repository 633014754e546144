use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use crate::error::Result;

/// A file's full contents exposed as a contiguous read-only byte view.
///
/// The mapping is immutable and shared by every worker for the lifetime of a
/// run; dropping the value releases it, which must happen only after all
/// workers have joined.
#[derive(Debug)]
pub struct MappedFile {
    // Zero-length files cannot be mapped on every platform, so they are held
    // as `None` and read as an empty slice.
    mmap: Option<Mmap>,
}

impl MappedFile {
    /// Open `path` read-only and map its contents without copying.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        if len == 0 {
            return Ok(Self { mmap: None });
        }

        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap: Some(mmap) })
    }

    pub fn len(&self) -> usize {
        self.mmap.as_ref().map_or(0, |m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl Deref for MappedFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}
