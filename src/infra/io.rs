use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;
use tracing::trace;

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

/// Document bytes, mapped or buffered depending on size.
pub enum FileContent
{
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl FileContent
{
    pub fn bytes(&self) -> &[u8]
    {
        match self
        {
            FileContent::Mapped(mmap) => mmap,
            FileContent::Buffered(v) => v,
        }
    }

    /// Text view; invalid UTF-8 sequences become U+FFFD.
    pub fn text(&self) -> Cow<'_, str>
    {
        String::from_utf8_lossy(self.bytes())
    }
}

pub fn read_file_smart<P: AsRef<Path>>(path: P) -> Result<FileContent>
{
    let path = path.as_ref();
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

    if metadata.len() > MMAP_THRESHOLD
    {
        trace!(path = %path.display(), len = metadata.len(), "memory-mapping document");
        let file = File::open(path).with_context(|| format!("Failed to open file {}", path.display()))?;

        // Safety: the map is read-only and dropped before the command returns
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to memory-map {}", path.display()))?;

        Ok(FileContent::Mapped(mmap))
    }
    else
    {
        let content = std::fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))?;

        Ok(FileContent::Buffered(content))
    }
}
