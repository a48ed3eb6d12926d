use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::engine::types::TableRef;

/// Destination for rendered statement sets, one entry per table.
///
/// An entry is created or replaced whole; no entry is written by more than
/// one pipeline.
pub trait OutputSink: Send + Sync {
    fn write_entry(&self, table: &TableRef, contents: &str) -> io::Result<()>;
}

/// Writes `{db}.{table}.sql` files under a directory.
///
/// Each file is written to a temp file in the same directory and renamed
/// into place, so a failed write leaves any previous file untouched.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, table: &TableRef) -> PathBuf {
        self.dir.join(format!("{}.sql", table.file_stem()))
    }
}

impl OutputSink for FileSink {
    fn write_entry(&self, table: &TableRef, contents: &str) -> io::Result<()> {
        let path = self.path_for(table);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(target: "presplit::writer", path = %path.display(), bytes = contents.len(), "Wrote statement file");
        Ok(())
    }
}
