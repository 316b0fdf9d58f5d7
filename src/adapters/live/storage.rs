//! Live storage adapter backed by a directory tree on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::Builder;

use crate::ports::storage::{Area, Storage};

/// Name prefix of in-flight temporary files; [`Storage::list`] hides them.
const TMP_PREFIX: &str = ".codesmith-tmp";

/// Disk storage rooted at a directory, one sub-directory per [`Area`].
///
/// Writes go to a temporary file in the destination directory and are
/// renamed into place, so a concurrent reader sees either the previous
/// value or the complete new one.
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    /// Creates a storage adapter rooted at `root`. Nothing is created on
    /// disk until the first write.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf() }
    }

    /// Returns the absolute-or-relative path an entry is stored at.
    #[must_use]
    pub fn path_of(&self, area: Area, name: &str) -> PathBuf {
        self.root.join(area.dir_name()).join(name)
    }
}

impl Storage for DiskStorage {
    fn write(
        &self,
        area: Area,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let dir = self.root.join(area.dir_name());
        std::fs::create_dir_all(&dir)?;
        let mut tmp = Builder::new().prefix(TMP_PREFIX).tempfile_in(&dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(dir.join(name)).map_err(|e| e.error)?;
        Ok(())
    }

    fn read(
        &self,
        area: Area,
        name: &str,
    ) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send + Sync>> {
        match std::fs::read(self.path_of(area, name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, area: Area) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let dir = self.root.join(area.dir_name());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with(TMP_PREFIX) {
                    entries.push(name.to_string());
                }
            }
        }
        entries.sort();
        Ok(entries)
    }
}
