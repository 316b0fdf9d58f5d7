//! Storage port for persisted artifacts.

use std::fmt;

/// A distinct storage area. Each area maps to its own directory (or
/// namespace) in the backing adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Area {
    /// Shared snippets, one JSON record per id.
    SharedCode,
    /// Packaged project archives.
    Generated,
    /// User-saved prompt templates.
    Prompts,
}

impl Area {
    /// Directory name used by disk-backed adapters.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::SharedCode => "shared_code",
            Self::Generated => "generated",
            Self::Prompts => "prompts",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Key-value storage for persisted artifacts.
///
/// Abstracting storage keeps the snippet store, the archive packager and
/// the prompt library testable without touching the real disk. Names are
/// flat file names within an area; callers never pass path separators.
pub trait Storage: Send + Sync {
    /// Writes `bytes` under `name` in `area`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the area cannot be created or the write fails.
    fn write(
        &self,
        area: Area,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Reads the value stored under `name` in `area`.
    ///
    /// Returns `Ok(None)` when nothing is stored under that name.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry exists but cannot be read.
    fn read(
        &self,
        area: Area,
        name: &str,
    ) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send + Sync>>;

    /// Lists the names stored in `area`, sorted. A missing area is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the area exists but cannot be listed.
    fn list(&self, area: Area) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
