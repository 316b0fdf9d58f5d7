//! In-memory filesystem fixture.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::filesystem::FileSystem;

#[derive(Default)]
struct Tree {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl Tree {
    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

/// A file tree held in memory. Adding a file creates its parent
/// directories.
#[derive(Default)]
pub struct MemoryFileSystem {
    tree: Mutex<Tree>,
}

impl MemoryFileSystem {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous contents.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        let path = path.into();
        if let Ok(mut tree) = self.tree.lock() {
            tree.add_ancestors(&path);
            tree.files.insert(path, contents.to_string());
        }
        self
    }

    /// Adds an empty directory.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Ok(mut tree) = self.tree.lock() {
            tree.add_ancestors(&path);
            tree.dirs.insert(path);
        }
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let tree = self.tree.lock().map_err(|_| "memory filesystem lock poisoned")?;
        tree.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no such file: {}", path.display()).into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.tree
            .lock()
            .is_ok_and(|tree| tree.files.contains_key(path) || tree.dirs.contains(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.tree.lock().is_ok_and(|tree| tree.dirs.contains(path))
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let tree = self.tree.lock().map_err(|_| "memory filesystem lock poisoned")?;
        if !tree.dirs.contains(path) {
            return Err(format!("not a directory: {}", path.display()).into());
        }
        let children = tree.files.keys().chain(tree.dirs.iter());
        let names: BTreeSet<String> = children
            .filter(|child| child.parent() == Some(path))
            .filter_map(|child| child.file_name()?.to_str().map(String::from))
            .collect();
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_create_their_parent_directories() {
        let fs = MemoryFileSystem::new().with_file("/proj/src/app.py", "print(1)\n").with_dir("/proj/docs");

        assert!(fs.is_dir(Path::new("/proj")));
        assert!(fs.is_dir(Path::new("/proj/src")));
        assert!(!fs.is_dir(Path::new("/proj/src/app.py")));
        assert!(fs.exists(Path::new("/proj/src/app.py")));
        assert_eq!(fs.list_dir(Path::new("/proj")).unwrap(), vec!["docs", "src"]);
        assert_eq!(fs.read_to_string(Path::new("/proj/src/app.py")).unwrap(), "print(1)\n");
    }

    #[test]
    fn missing_entries_are_errors() {
        let fs = MemoryFileSystem::new().with_file("/proj/a.txt", "");

        assert!(fs.read_to_string(Path::new("/proj/b.txt")).is_err());
        assert!(fs.list_dir(Path::new("/proj/a.txt")).is_err());
        assert!(!fs.exists(Path::new("/other")));
    }
}
