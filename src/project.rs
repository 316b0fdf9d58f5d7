//! Host project reports: a file inventory and the declared dependencies.
//!
//! Both read through the [`FileSystem`](crate::ports::FileSystem) port.
//! Names starting with `.` are skipped and hidden directories are never
//! entered.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::ServiceContext;
use crate::error::PipelineError;

/// Counts over a [`ProjectStructure`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Number of directories listed.
    pub total_directories: usize,
    /// Number of files listed.
    pub total_files: usize,
    /// Lowercased extension including its dot (`.py`) to file count.
    /// Files without an extension are not counted here.
    pub file_types: BTreeMap<String, usize>,
}

/// Inventory of a project directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStructure {
    /// Directory paths relative to the root, `/`-separated.
    pub directories: Vec<String>,
    /// File paths relative to the root, `/`-separated.
    pub files: Vec<String>,
    /// Totals and per-extension counts.
    pub summary: ProjectSummary,
}

/// Walks `root` and lists its directories and files.
///
/// Each directory's own entries come before those of its sub-directories;
/// within a directory, names are sorted. A sub-directory that cannot be
/// listed is skipped with a warning.
///
/// # Errors
///
/// Returns `InvalidInput` if `root` is not a readable directory.
pub fn structure(ctx: &ServiceContext, root: &Path) -> Result<ProjectStructure, PipelineError> {
    let entries = list_root(ctx, root)?;
    let mut out = ProjectStructure::default();
    walk(ctx, root, "", entries, &mut out);
    out.summary.total_directories = out.directories.len();
    out.summary.total_files = out.files.len();
    tracing::debug!(
        root = %root.display(),
        directories = out.summary.total_directories,
        files = out.summary.total_files,
        "project inventoried"
    );
    Ok(out)
}

fn list_root(ctx: &ServiceContext, root: &Path) -> Result<Vec<String>, PipelineError> {
    ctx.fs.list_dir(root).map_err(|e| {
        PipelineError::InvalidInput(format!("not a readable project directory: {}: {e}", root.display()))
    })
}

fn walk(ctx: &ServiceContext, dir: &Path, rel: &str, entries: Vec<String>, out: &mut ProjectStructure) {
    let mut subdirs = Vec::new();
    for name in entries.into_iter().filter(|name| !name.starts_with('.')) {
        let rel_path = if rel.is_empty() { name.clone() } else { format!("{rel}/{name}") };
        if ctx.fs.is_dir(&dir.join(&name)) {
            out.directories.push(rel_path.clone());
            subdirs.push((name, rel_path));
        } else {
            if let Some(ext) = extension(&name) {
                *out.summary.file_types.entry(ext).or_default() += 1;
            }
            out.files.push(rel_path);
        }
    }
    for (name, rel_path) in subdirs {
        let path = dir.join(name);
        match ctx.fs.list_dir(&path) {
            Ok(entries) => walk(ctx, &path, &rel_path, entries, out),
            Err(e) => tracing::warn!(dir = %path.display(), error = %e, "skipping unreadable directory"),
        }
    }
}

fn extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    (!ext.is_empty()).then(|| format!(".{}", ext.to_lowercase()))
}

/// Python manifest kinds, in detection precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PythonManifest {
    /// One requirement per line.
    #[serde(rename = "requirements.txt")]
    Requirements,
    /// Detected only; not parsed.
    #[serde(rename = "Pipfile")]
    Pipfile,
    /// Detected only; not parsed.
    #[serde(rename = "setup.py")]
    SetupPy,
}

impl PythonManifest {
    const PRECEDENCE: [Self; 3] = [Self::Requirements, Self::Pipfile, Self::SetupPy];

    /// File name looked for in the project root.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Requirements => "requirements.txt",
            Self::Pipfile => "Pipfile",
            Self::SetupPy => "setup.py",
        }
    }
}

/// Python dependencies from the first manifest found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonDependencies {
    /// Which manifest was found.
    #[serde(rename = "type")]
    pub manifest: PythonManifest,
    /// Requirement lines, or `None` when the manifest is only detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

/// JavaScript dependencies from `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JavaScriptDependencies {
    /// `dependencies`, name to version spec.
    pub dependencies: BTreeMap<String, serde_json::Value>,
    /// `devDependencies`, name to version spec.
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
    /// Set when the manifest could not be parsed; both maps are then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Declared dependencies of a project; `None` where no manifest exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDependencies {
    /// From `requirements.txt`, `Pipfile` or `setup.py`.
    pub python: Option<PythonDependencies>,
    /// From `package.json`.
    pub javascript: Option<JavaScriptDependencies>,
}

#[derive(Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

const PACKAGE_JSON: &str = "package.json";

/// Reads the dependency manifests in the root of `root`.
///
/// A malformed `package.json` is reported in the result, not as a fault.
///
/// # Errors
///
/// Returns `InvalidInput` if `root` is not a readable directory and
/// `Filesystem` if a manifest exists but cannot be read.
pub fn dependencies(ctx: &ServiceContext, root: &Path) -> Result<ProjectDependencies, PipelineError> {
    list_root(ctx, root)?;
    let python = match PythonManifest::PRECEDENCE.into_iter().find(|m| ctx.fs.exists(&root.join(m.file_name()))) {
        Some(PythonManifest::Requirements) => {
            let text = read(ctx, &root.join(PythonManifest::Requirements.file_name()))?;
            Some(PythonDependencies {
                manifest: PythonManifest::Requirements,
                dependencies: Some(requirement_lines(&text)),
            })
        }
        Some(manifest) => Some(PythonDependencies { manifest, dependencies: None }),
        None => None,
    };

    let package_json = root.join(PACKAGE_JSON);
    let javascript = if ctx.fs.exists(&package_json) {
        Some(parse_package_json(&read(ctx, &package_json)?))
    } else {
        None
    };

    Ok(ProjectDependencies { python, javascript })
}

fn read(ctx: &ServiceContext, path: &Path) -> Result<String, PipelineError> {
    ctx.fs
        .read_to_string(path)
        .map_err(|e| PipelineError::filesystem(format!("reading {}", path.display()), e))
}

fn requirement_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

fn parse_package_json(text: &str) -> JavaScriptDependencies {
    match serde_json::from_str::<PackageManifest>(text) {
        Ok(manifest) => JavaScriptDependencies {
            dependencies: manifest.dependencies,
            dev_dependencies: manifest.dev_dependencies,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "package.json could not be parsed");
            JavaScriptDependencies { error: Some(format!("Invalid JSON format: {e}")), ..Default::default() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;

    fn context(fs: MemoryFileSystem) -> ServiceContext {
        ServiceContext { fs: Box::new(fs), ..ServiceContext::in_memory() }
    }

    #[test]
    fn inventory_lists_directories_then_descends() {
        let ctx = context(
            MemoryFileSystem::new()
                .with_file("/proj/app.py", "")
                .with_file("/proj/README.md", "")
                .with_file("/proj/src/models.py", "")
                .with_file("/proj/src/views/home.PY", "")
                .with_file("/proj/static/site.css", "")
                .with_file("/proj/Makefile", ""),
        );

        let tree = structure(&ctx, Path::new("/proj")).unwrap();

        assert_eq!(tree.directories, vec!["src", "static", "src/views"]);
        assert_eq!(
            tree.files,
            vec!["Makefile", "README.md", "app.py", "src/models.py", "src/views/home.PY", "static/site.css"]
        );
        assert_eq!(tree.summary.total_directories, 3);
        assert_eq!(tree.summary.total_files, 6);
        let counts: Vec<(&str, usize)> =
            tree.summary.file_types.iter().map(|(ext, n)| (ext.as_str(), *n)).collect();
        assert_eq!(counts, vec![(".css", 1), (".md", 1), (".py", 3)]);
    }

    #[test]
    fn hidden_entries_are_skipped() {
        let ctx = context(
            MemoryFileSystem::new()
                .with_file("/proj/.env", "SECRET=1")
                .with_file("/proj/.git/config", "")
                .with_file("/proj/main.py", ""),
        );

        let tree = structure(&ctx, Path::new("/proj")).unwrap();

        assert!(tree.directories.is_empty());
        assert_eq!(tree.files, vec!["main.py"]);
    }

    #[test]
    fn empty_directory_is_listed() {
        let ctx = context(MemoryFileSystem::new().with_dir("/proj/empty"));
        let tree = structure(&ctx, Path::new("/proj")).unwrap();
        assert_eq!(tree.directories, vec!["empty"]);
        assert!(tree.files.is_empty());
    }

    #[test]
    fn missing_or_file_root_is_invalid_input() {
        let ctx = context(MemoryFileSystem::new().with_file("/proj/a.py", ""));
        for root in ["/nowhere", "/proj/a.py"] {
            let err = structure(&ctx, Path::new(root)).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidInput(_)), "{root}");
            assert!(matches!(dependencies(&ctx, Path::new(root)), Err(PipelineError::InvalidInput(_))));
        }
    }

    #[test]
    fn requirements_lines_skip_blanks_and_comments() {
        let ctx = context(
            MemoryFileSystem::new()
                .with_file("/proj/requirements.txt", "# web\nflask==2.0.1\n\n  requests>=2  \n#pinned\n")
                .with_file("/proj/setup.py", ""),
        );

        let deps = dependencies(&ctx, Path::new("/proj")).unwrap();

        let python = deps.python.unwrap();
        assert_eq!(python.manifest, PythonManifest::Requirements);
        assert_eq!(python.dependencies.unwrap(), vec!["flask==2.0.1", "requests>=2"]);
        assert!(deps.javascript.is_none());
    }

    #[test]
    fn pipfile_wins_over_setup_py_and_is_detected_only() {
        let ctx = context(
            MemoryFileSystem::new().with_file("/proj/Pipfile", "[packages]\n").with_file("/proj/setup.py", ""),
        );

        let python = dependencies(&ctx, Path::new("/proj")).unwrap().python.unwrap();

        assert_eq!(python, PythonDependencies { manifest: PythonManifest::Pipfile, dependencies: None });
        let json = serde_json::to_value(&python).unwrap();
        assert_eq!(json, serde_json::json!({"type": "Pipfile"}));
    }

    #[test]
    fn package_json_dependencies_are_read() {
        let manifest = r#"{"name": "web", "dependencies": {"react": "^18.2.0"}, "devDependencies": {"jest": "29"}}"#;
        let ctx = context(MemoryFileSystem::new().with_file("/proj/package.json", manifest));

        let deps = dependencies(&ctx, Path::new("/proj")).unwrap();

        assert!(deps.python.is_none());
        let js = deps.javascript.unwrap();
        assert_eq!(js.dependencies["react"], "^18.2.0");
        assert_eq!(js.dev_dependencies["jest"], "29");
        assert!(js.error.is_none());
    }

    #[test]
    fn package_json_without_dependency_sections_is_empty() {
        let ctx = context(MemoryFileSystem::new().with_file("/proj/package.json", r#"{"name": "bare"}"#));
        let js = dependencies(&ctx, Path::new("/proj")).unwrap().javascript.unwrap();
        assert_eq!(js, JavaScriptDependencies::default());
    }

    #[test]
    fn malformed_package_json_is_reported_not_raised() {
        let ctx = context(MemoryFileSystem::new().with_file("/proj/package.json", "{ not json"));

        let js = dependencies(&ctx, Path::new("/proj")).unwrap().javascript.unwrap();

        assert!(js.dependencies.is_empty());
        assert!(js.error.unwrap().starts_with("Invalid JSON format"));
    }

    #[test]
    fn unreadable_manifest_is_a_filesystem_fault() {
        // A directory named like the manifest exists but cannot be read as text.
        let ctx = context(MemoryFileSystem::new().with_dir("/proj/requirements.txt"));
        let err = dependencies(&ctx, Path::new("/proj")).unwrap_err();
        assert!(matches!(err, PipelineError::Filesystem { .. }));
    }

    #[test]
    fn project_without_manifests_reports_nothing() {
        let ctx = context(MemoryFileSystem::new().with_file("/proj/main.py", ""));
        let deps = dependencies(&ctx, Path::new("/proj")).unwrap();
        assert_eq!(deps, ProjectDependencies::default());
        assert_eq!(
            serde_json::to_value(&deps).unwrap(),
            serde_json::json!({"python": null, "javascript": null})
        );
    }
}
