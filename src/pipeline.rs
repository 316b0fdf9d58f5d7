//! Call-and-return actions over the pipeline components.
//!
//! Each method is one externally reachable action: it validates its named
//! inputs, then delegates. Analysis actions are best-effort and only fail
//! on blank input; storage actions fail with typed faults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{self, CodeAnalysisResult};
use crate::archive;
use crate::breakdown::{self, PlanStep};
use crate::context::ServiceContext;
use crate::error::PipelineError;
use crate::lang::Language;
use crate::project::{self, ProjectDependencies, ProjectStructure};
use crate::prompts::PromptLibrary;
use crate::scaffold::{FileSet, Template};
use crate::security::{self, SecurityIssue};
use crate::share::{SharedSnippet, SnippetStore};
use crate::testgen;

/// Result of [`Pipeline::scaffold_archive`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldOutcome {
    /// Template the description selected.
    pub template: Template,
    /// Paths packaged, in archive order.
    pub files: Vec<String>,
    /// Name of the archive in the `generated` area.
    pub archive: String,
}

/// Entry point for every pipeline action.
pub struct Pipeline<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over the given ports.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Extracts structure and nesting depth.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `code` is blank.
    pub fn analyze(&self, code: &str, language: &str) -> Result<CodeAnalysisResult, PipelineError> {
        require("code", code)?;
        Ok(analysis::analyze(code, &Language::from_name(language)))
    }

    /// Flags security anti-patterns.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `code` is blank.
    pub fn scan(&self, code: &str, language: &str) -> Result<Vec<SecurityIssue>, PipelineError> {
        require("code", code)?;
        Ok(security::scan(code, &Language::from_name(language)))
    }

    /// Generates test skeletons.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `code` is blank.
    pub fn generate_tests(&self, code: &str, language: &str) -> Result<String, PipelineError> {
        require("code", code)?;
        Ok(testgen::generate_tests(code, &Language::from_name(language)))
    }

    /// Scaffolds a project from a description and packages it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `project_spec` is blank and `Storage` if
    /// the archive cannot be written.
    pub fn scaffold_archive(&self, project_spec: &str) -> Result<ScaffoldOutcome, PipelineError> {
        require("project_spec", project_spec)?;
        let template = Template::select(project_spec);
        let files: FileSet = template.files();
        let archive = archive::package(self.ctx, &files)?;
        Ok(ScaffoldOutcome { template, files: files.into_keys().collect(), archive })
    }

    /// Reads back a packaged archive; `Ok(None)` if unknown.
    ///
    /// # Errors
    ///
    /// Returns `Storage` or `CorruptEntry` on read/decode failure.
    pub fn open_archive(&self, name: &str) -> Result<Option<FileSet>, PipelineError> {
        archive::open(self.ctx, name)
    }

    /// Shares a snippet and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `code` is blank and `Storage` if the
    /// snippet cannot be written.
    pub fn share(&self, code: &str, language: &str) -> Result<String, PipelineError> {
        require("code", code)?;
        SnippetStore::new(self.ctx).put(code, language)
    }

    /// Fetches a shared snippet; `Ok(None)` if unknown.
    ///
    /// # Errors
    ///
    /// Returns `Storage` or `CorruptEntry` on read/decode failure.
    pub fn fetch(&self, id: &str) -> Result<Option<SharedSnippet>, PipelineError> {
        SnippetStore::new(self.ctx).get(id.trim())
    }

    /// Breaks a task description into steps.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `task` is blank.
    pub fn break_down(&self, task: &str) -> Result<Vec<PlanStep>, PipelineError> {
        require("task", task)?;
        Ok(breakdown::break_down(task))
    }

    /// Inventories the directories and files of a host project.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `root` is empty or not a readable
    /// directory.
    pub fn project_structure(&self, root: &Path) -> Result<ProjectStructure, PipelineError> {
        require("project path", &root.to_string_lossy())?;
        project::structure(self.ctx, root)
    }

    /// Reads the dependency manifests of a host project.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `root` is empty or not a readable
    /// directory, and `Filesystem` if a manifest cannot be read.
    pub fn project_dependencies(&self, root: &Path) -> Result<ProjectDependencies, PipelineError> {
        require("project path", &root.to_string_lossy())?;
        project::dependencies(self.ctx, root)
    }

    /// The prompt template library.
    #[must_use]
    pub fn prompts(&self) -> PromptLibrary<'a> {
        PromptLibrary::new(self.ctx)
    }
}

fn require(field: &str, value: &str) -> Result<(), PipelineError> {
    if value.trim().is_empty() {
        return Err(PipelineError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_inputs_are_invalid() {
        let ctx = ServiceContext::in_memory();
        let pipeline = Pipeline::new(&ctx);

        assert!(matches!(pipeline.analyze("", "python"), Err(PipelineError::InvalidInput(_))));
        assert!(matches!(pipeline.scan(" \n", "python"), Err(PipelineError::InvalidInput(_))));
        assert!(matches!(pipeline.generate_tests("", "python"), Err(PipelineError::InvalidInput(_))));
        assert!(matches!(pipeline.scaffold_archive("\t"), Err(PipelineError::InvalidInput(_))));
        assert!(matches!(pipeline.share("", "python"), Err(PipelineError::InvalidInput(_))));
        assert!(matches!(pipeline.break_down(""), Err(PipelineError::InvalidInput(_))));
        assert!(matches!(pipeline.project_structure(Path::new("")), Err(PipelineError::InvalidInput(_))));
        assert!(matches!(pipeline.project_dependencies(Path::new("")), Err(PipelineError::InvalidInput(_))));
    }

    #[test]
    fn unsupported_language_is_not_a_fault() {
        let ctx = ServiceContext::in_memory();
        let pipeline = Pipeline::new(&ctx);

        assert_eq!(pipeline.analyze("x", "haskell").unwrap(), CodeAnalysisResult::default());
        assert!(pipeline.scan("eval(x)", "haskell").unwrap().is_empty());
        assert_eq!(pipeline.generate_tests("def f(): pass", "haskell").unwrap(), testgen::UNSUPPORTED_LANGUAGE);
    }

    #[test]
    fn scaffold_archive_packages_selected_template() {
        let ctx = ServiceContext::in_memory();
        let pipeline = Pipeline::new(&ctx);

        let outcome = pipeline.scaffold_archive("build a react app").unwrap();

        assert_eq!(outcome.template, Template::FrontEnd);
        assert_eq!(outcome.files, vec!["README.md", "app.js", "index.html"]);
        let files = pipeline.open_archive(&outcome.archive).unwrap().unwrap();
        assert_eq!(files, Template::FrontEnd.files());
    }

    #[test]
    fn share_then_fetch() {
        let ctx = ServiceContext::in_memory();
        let pipeline = Pipeline::new(&ctx);

        let id = pipeline.share("print('hi')", "python").unwrap();
        let snippet = pipeline.fetch(&id).unwrap().unwrap();

        assert_eq!(snippet.code, "print('hi')");
        assert!(pipeline.fetch("zzzzzzzz").unwrap().is_none());
    }

    #[test]
    fn project_reports_read_through_filesystem_port() {
        use crate::adapters::memory::MemoryFileSystem;

        let fs = MemoryFileSystem::new()
            .with_file("/app/requirements.txt", "flask\n")
            .with_file("/app/app.py", "");
        let ctx = ServiceContext { fs: Box::new(fs), ..ServiceContext::in_memory() };
        let pipeline = Pipeline::new(&ctx);

        let tree = pipeline.project_structure(Path::new("/app")).unwrap();
        let deps = pipeline.project_dependencies(Path::new("/app")).unwrap();

        assert_eq!(tree.files, vec!["app.py", "requirements.txt"]);
        assert_eq!(deps.python.unwrap().dependencies.unwrap(), vec!["flask"]);
    }
}
