//! `codesmith tree` and `deps` commands.

use std::path::Path;

use crate::cli::Format;
use crate::context::ServiceContext;
use crate::pipeline::Pipeline;

use super::render;

/// Execute the `tree` command.
///
/// # Errors
///
/// Returns an error string if the path is not a readable directory.
pub fn run_tree(ctx: &ServiceContext, path: &Path, format: Format) -> Result<String, String> {
    let tree = Pipeline::new(ctx).project_structure(path).map_err(|e| e.to_string())?;
    render(&tree, format)
}

/// Execute the `deps` command.
///
/// # Errors
///
/// Returns an error string if the path is not a readable directory or a
/// manifest cannot be read.
pub fn run_deps(ctx: &ServiceContext, path: &Path, format: Format) -> Result<String, String> {
    let deps = Pipeline::new(ctx).project_dependencies(path).map_err(|e| e.to_string())?;
    render(&deps, format)
}
