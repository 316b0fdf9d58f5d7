//! `codesmith share` and `fetch` commands.

use crate::cli::Format;
use crate::context::ServiceContext;
use crate::pipeline::Pipeline;

use super::render;

/// Execute the `share` command. Prints the new id.
///
/// # Errors
///
/// Returns an error string if the code is blank or cannot be stored.
pub fn run_share(ctx: &ServiceContext, code: &str, language: &str) -> Result<String, String> {
    Pipeline::new(ctx).share(code, language).map_err(|e| e.to_string())
}

/// Execute the `fetch` command.
///
/// # Errors
///
/// Returns an error string if no snippet has that id or it cannot be read.
pub fn run_fetch(ctx: &ServiceContext, id: &str, format: Format) -> Result<String, String> {
    let snippet = Pipeline::new(ctx)
        .fetch(id)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("No shared snippet with id {id}"))?;
    render(&snippet, format)
}
