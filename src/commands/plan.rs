//! `codesmith plan` command.

use crate::cli::Format;
use crate::context::ServiceContext;
use crate::pipeline::Pipeline;

use super::render;

/// Execute the `plan` command.
///
/// # Errors
///
/// Returns an error string if the task is blank.
pub fn run(ctx: &ServiceContext, task: &str, format: Format) -> Result<String, String> {
    let steps = Pipeline::new(ctx).break_down(task).map_err(|e| e.to_string())?;
    render(&steps, format)
}
