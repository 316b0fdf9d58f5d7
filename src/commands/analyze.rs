//! `codesmith analyze`, `scan` and `tests` commands.

use crate::cli::Format;
use crate::context::ServiceContext;
use crate::pipeline::Pipeline;

use super::render;

/// Execute the `analyze` command.
///
/// # Errors
///
/// Returns an error string if the input is blank or serialization fails.
pub fn run_analyze(
    ctx: &ServiceContext,
    code: &str,
    language: &str,
    format: Format,
) -> Result<String, String> {
    let result = Pipeline::new(ctx).analyze(code, language).map_err(|e| e.to_string())?;
    render(&result, format)
}

/// Execute the `scan` command.
///
/// # Errors
///
/// Returns an error string if the input is blank or serialization fails.
pub fn run_scan(
    ctx: &ServiceContext,
    code: &str,
    language: &str,
    format: Format,
) -> Result<String, String> {
    let issues = Pipeline::new(ctx).scan(code, language).map_err(|e| e.to_string())?;
    render(&issues, format)
}

/// Execute the `tests` command. Prints the generated source as-is.
///
/// # Errors
///
/// Returns an error string if the input is blank.
pub fn run_tests(ctx: &ServiceContext, code: &str, language: &str) -> Result<String, String> {
    Pipeline::new(ctx).generate_tests(code, language).map_err(|e| e.to_string())
}
