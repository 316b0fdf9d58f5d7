//! Command dispatch and handlers.
//!
//! Handlers take a [`ServiceContext`] and return the text to print, so
//! they can be exercised against the in-memory adapters.

pub mod analyze;
pub mod plan;
pub mod project;
pub mod prompt;
pub mod scaffold;
pub mod share;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::cli::{Command, Format};
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command against live adapters.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command, format: Format, settings: &Settings) -> Result<(), String> {
    let ctx = ServiceContext::live(settings);
    let output = dispatch_with_context(command, format, &ctx)?;
    println!("{output}");
    Ok(())
}

/// Dispatch a command with the given service context and return its output.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    format: Format,
    ctx: &ServiceContext,
) -> Result<String, String> {
    match command {
        Command::Analyze(args) => {
            analyze::run_analyze(ctx, &read_source(args.file.as_deref())?, &args.language, format)
        }
        Command::Scan(args) => {
            analyze::run_scan(ctx, &read_source(args.file.as_deref())?, &args.language, format)
        }
        Command::Tests(args) => {
            analyze::run_tests(ctx, &read_source(args.file.as_deref())?, &args.language)
        }
        Command::Scaffold { spec } => scaffold::run(ctx, &spec.join(" "), format),
        Command::Unpack { archive } => scaffold::run_unpack(ctx, archive, format),
        Command::Share(args) => share::run_share(ctx, &read_source(args.file.as_deref())?, &args.language),
        Command::Fetch { id } => share::run_fetch(ctx, id, format),
        Command::Tree { path } => project::run_tree(ctx, path, format),
        Command::Deps { path } => project::run_deps(ctx, path, format),
        Command::Plan { task } => plan::run(ctx, &task.join(" "), format),
        Command::Prompt(sub) => prompt::run(ctx, sub),
    }
}

/// Reads source text from `path`, or stdin when `path` is absent or `-`.
pub(crate) fn read_source(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .map_err(|e| format!("Failed to read {}: {e}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

/// Serializes a structured result in the requested format.
pub(crate) fn render<T: Serialize>(value: &T, format: Format) -> Result<String, String> {
    match format {
        Format::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("Failed to serialize result as JSON: {e}")),
        Format::Yaml => serde_yaml::to_string(value)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|e| format!("Failed to serialize result as YAML: {e}")),
    }
}
