//! Core library for the `codesmith` code-intelligence pipeline.
//!
//! The pipeline is a set of deterministic pattern-matching transformations
//! over text: structure extraction ([`analysis`]), security heuristics
//! ([`security`]), test skeletons ([`testgen`]) and canned project
//! templates ([`scaffold`]) packaged into archives ([`archive`]). Shared
//! snippets ([`share`]) and prompt templates ([`prompts`]) persist through
//! the [`ports::Storage`] port. Host project reports ([`project`]) read
//! through the [`ports::FileSystem`] port.

pub mod adapters;
pub mod analysis;
pub mod archive;
pub mod breakdown;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod keywords;
pub mod lang;
pub mod pipeline;
pub mod ports;
pub mod project;
pub mod prompts;
pub mod scaffold;
pub mod security;
pub mod share;
pub mod syntax;
pub mod testgen;

use clap::error::ErrorKind;
use clap::Parser;

pub use error::PipelineError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I, settings: &config::Settings) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command, cli.format, settings)
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::config::Settings;

    fn settings_in(dir: &tempfile::TempDir) -> Settings {
        Settings { store_root: dir.path().to_path_buf(), ..Settings::default() }
    }

    #[test]
    fn run_executes_plan() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(["codesmith", "plan", "build", "a", "ui"], &settings_in(&dir));
        assert!(result.is_ok());
    }

    #[test]
    fn run_scaffold_writes_archive_under_store_root() {
        let dir = tempfile::tempdir().unwrap();
        run(["codesmith", "scaffold", "flask", "api"], &settings_in(&dir)).unwrap();

        let generated: Vec<_> = std::fs::read_dir(dir.path().join("generated")).unwrap().collect();
        assert_eq!(generated.len(), 1);
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(["codesmith", "unknown"], &settings_in(&dir));
        assert!(result.is_err());
    }
}
