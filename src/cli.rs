//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `codesmith`.
#[derive(Debug, Parser)]
#[command(name = "codesmith", version, about = "Heuristic code analysis, test scaffolds and project templates")]
pub struct Cli {
    /// Output format for structured results.
    #[arg(long, value_enum, global = true, default_value_t = Format::Json)]
    pub format: Format,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Serialization used when printing structured results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Source code input shared by the analysis commands.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Declared language of the source.
    #[arg(short, long, default_value = "python")]
    pub language: String,
    /// File to read; stdin when omitted or `-`.
    pub file: Option<PathBuf>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract functions, classes, imports and nesting depth.
    Analyze(SourceArgs),
    /// Flag common security anti-patterns.
    Scan(SourceArgs),
    /// Generate unit-test skeletons for public functions.
    Tests(SourceArgs),
    /// Pick a project template from a description and package it.
    Scaffold {
        /// Free-text project description.
        #[arg(required = true, num_args = 1..)]
        spec: Vec<String>,
    },
    /// List the files of a packaged project archive.
    Unpack {
        /// Archive name printed by `scaffold`.
        archive: String,
    },
    /// Store a snippet and print its share id.
    Share(SourceArgs),
    /// Print a shared snippet.
    Fetch {
        /// Share id printed by `share`.
        id: String,
    },
    /// List the directories and files of a project, with per-extension counts.
    Tree {
        /// Project root directory.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Report the dependencies declared by a project's manifests.
    Deps {
        /// Project root directory.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Break a coding task into steps.
    Plan {
        /// Task description.
        #[arg(required = true, num_args = 1..)]
        task: Vec<String>,
    },
    /// Manage saved prompt templates.
    #[command(subcommand)]
    Prompt(PromptCommand),
}

/// Prompt template subcommands.
#[derive(Debug, Subcommand)]
pub enum PromptCommand {
    /// Save a template from a file or stdin.
    Save {
        /// Template name; unsafe characters become `_`.
        name: String,
        /// File to read; stdin when omitted or `-`.
        file: Option<PathBuf>,
    },
    /// List saved templates.
    List,
    /// Print a saved template.
    Show {
        /// Template name.
        name: String,
    },
}
