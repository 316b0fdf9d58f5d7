//! Structural extractor: functions, classes, imports and nesting depth.
//!
//! `complexity` is the maximum indentation depth, not a cyclomatic
//! measure. The suggestion thresholds key off that exact value.

use serde::{Deserialize, Serialize};

use crate::lang::Language;
use crate::syntax::scanner_for;

/// Identifiers and size of a source blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    /// Function names in source order.
    pub functions: Vec<String>,
    /// Class names in source order.
    pub classes: Vec<String>,
    /// Imported module names in source order, repeats kept.
    pub imports: Vec<String>,
    /// Number of lines.
    pub loc: usize,
}

/// Result of [`analyze`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAnalysisResult {
    /// Maximum nesting depth (indent columns / indent unit).
    pub complexity: usize,
    /// Extracted identifiers.
    pub structure: Structure,
    /// Advisory messages, in rule order.
    pub suggestions: Vec<String>,
}

/// Inputs a suggestion rule can look at.
struct Metrics<'a> {
    depth: usize,
    structure: &'a Structure,
}

/// A named advisory threshold.
struct SuggestionRule {
    name: &'static str,
    applies: fn(&Metrics<'_>) -> bool,
    message: &'static str,
}

/// Deepest nesting tolerated before a readability suggestion.
pub const MAX_NESTING: usize = 4;
/// Most functions tolerated before a modularization suggestion.
pub const MAX_FUNCTIONS: usize = 10;

const SUGGESTION_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        name: "deep-nesting",
        applies: |m| m.depth > MAX_NESTING,
        message: "Consider refactoring deeply nested code for better readability",
    },
    SuggestionRule {
        name: "too-many-functions",
        applies: |m| m.structure.functions.len() > MAX_FUNCTIONS,
        message: "Consider splitting into multiple modules for better organization",
    },
];

/// Extracts structure from `code` declared as `language`.
///
/// Unsupported languages yield an empty result with `complexity = 0`.
/// Never fails.
#[must_use]
pub fn analyze(code: &str, language: &Language) -> CodeAnalysisResult {
    let scanner = match scanner_for(language) {
        None => return CodeAnalysisResult::default(),
        Some(Ok(scanner)) => scanner,
        Some(Err(err)) => {
            tracing::warn!(%language, error = err, "structure rules unavailable; returning empty analysis");
            return CodeAnalysisResult::default();
        }
    };

    let depth = scanner.max_nesting_depth(code);
    let structure = Structure {
        functions: scanner.function_signatures(code).into_iter().map(|sig| sig.name).collect(),
        classes: scanner.class_names(code),
        imports: scanner.import_modules(code),
        loc: code.lines().count(),
    };

    let metrics = Metrics { depth, structure: &structure };
    let suggestions = SUGGESTION_RULES
        .iter()
        .filter(|rule| (rule.applies)(&metrics))
        .inspect(|rule| tracing::debug!(rule = rule.name, "suggestion rule fired"))
        .map(|rule| rule.message.to_string())
        .collect();

    CodeAnalysisResult { complexity: depth, structure, suggestions }
}
