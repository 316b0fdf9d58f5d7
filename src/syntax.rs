//! Lexical rules shared by the structural extractor and the test generator.
//!
//! These are pattern matches over raw text, not a parser. Matches inside
//! string literals or comments are reported like any other.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lang::{Language, SyntaxProfile, PYTHON};

const IDENT: &str = "[A-Za-z_][A-Za-z0-9_]*";
const MODULE: &str = "[A-Za-z_][A-Za-z0-9_.]*";

static PYTHON_SCANNER: Lazy<Result<SourceScanner, String>> =
    Lazy::new(|| SourceScanner::new(&PYTHON).map_err(|e| e.to_string()));

/// A function declaration found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// Declared function name.
    pub name: String,
    /// Raw parameter declarations split on top-level commas, or `None`
    /// when the closing parenthesis was never found.
    pub params: Option<Vec<String>>,
}

/// Compiled lexical rules for one [`SyntaxProfile`].
#[derive(Debug)]
pub struct SourceScanner {
    profile: &'static SyntaxProfile,
    function: Regex,
    class: Regex,
    import: Regex,
    module: Regex,
}

/// Returns the scanner for `language`.
///
/// `None` means the language has no profile. `Some(Err(_))` means the
/// profile's rules failed to compile; callers degrade to empty results.
#[must_use]
pub fn scanner_for(language: &Language) -> Option<Result<&'static SourceScanner, &'static str>> {
    match language {
        Language::Python => Some(PYTHON_SCANNER.as_ref().map_err(String::as_str)),
        Language::Unsupported(_) => None,
    }
}

impl SourceScanner {
    /// Compiles the rules for `profile`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if a profile keyword yields an invalid pattern.
    pub fn new(profile: &'static SyntaxProfile) -> Result<Self, regex::Error> {
        let def = regex::escape(profile.function_keyword);
        let class = regex::escape(profile.class_keyword);
        Ok(Self {
            profile,
            function: Regex::new(&format!(r"\b{def}\s+({IDENT})\s*\("))?,
            class: Regex::new(&format!(r"\b{class}\s+({IDENT})\s*[:(]"))?,
            // A statement starts a line or follows `;` or a block header's `:`.
            import: Regex::new(&format!(
                r"(?:^|[;:])\s*(?:import\s+([^;#]+)|from\s+(\.*(?:{MODULE})?)\s+import\b)"
            ))?,
            module: Regex::new(&format!("^{MODULE}$"))?,
        })
    }

    /// The profile these rules were compiled from.
    #[must_use]
    pub fn profile(&self) -> &'static SyntaxProfile {
        self.profile
    }

    /// Every function declaration in source order.
    #[must_use]
    pub fn function_signatures(&self, code: &str) -> Vec<FunctionSignature> {
        self.function
            .captures_iter(code)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str().to_string();
                let open_end = caps.get(0)?.end();
                let params = enclosed_params(&code[open_end..]).map(split_top_level);
                Some(FunctionSignature { name, params })
            })
            .collect()
    }

    /// Names of declared classes in source order.
    #[must_use]
    pub fn class_names(&self, code: &str) -> Vec<String> {
        self.class.captures_iter(code).map(|caps| caps[1].to_string()).collect()
    }

    /// Imported module names in source order, from both `import a, b`
    /// and `from a import x` forms. Repeats are kept.
    ///
    /// Several statements on one line (`import a; import b`, `try: import
    /// c`) are each collected. Relative modules keep their leading dots,
    /// so `from . import x` yields `.`.
    #[must_use]
    pub fn import_modules(&self, code: &str) -> Vec<String> {
        let mut modules = Vec::new();
        for line in code.lines() {
            for caps in self.import.captures_iter(line) {
                if let Some(names) = caps.get(1) {
                    let names = names
                        .as_str()
                        .split(',')
                        .filter_map(|item| item.split_whitespace().next())
                        .filter(|name| self.module.is_match(name));
                    modules.extend(names.map(String::from));
                } else if let Some(module) = caps.get(2).filter(|m| !m.as_str().is_empty()) {
                    modules.push(module.as_str().to_string());
                }
            }
        }
        modules
    }

    /// Deepest nesting level: leading whitespace columns of non-blank,
    /// non-comment lines divided by the profile's indent unit.
    #[must_use]
    pub fn max_nesting_depth(&self, code: &str) -> usize {
        code.lines()
            .filter(|line| {
                let trimmed = line.trim();
                !trimmed.is_empty() && !trimmed.starts_with(self.profile.comment_prefix)
            })
            .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
            .map(|indent| indent / self.profile.indent_unit.max(1))
            .max()
            .unwrap_or(0)
    }
}

/// Given text that starts just after an opening `(`, returns the text up
/// to the matching `)`. Brackets nest; quoted strings are skipped.
fn enclosed_params(rest: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (idx, c) in rest.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' if depth == 0 => return Some(&rest[..idx]),
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Splits a parameter list on commas that are not inside brackets or
/// strings. Empty pieces are dropped.
fn split_top_level(params: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (idx, c) in params.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&params[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&params[start..]);
    parts.into_iter().map(str::trim).filter(|p| !p.is_empty()).map(String::from).collect()
}
