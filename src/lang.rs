//! Declared source languages and their syntax profiles.

use std::fmt;

/// Lexical conventions of a supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxProfile {
    /// Keyword introducing a function declaration.
    pub function_keyword: &'static str,
    /// Keyword introducing a class declaration.
    pub class_keyword: &'static str,
    /// Prefix of a full-line comment.
    pub comment_prefix: &'static str,
    /// Columns per nesting level.
    pub indent_unit: usize,
}

/// Profile for Python sources.
pub const PYTHON: SyntaxProfile =
    SyntaxProfile { function_keyword: "def", class_keyword: "class", comment_prefix: "#", indent_unit: 4 };

/// A language as declared by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    /// Python, the only language with a syntax profile.
    Python,
    /// Any other declared name, kept verbatim for messages.
    Unsupported(String),
}

impl Language {
    /// Parses a declared language name (case-insensitive, trimmed).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Self::Python,
            _ => Self::Unsupported(name.to_string()),
        }
    }

    /// Returns the syntax profile, or `None` for unsupported languages.
    #[must_use]
    pub fn profile(&self) -> Option<&'static SyntaxProfile> {
        match self {
            Self::Python => Some(&PYTHON),
            Self::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => f.write_str("python"),
            Self::Unsupported(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_aliases_are_recognised() {
        assert_eq!(Language::from_name("python"), Language::Python);
        assert_eq!(Language::from_name(" Python "), Language::Python);
        assert_eq!(Language::from_name("py"), Language::Python);
    }

    #[test]
    fn other_names_have_no_profile() {
        let lang = Language::from_name("Rust");
        assert_eq!(lang, Language::Unsupported("Rust".to_string()));
        assert!(lang.profile().is_none());
        assert_eq!(lang.to_string(), "Rust");
    }
}
