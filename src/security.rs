//! Security heuristic scanner.
//!
//! Each rule is an independent presence test over the raw text. Rules run
//! in table order and never suppress one another; a rule fires at most
//! once per scan.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lang::Language;

/// Category of a flagged anti-pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// Query text built by string interpolation and passed to `execute`.
    #[serde(rename = "SQL Injection")]
    SqlInjection,
    /// A password literal assigned in source.
    #[serde(rename = "Hardcoded Credentials")]
    HardcodedCredentials,
    /// Dynamic evaluation of code.
    #[serde(rename = "Code Injection")]
    CodeInjection,
    /// Use of a deserializer that can execute arbitrary code.
    #[serde(rename = "Unsafe Deserialization")]
    UnsafeDeserialization,
    /// The scanner itself failed; reported as data rather than a fault.
    #[serde(rename = "Scan Failure")]
    ScanFailure,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SqlInjection => "SQL Injection",
            Self::HardcodedCredentials => "Hardcoded Credentials",
            Self::CodeInjection => "Code Injection",
            Self::UnsafeDeserialization => "Unsafe Deserialization",
            Self::ScanFailure => "Scan Failure",
        })
    }
}

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Informational.
    Low,
    /// Worth reviewing.
    Medium,
    /// Likely exploitable.
    High,
}

/// One flagged finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityIssue {
    /// What was found.
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// How serious it is.
    pub severity: Severity,
    /// Remediation hint.
    pub description: String,
}

/// A named pattern check.
struct SecurityRule {
    name: &'static str,
    pattern: &'static str,
    kind: IssueKind,
    severity: Severity,
    description: &'static str,
}

const RULES: &[SecurityRule] = &[
    SecurityRule {
        name: "sql-interpolation",
        pattern: r#"execute\s*\(\s*(?:['"][^']*%s[^']*['"]\s*%|f['"])"#,
        kind: IssueKind::SqlInjection,
        severity: Severity::High,
        description: "Possible SQL injection vulnerability detected. Use parameterized queries instead.",
    },
    SecurityRule {
        name: "hardcoded-password",
        pattern: r#"(?i)password\s*=\s*['"][^'"]+['"]"#,
        kind: IssueKind::HardcodedCredentials,
        severity: Severity::High,
        description: "Hardcoded password detected. Use environment variables or a secure vault instead.",
    },
    SecurityRule {
        name: "dynamic-evaluation",
        pattern: r"\b(?:eval|exec)\s*\(",
        kind: IssueKind::CodeInjection,
        severity: Severity::High,
        description: "Use of eval()/exec() detected, which can lead to code injection vulnerabilities.",
    },
    SecurityRule {
        name: "unsafe-deserialization",
        pattern: r"\bimport\s+c?[Pp]ickle\b|\bfrom\s+c?[Pp]ickle\s+import\b",
        kind: IssueKind::UnsafeDeserialization,
        severity: Severity::Medium,
        description: "Use of pickle module detected. Be cautious with untrusted data.",
    },
];

struct CompiledRule {
    rule: &'static SecurityRule,
    regex: Regex,
}

static COMPILED: Lazy<Result<Vec<CompiledRule>, String>> = Lazy::new(|| compile(RULES));

fn compile(rules: &'static [SecurityRule]) -> Result<Vec<CompiledRule>, String> {
    rules
        .iter()
        .map(|rule| {
            Regex::new(rule.pattern)
                .map(|regex| CompiledRule { rule, regex })
                .map_err(|e| format!("rule {} failed to compile: {e}", rule.name))
        })
        .collect()
}

/// Scans `code` declared as `language` for known anti-patterns.
///
/// Unsupported languages yield no issues. Never fails: if the rules
/// cannot be compiled, a single High-severity `ScanFailure` issue is
/// returned instead.
#[must_use]
pub fn scan(code: &str, language: &Language) -> Vec<SecurityIssue> {
    if language.profile().is_none() {
        return Vec::new();
    }
    match COMPILED.as_ref() {
        Ok(rules) => run_rules(rules, code),
        Err(err) => {
            tracing::warn!(error = %err, "security rules unavailable");
            vec![failure_issue(err)]
        }
    }
}

fn run_rules(rules: &[CompiledRule], code: &str) -> Vec<SecurityIssue> {
    rules
        .iter()
        .filter(|compiled| compiled.regex.is_match(code))
        .map(|compiled| {
            tracing::debug!(rule = compiled.rule.name, "security rule matched");
            SecurityIssue {
                kind: compiled.rule.kind,
                severity: compiled.rule.severity,
                description: compiled.rule.description.to_string(),
            }
        })
        .collect()
}

fn failure_issue(err: &str) -> SecurityIssue {
    SecurityIssue {
        kind: IssueKind::ScanFailure,
        severity: Severity::High,
        description: format!("Security scan could not complete: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(code: &str) -> Vec<IssueKind> {
        scan(code, &Language::Python).into_iter().map(|i| i.kind).collect()
    }

    #[test]
    fn hardcoded_password_is_single_high_issue() {
        let issues = scan("password = \"hunter2\"", &Language::Python);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::HardcodedCredentials);
        assert_eq!(issues[0].severity, Severity::High);
    }

    #[test]
    fn password_match_is_case_insensitive() {
        assert_eq!(kinds("DB_PASSWORD = 'x'"), vec![IssueKind::HardcodedCredentials]);
    }

    #[test]
    fn password_comparison_is_not_flagged() {
        assert!(kinds("if password == \"\":\n    pass\n").is_empty());
    }

    #[test]
    fn percent_formatted_query_is_flagged() {
        let code = "cur.execute(\"SELECT * FROM users WHERE id = %s\" % user_id)";
        assert_eq!(kinds(code), vec![IssueKind::SqlInjection]);
    }

    #[test]
    fn f_string_query_is_flagged() {
        let code = "cur.execute(f\"SELECT * FROM users WHERE id = {user_id}\")";
        assert_eq!(kinds(code), vec![IssueKind::SqlInjection]);
    }

    #[test]
    fn parameterized_query_is_clean() {
        let code = "cur.execute(\"SELECT * FROM users WHERE id = %s\", (user_id,))";
        assert!(kinds(code).is_empty());
    }

    #[test]
    fn eval_and_exec_are_flagged_but_literal_eval_is_not() {
        assert_eq!(kinds("eval(user_input)"), vec![IssueKind::CodeInjection]);
        assert_eq!(kinds("exec (src)"), vec![IssueKind::CodeInjection]);
        assert!(kinds("ast.literal_eval(text)").is_empty());
    }

    #[test]
    fn pickle_imports_are_medium() {
        let issues = scan("import pickle\n", &Language::Python);
        assert_eq!(issues[0].kind, IssueKind::UnsafeDeserialization);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(kinds("from pickle import loads\n"), vec![IssueKind::UnsafeDeserialization]);
        assert!(kinds("import pickletools\n").is_empty());
    }

    #[test]
    fn all_rules_fire_in_table_order() {
        let code = "import pickle\npassword = 'p'\neval(x)\ncur.execute('DELETE %s' % x)\n";
        assert_eq!(
            kinds(code),
            vec![
                IssueKind::SqlInjection,
                IssueKind::HardcodedCredentials,
                IssueKind::CodeInjection,
                IssueKind::UnsafeDeserialization,
            ]
        );
    }

    #[test]
    fn repeated_pattern_fires_once() {
        assert_eq!(kinds("eval(a)\neval(b)\n").len(), 1);
    }

    #[test]
    fn clean_code_has_no_issues() {
        assert!(kinds("def add(a, b):\n    return a + b\n").is_empty());
    }

    #[test]
    fn unsupported_language_has_no_issues() {
        assert!(scan("eval(x)", &Language::from_name("javascript")).is_empty());
    }

    #[test]
    fn every_rule_compiles() {
        assert_eq!(compile(RULES).unwrap().len(), RULES.len());
    }

    #[test]
    fn broken_rule_degrades_to_failure_issue() {
        static BROKEN: &[SecurityRule] = &[SecurityRule {
            name: "broken",
            pattern: "(",
            kind: IssueKind::CodeInjection,
            severity: Severity::Low,
            description: "",
        }];
        let err = compile(BROKEN).err().unwrap();
        let issue = failure_issue(&err);
        assert_eq!(issue.kind, IssueKind::ScanFailure);
        assert_eq!(issue.severity, Severity::High);
        assert!(issue.description.contains("broken"));
    }

    #[test]
    fn issue_serializes_with_display_names() {
        let json = serde_json::to_value(&scan("eval(x)", &Language::Python)[0]).unwrap();
        assert_eq!(json["type"], "Code Injection");
        assert_eq!(json["severity"], "High");
    }
}
