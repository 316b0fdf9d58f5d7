//! Case-insensitive keyword selection over the words of a description.

use std::collections::HashSet;

/// How a rule keyword is compared with the words of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordMatch {
    /// The word equals the keyword.
    Whole,
    /// The word starts with the keyword, so `apis` and `reactjs` count
    /// for `api` and `react` while `unreactive` does not.
    Prefix,
}

impl WordMatch {
    fn matches(self, word: &str, keyword: &str) -> bool {
        match self {
            Self::Whole => word == keyword,
            Self::Prefix => word.starts_with(keyword),
        }
    }
}

/// Selects `target` when every clause has at least one of its words in
/// the text.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    /// Value selected when the rule matches.
    pub target: T,
    /// Conjunction of disjunctions: `[["flask"], ["api"]]` needs both,
    /// `[["api", "endpoint"]]` needs either.
    pub clauses: &'static [&'static [&'static str]],
    /// Comparison applied to every keyword of the rule.
    pub matching: WordMatch,
}

impl<T> KeywordRule<T> {
    fn matches(&self, words: &HashSet<String>) -> bool {
        self.clauses.iter().all(|clause| {
            clause.iter().any(|keyword| words.iter().any(|word| self.matching.matches(word, keyword)))
        })
    }
}

/// Lowercased words of `text`, split on anything that is not a letter or
/// digit.
#[must_use]
pub fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Returns the target of the first matching rule, or `fallback`.
pub fn select<T: Copy>(text: &str, rules: &[KeywordRule<T>], fallback: T) -> T {
    let words = words(text);
    rules.iter().find(|rule| rule.matches(&words)).map_or(fallback, |rule| rule.target)
}
