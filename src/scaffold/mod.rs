//! Project scaffolder: maps a free-text project description to one of a
//! fixed set of canned multi-file templates.
//!
//! Selection is a keyword lookup on word prefixes, so `APIs` and
//! `ReactJS` select like `api` and `react`. Nothing from the description
//! is interpolated into the generated files.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keywords::{self, KeywordRule, WordMatch};

/// Relative path → file content. Ordered so archive entry order is stable.
pub type FileSet = BTreeMap<String, String>;

/// The canned templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    /// Flask JSON API skeleton.
    WebApi,
    /// Single-page React counter.
    FrontEnd,
    /// Plain HTML/CSS/JS page; the fallback.
    StaticSite,
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WebApi => "web_api",
            Self::FrontEnd => "front_end",
            Self::StaticSite => "static_site",
        })
    }
}

/// Keyword groups in precedence order; the first match wins.
const SELECTION: &[KeywordRule<Template>] = &[
    KeywordRule {
        target: Template::WebApi,
        clauses: &[&["flask"], &["api"]],
        matching: WordMatch::Prefix,
    },
    KeywordRule {
        target: Template::FrontEnd,
        clauses: &[&["react"]],
        matching: WordMatch::Prefix,
    },
];

const WEB_API: &[(&str, &str)] = &[
    ("app.py", include_str!("templates/web_api/app.py")),
    ("requirements.txt", include_str!("templates/web_api/requirements.txt")),
    ("README.md", include_str!("templates/web_api/README.md")),
];

const FRONT_END: &[(&str, &str)] = &[
    ("index.html", include_str!("templates/front_end/index.html")),
    ("app.js", include_str!("templates/front_end/app.js")),
    ("README.md", include_str!("templates/front_end/README.md")),
];

const STATIC_SITE: &[(&str, &str)] = &[
    ("index.html", include_str!("templates/static_site/index.html")),
    ("styles.css", include_str!("templates/static_site/styles.css")),
    ("script.js", include_str!("templates/static_site/script.js")),
    ("README.md", include_str!("templates/static_site/README.md")),
];

impl Template {
    /// Picks the template for a project description.
    #[must_use]
    pub fn select(spec: &str) -> Self {
        keywords::select(spec, SELECTION, Self::StaticSite)
    }

    /// The template's files as a fresh [`FileSet`].
    #[must_use]
    pub fn files(self) -> FileSet {
        let entries = match self {
            Self::WebApi => WEB_API,
            Self::FrontEnd => FRONT_END,
            Self::StaticSite => STATIC_SITE,
        };
        entries.iter().map(|(path, body)| ((*path).to_string(), (*body).to_string())).collect()
    }
}

/// Generates the file set for a project description.
#[must_use]
pub fn scaffold(spec: &str) -> FileSet {
    let template = Template::select(spec);
    tracing::debug!(%template, "scaffold template selected");
    template.files()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(files: &FileSet) -> Vec<&str> {
        files.keys().map(String::as_str).collect()
    }

    #[test]
    fn react_selects_front_end() {
        let files = scaffold("build a react app");
        assert_eq!(keys(&files), vec!["README.md", "app.js", "index.html"]);
        assert!(files["app.js"].contains("React.useState"));
    }

    #[test]
    fn unmatched_spec_selects_static_site() {
        let files = scaffold("nothing relevant");
        assert_eq!(keys(&files), vec!["README.md", "index.html", "script.js", "styles.css"]);
    }

    #[test]
    fn flask_api_selects_web_api() {
        let files = scaffold("A Flask API for todo items");
        assert_eq!(keys(&files), vec!["README.md", "app.py", "requirements.txt"]);
        assert_eq!(files["requirements.txt"], "flask==2.0.1\n");
    }

    #[test]
    fn flask_without_api_falls_through() {
        assert_eq!(Template::select("a flask blog"), Template::StaticSite);
        assert_eq!(Template::select("flask site with react widgets"), Template::FrontEnd);
    }

    #[test]
    fn web_api_takes_precedence_over_front_end() {
        assert_eq!(Template::select("flask api with a react client"), Template::WebApi);
    }

    #[test]
    fn plural_and_suffixed_keywords_select_their_template() {
        assert_eq!(Template::select("A Flask APIs project"), Template::WebApi);
        assert_eq!(Template::select("Flask-RESTful api_server"), Template::WebApi);
        assert_eq!(Template::select("ReactJS dashboard"), Template::FrontEnd);
        assert_eq!(Template::select("react-native demo"), Template::FrontEnd);
    }

    #[test]
    fn keywords_inside_words_do_not_select() {
        assert_eq!(Template::select("an unreactive landing page"), Template::StaticSite);
        assert_eq!(Template::select("flask plus a capital idea"), Template::StaticSite);
    }

    #[test]
    fn empty_spec_falls_back() {
        assert_eq!(Template::select(""), Template::StaticSite);
    }

    #[test]
    fn file_contents_are_fixed() {
        assert_eq!(scaffold("react one"), scaffold("react two, entirely different"));
    }
}
