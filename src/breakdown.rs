//! Task breakdown: splits a coding task description into a fixed plan.
//!
//! Like the scaffolder this is a keyword lookup over canned plans, not
//! planning in any real sense.

use serde::{Deserialize, Serialize};

use crate::keywords::{self, KeywordRule, WordMatch};

/// One step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// 1-based position.
    pub step: usize,
    /// What to do.
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanKind {
    Api,
    Database,
    Ui,
    Generic,
}

const SELECTION: &[KeywordRule<PlanKind>] = &[
    KeywordRule {
        target: PlanKind::Api,
        clauses: &[&["api", "endpoint", "endpoints"]],
        matching: WordMatch::Whole,
    },
    KeywordRule {
        target: PlanKind::Database,
        clauses: &[&["database", "db"]],
        matching: WordMatch::Whole,
    },
    KeywordRule {
        target: PlanKind::Ui,
        clauses: &[&["ui", "interface"]],
        matching: WordMatch::Whole,
    },
];

impl PlanKind {
    fn steps(self) -> &'static [&'static str] {
        match self {
            Self::Api => &[
                "Define API requirements and endpoints",
                "Set up basic server structure",
                "Implement data models",
                "Implement API endpoints",
                "Add error handling and validation",
                "Test API endpoints",
            ],
            Self::Database => &[
                "Define database schema",
                "Set up database connection",
                "Implement data models",
                "Create CRUD operations",
                "Add data validation",
                "Test database operations",
            ],
            Self::Ui => &[
                "Define UI requirements and wireframes",
                "Set up basic UI structure",
                "Implement UI components",
                "Add styling and layout",
                "Implement user interactions",
                "Test UI functionality",
            ],
            Self::Generic => &[
                "Analyze requirements",
                "Design solution architecture",
                "Implement core functionality",
                "Add error handling and edge cases",
                "Write tests",
                "Refactor and optimize",
            ],
        }
    }
}

/// Breaks `task` down into numbered steps.
#[must_use]
pub fn break_down(task: &str) -> Vec<PlanStep> {
    let kind = keywords::select(task, SELECTION, PlanKind::Generic);
    kind.steps()
        .iter()
        .enumerate()
        .map(|(idx, description)| PlanStep { step: idx + 1, description: (*description).to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(task: &str) -> String {
        break_down(task)[0].description.clone()
    }

    #[test]
    fn api_task_gets_api_plan() {
        assert_eq!(first("Add a REST endpoint for users"), "Define API requirements and endpoints");
    }

    #[test]
    fn database_task_gets_database_plan() {
        assert_eq!(first("migrate the DB"), "Define database schema");
    }

    #[test]
    fn ui_task_gets_ui_plan() {
        assert_eq!(first("Polish the settings interface"), "Define UI requirements and wireframes");
    }

    #[test]
    fn api_wins_over_database() {
        assert_eq!(first("api backed by a database"), "Define API requirements and endpoints");
    }

    #[test]
    fn words_containing_keywords_do_not_match() {
        assert_eq!(first("build a quick guide"), "Analyze requirements");
    }

    #[test]
    fn steps_are_numbered_from_one() {
        let steps = break_down("anything");
        assert_eq!(steps.len(), 6);
        assert_eq!(steps.iter().map(|s| s.step).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }
}
