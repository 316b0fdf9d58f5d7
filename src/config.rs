//! Runtime settings loaded from the environment.

use std::path::PathBuf;

/// Environment variable naming the storage root directory.
pub const STORE_VAR: &str = "CODESMITH_STORE";
/// Environment variable holding the tracing filter directive.
pub const LOG_VAR: &str = "CODESMITH_LOG";

const DEFAULT_STORE: &str = ".codesmith";
const DEFAULT_LOG: &str = "warn";

/// Settings shared by the binary and the live service context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root directory for the shared-code, generated and prompts areas.
    pub store_root: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `codesmith=debug`.
    pub log_filter: String,
}

impl Settings {
    /// Loads settings from the process environment, reading a `.env`
    /// file first if one is present.
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Blank values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            store_root: non_blank(STORE_VAR).map_or_else(|| PathBuf::from(DEFAULT_STORE), PathBuf::from),
            log_filter: non_blank(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG.to_string()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let settings = Settings::default();
        assert_eq!(settings.store_root, PathBuf::from(".codesmith"));
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn lookup_overrides_defaults() {
        let settings = Settings::from_lookup(|key| match key {
            STORE_VAR => Some("/var/lib/codesmith".to_string()),
            LOG_VAR => Some("codesmith=debug".to_string()),
            _ => None,
        });
        assert_eq!(settings.store_root, PathBuf::from("/var/lib/codesmith"));
        assert_eq!(settings.log_filter, "codesmith=debug");
    }

    #[test]
    fn blank_values_are_ignored() {
        let settings = Settings::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(settings, Settings::default());
    }
}
