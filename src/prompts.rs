//! Prompt template library stored in the `prompts` area.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::ServiceContext;
use crate::error::PipelineError;
use crate::ports::Area;

const EXTENSION: &str = ".txt";

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("template name regex should be valid"));

/// Saved prompt templates.
pub struct PromptLibrary<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PromptLibrary<'a> {
    /// Creates a library over the context's storage port.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Saves `content` under a sanitized form of `name` and returns the
    /// file name used.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name and `Storage` if the
    /// template cannot be written.
    pub fn save(&self, name: &str, content: &str) -> Result<String, PipelineError> {
        let file = file_name(name)?;
        self.ctx
            .storage
            .write(Area::Prompts, &file, content.as_bytes())
            .map_err(|e| PipelineError::storage(format!("writing {}/{file}", Area::Prompts), e))?;
        tracing::info!(template = %file, "prompt template saved");
        Ok(file)
    }

    /// Template names (file stems), sorted.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the area cannot be listed.
    pub fn list(&self) -> Result<Vec<String>, PipelineError> {
        let names = self
            .ctx
            .storage
            .list(Area::Prompts)
            .map_err(|e| PipelineError::storage(format!("listing {}", Area::Prompts), e))?;
        Ok(names.iter().filter_map(|n| n.strip_suffix(EXTENSION)).map(String::from).collect())
    }

    /// Loads a template by name or file name; `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on read failure and `CorruptEntry` if the stored
    /// bytes are not UTF-8.
    pub fn load(&self, name: &str) -> Result<Option<String>, PipelineError> {
        let Ok(file) = file_name(name) else {
            return Ok(None);
        };
        let bytes = self
            .ctx
            .storage
            .read(Area::Prompts, &file)
            .map_err(|e| PipelineError::storage(format!("reading {}/{file}", Area::Prompts), e))?;
        bytes
            .map(|b| String::from_utf8(b).map_err(|e| PipelineError::corrupt(Area::Prompts, &file, e)))
            .transpose()
    }
}

/// Replaces characters outside `[A-Za-z0-9_.-]` with `_` and appends
/// `.txt` if missing.
fn file_name(name: &str) -> Result<String, PipelineError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::InvalidInput("template name must not be blank".to_string()));
    }
    let mut safe = UNSAFE_CHARS.replace_all(trimmed, "_").into_owned();
    if !safe.ends_with(EXTENSION) {
        safe.push_str(EXTENSION);
    }
    // A name made only of dots would address the area itself.
    if safe.trim_start_matches('.') == "txt" || safe.starts_with("..") {
        safe.insert(0, '_');
    }
    Ok(safe)
}
