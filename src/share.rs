//! Shared-snippet store: persists code snippets under short public ids.
//!
//! One JSON record per snippet in the `shared_code` area:
//!
//! ```text
//! shared_code/
//!   └── <id>.json   {"code": ..., "language": ..., "created_at": ...}
//! ```
//!
//! Ids come from the `IdGenerator` port and are not checked against
//! existing records; a colliding id silently overwrites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::ServiceContext;
use crate::error::PipelineError;
use crate::ports::Area;

/// A stored snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSnippet {
    /// Public identifier.
    pub id: String,
    /// Snippet text, byte-for-byte as shared.
    pub code: String,
    /// Declared language, as given.
    pub language: String,
    /// When the snippet was stored.
    pub created_at: DateTime<Utc>,
}

/// On-disk shape; the id is the file name, not a field.
#[derive(Serialize, Deserialize)]
struct SnippetRecord {
    code: String,
    language: String,
    created_at: DateTime<Utc>,
}

/// Persistence for shared snippets.
///
/// All I/O goes through `ctx.storage` so the store works with both the
/// disk and the in-memory adapters.
pub struct SnippetStore<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SnippetStore<'a> {
    /// Creates a store over the context's storage port.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Stores a snippet and returns its newly generated id.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the record cannot be written.
    pub fn put(&self, code: &str, language: &str) -> Result<String, PipelineError> {
        let id = self.ctx.id_gen.generate_id();
        let record = SnippetRecord {
            code: code.to_string(),
            language: language.to_string(),
            created_at: self.ctx.clock.now(),
        };
        let json = serde_json::to_vec(&record)
            .map_err(|e| PipelineError::storage(format!("serializing snippet {id}"), e.into()))?;
        let name = record_name(&id);
        self.ctx
            .storage
            .write(Area::SharedCode, &name, &json)
            .map_err(|e| PipelineError::storage(format!("writing {}/{name}", Area::SharedCode), e))?;
        tracing::info!(%id, language, bytes = code.len(), "snippet shared");
        Ok(id)
    }

    /// Loads a snippet by id.
    ///
    /// Returns `Ok(None)` when no snippet has that id. Ids that could never
    /// have been issued (anything but ASCII letters and digits) are also
    /// not found.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the record exists but cannot be read, and
    /// `CorruptEntry` if it cannot be parsed.
    pub fn get(&self, id: &str) -> Result<Option<SharedSnippet>, PipelineError> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Ok(None);
        }
        let name = record_name(id);
        let Some(bytes) = self
            .ctx
            .storage
            .read(Area::SharedCode, &name)
            .map_err(|e| PipelineError::storage(format!("reading {}/{name}", Area::SharedCode), e))?
        else {
            tracing::debug!(%id, "snippet not found");
            return Ok(None);
        };
        let record: SnippetRecord = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%id, error = %e, "snippet record is corrupt");
            PipelineError::corrupt(Area::SharedCode, &name, e)
        })?;
        Ok(Some(SharedSnippet {
            id: id.to_string(),
            code: record.code,
            language: record.language,
            created_at: record.created_at,
        }))
    }
}

fn record_name(id: &str) -> String {
    format!("{id}.json")
}
