//! Error taxonomy for pipeline actions.
//!
//! Not-found is never an error: lookups return `Ok(None)`. Unsupported
//! languages are never an error either; the analysis components degrade
//! to empty results instead.

use crate::ports::Area;

/// Boxed error type returned by port implementations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// A fault reported to the caller of a pipeline action.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The request input was empty or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Durable storage could not be written or read.
    #[error("storage error while {context}: {source}")]
    Storage {
        /// What the pipeline was doing when the failure happened.
        context: String,
        /// The underlying port error.
        #[source]
        source: PortError,
    },

    /// A host project file or directory could not be read.
    #[error("filesystem error while {context}: {source}")]
    Filesystem {
        /// What the pipeline was reading when the failure happened.
        context: String,
        /// The underlying port error.
        #[source]
        source: PortError,
    },

    /// A stored entry exists but could not be decoded.
    #[error("corrupt entry {area}/{name}: {reason}")]
    CorruptEntry {
        /// Area holding the entry.
        area: Area,
        /// Entry name within the area.
        name: String,
        /// Decoder message.
        reason: String,
    },
}

impl PipelineError {
    pub(crate) fn storage(context: impl Into<String>, source: PortError) -> Self {
        Self::Storage { context: context.into(), source }
    }

    pub(crate) fn filesystem(context: impl Into<String>, source: PortError) -> Self {
        Self::Filesystem { context: context.into(), source }
    }

    pub(crate) fn corrupt(area: Area, name: &str, reason: impl ToString) -> Self {
        Self::CorruptEntry { area, name: name.to_string(), reason: reason.to_string() }
    }
}
