//! ID generator port for producing short public identifiers.

/// Length of every generated identifier.
pub const ID_LEN: usize = 8;

/// Generates short opaque identifiers for snippets and archives.
///
/// Identifiers are [`ID_LEN`] printable ASCII alphanumeric characters.
/// Uniqueness is probabilistic: no adapter checks a new id against what
/// is already stored.
pub trait IdGenerator: Send + Sync {
    /// Generates a new identifier string.
    fn generate_id(&self) -> String;
}
