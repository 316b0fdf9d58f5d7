//! Deterministic adapter for the `IdGenerator` port.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::ports::IdGenerator;

/// Produces `00000001`, `00000002`, ... in call order.
#[derive(Default)]
pub struct SequentialIdGenerator {
    next: AtomicU32,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id is `00000001`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{n:08x}")
    }
}
