//! In-memory storage adapter.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::ports::storage::{Area, Storage};

/// Storage held in a mutex-guarded ordered map.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<(Area, String), Vec<u8>>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn write(
        &self,
        area: Area,
        name: &str,
        bytes: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = self.entries.lock().map_err(|_| "memory storage lock poisoned")?;
        entries.insert((area, name.to_string()), bytes.to_vec());
        Ok(())
    }

    fn read(
        &self,
        area: Area,
        name: &str,
    ) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send + Sync>> {
        let entries = self.entries.lock().map_err(|_| "memory storage lock poisoned")?;
        Ok(entries.get(&(area, name.to_string())).cloned())
    }

    fn list(&self, area: Area) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let entries = self.entries.lock().map_err(|_| "memory storage lock poisoned")?;
        Ok(entries.keys().filter(|(a, _)| *a == area).map(|(_, name)| name.clone()).collect())
    }
}
