//! Service context bundling all port trait objects.

use crate::adapters::live::clock::SystemClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::id_gen::RandomIdGenerator;
use crate::adapters::live::storage::DiskStorage;
use crate::adapters::memory::{FixedClock, MemoryFileSystem, MemoryStorage, SequentialIdGenerator};
use crate::config::Settings;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;
use crate::ports::storage::Storage;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, in-memory).
pub struct ServiceContext {
    /// Durable storage for snippets, archives and prompt templates.
    pub storage: Box<dyn Storage>,
    /// Read access to host project trees.
    pub fs: Box<dyn FileSystem>,
    /// ID generator for snippet ids and archive names.
    pub id_gen: Box<dyn IdGenerator>,
    /// Clock for creation tokens.
    pub clock: Box<dyn Clock>,
}

impl ServiceContext {
    /// Creates a live context: disk storage rooted at
    /// `settings.store_root`, the real filesystem for project reads,
    /// random ids and the system clock.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self {
            storage: Box::new(DiskStorage::new(&settings.store_root)),
            fs: Box::new(LiveFileSystem),
            id_gen: Box::new(RandomIdGenerator),
            clock: Box::new(SystemClock),
        }
    }

    /// Creates a fully in-memory, deterministic context.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            storage: Box::new(MemoryStorage::new()),
            fs: Box::new(MemoryFileSystem::new()),
            id_gen: Box::new(SequentialIdGenerator::new()),
            clock: Box::new(FixedClock::default()),
        }
    }
}
