//! In-memory adapters for deterministic, disk-free operation.

mod clock;
mod filesystem;
mod id_gen;
mod storage;

pub use clock::FixedClock;
pub use filesystem::MemoryFileSystem;
pub use id_gen::SequentialIdGenerator;
pub use storage::MemoryStorage;
