//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the pipeline core and the
//! outside world (durable storage, host project files, identifiers,
//! time). Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod storage;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::{IdGenerator, ID_LEN};
pub use storage::{Area, Storage};
