//! Adapters implementing the port traits.
//!
//! `live` talks to the real disk, clock and random source; `memory`
//! keeps everything in-process and is fully deterministic.

pub mod live;
pub mod memory;
