//! State store handlers
//!
//! - `MemoryStateStore`: ordered in-memory map, for embedding and tests
//! - `FileStateStore`: JSON snapshot on disk, used by the CLI

pub mod filesystem;
pub mod memory;

pub use filesystem::FileStateStore;
pub use memory::MemoryStateStore;
