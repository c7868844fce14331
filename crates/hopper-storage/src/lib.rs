//! Repository implementations for the Hopper URL shortener.

pub mod memory;

pub use hopper_core::{ReadRepository, Repository, StorageError};
pub use memory::InMemoryRepository;
