//! URL shortener engine.
//!
//! This crate provides the [`ShortenerService`] facade that ties validation,
//! code allocation, the repository and redirect resolution together, plus the
//! [`CodeAllocator`] that draws collision-free codes from a generator. Core
//! types are re-exported from `hopper_core`.

pub mod allocator;
pub mod error;
pub mod service;

pub use allocator::CodeAllocator;
pub use error::{Result, ShortenerError};
pub use hopper_core::{CreateParams, Created, Shortener};
pub use service::ShortenerService;
