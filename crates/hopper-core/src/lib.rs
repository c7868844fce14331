//! Core types and traits for the Hopper URL shortener.
//!
//! This crate provides the validated value types, the repository contract
//! and the error taxonomy shared by the storage, redirector, shortener and
//! gateway crates.

pub mod clock;
pub mod error;
pub mod notifier;
pub mod repository;
pub mod shortcode;
pub mod shortener;
pub mod validator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, ShortenerError, StorageError};
pub use notifier::{Level, NoopNotifier, Notification, Notifier, Package};
pub use repository::{ClickEvent, ClickMeta, ReadRepository, Repository, UrlRecord};
pub use shortcode::ShortCode;
pub use shortener::{CreateParams, Created, Shortener};
pub use validator::Validity;
