//! Best-effort delivery of engine notifications to a remote log API.

pub mod error;
pub mod http;

pub use error::NotifierError;
pub use http::{HttpLogNotifier, HttpLogSettings, Stack};
