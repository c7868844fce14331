//! Redirect resolution for the Hopper URL shortener.
//!
//! [`RedirectorService`] looks a short code up, refuses it once it has
//! expired, and otherwise appends a click event before handing back the
//! target URL.
//!
//! # Example
//!
//! ```rust
//! use hopper_core::{ClickMeta, ShortCode};
//! use hopper_redirector::RedirectorService;
//! use hopper_storage::InMemoryRepository;
//! use jiff::Timestamp;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RedirectorService::new(InMemoryRepository::new());
//!
//! let code = ShortCode::new("abc123")?;
//! let meta = ClickMeta::new(None, "127.0.0.1");
//! match service.resolve(&code, Timestamp::now(), meta).await {
//!     Ok(url) => println!("Redirect to: {}", url),
//!     Err(e) => println!("Cannot redirect: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod redirector;
pub mod service;

pub use error::{RedirectorError, Result};
pub use redirector::Redirector;
pub use service::RedirectorService;
