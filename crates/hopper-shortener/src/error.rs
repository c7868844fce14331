pub use hopper_core::ShortenerError;

/// Type alias for shortener results.
pub type Result<T> = std::result::Result<T, ShortenerError>;
