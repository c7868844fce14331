pub mod random;

pub use random::RandomGenerator;

use hopper_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness against the repository is the caller's concern; the
/// allocator re-rolls on collision.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Generates a candidate short code.
    fn generate(&self) -> Self::Output;
}
