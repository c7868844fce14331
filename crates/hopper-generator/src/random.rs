use crate::Generator;
use hopper_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use hopper_core::ShortCode;
use std::iter;
use typed_builder::TypedBuilder;

pub const DEFAULT_LENGTH: usize = 6;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Draws uniformly random alphanumeric codes from the thread-local RNG.
///
/// With 62^6 possible six-character codes collisions are rare, but they can
/// happen; pair this with an allocator that checks the repository.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    /// Code length, clamped to the valid short code range `4..=16`.
    #[builder(default = DEFAULT_LENGTH)]
    length: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn length(&self) -> usize {
        self.length.clamp(MIN_LENGTH, MAX_LENGTH)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code: String =
            iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
                .take(self.length())
                .collect();
        // Only alphabet characters at a clamped length, so always valid.
        ShortCode::new_unchecked(code)
    }
}
