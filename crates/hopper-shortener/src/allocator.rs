use hopper_core::repository::Result;
use hopper_core::{ReadRepository, ShortCode};
use hopper_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace};

/// Draws short codes from a [`Generator`] until one is free in the repository.
///
/// The existence check only narrows the window; two allocators can still
/// hand out the same free code. Callers close the race by treating a
/// `Conflict` from [`Repository::insert`](hopper_core::Repository::insert)
/// as a signal to allocate again.
///
/// There is no retry limit.
#[derive(Debug)]
pub struct CodeAllocator<R, G> {
    repository: Arc<R>,
    generator: G,
}

impl<R: ReadRepository, G: Generator> CodeAllocator<R, G> {
    pub fn new(repository: Arc<R>, generator: G) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Returns a code that was unoccupied at the time of the check.
    pub async fn allocate(&self) -> Result<ShortCode> {
        let mut collisions: u64 = 0;
        loop {
            let code: ShortCode = self.generator.generate().into();
            if !self.repository.exists(&code).await? {
                if collisions > 0 {
                    debug!(code = %code, collisions, "allocated short code after collisions");
                }
                return Ok(code);
            }
            collisions += 1;
            trace!(code = %code, "generated code is taken, re-rolling");
        }
    }
}
