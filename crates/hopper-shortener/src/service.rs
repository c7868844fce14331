use crate::allocator::CodeAllocator;
use crate::error::Result;
use async_trait::async_trait;
use hopper_core::validator::{validate_shortcode_format, validate_url, validate_validity};
use hopper_core::{
    ClickMeta, Clock, CreateParams, Created, Level, NoopNotifier, Notification, Notifier,
    Package, Repository, ShortCode, Shortener, ShortenerError, StorageError, SystemClock,
    UrlRecord,
};
use hopper_generator::Generator;
use hopper_redirector::RedirectorService;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service owns the repository and wires it to:
/// - a [`CodeAllocator`] for generated codes
/// - a [`RedirectorService`] for redirect resolution
/// - a [`Clock`] that stamps creation and redirect times
/// - a [`Notifier`] that hears about every outcome
///
/// Generated-code inserts that lose a race are retried with a fresh code.
/// Caller-chosen codes are never retried.
pub struct ShortenerService<R, G, C = SystemClock> {
    repository: Arc<R>,
    allocator: CodeAllocator<R, G>,
    redirector: RedirectorService<R>,
    clock: C,
    notifier: Arc<dyn Notifier>,
}

impl<R: Repository, G: Generator> ShortenerService<R, G, SystemClock> {
    /// Creates a new `ShortenerService` on the system clock.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_clock(repository, generator, SystemClock)
    }
}

impl<R: Repository, G: Generator, C: Clock> ShortenerService<R, G, C> {
    /// Creates a new `ShortenerService` reading time from `clock`.
    pub fn with_clock(repository: R, generator: G, clock: C) -> Self {
        let repository = Arc::new(repository);
        Self {
            allocator: CodeAllocator::new(Arc::clone(&repository), generator),
            redirector: RedirectorService::with_shared(Arc::clone(&repository)),
            repository,
            clock,
            notifier: Arc::new(NoopNotifier),
        }
    }

    /// Replaces the notifier, which defaults to [`NoopNotifier`].
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Returns the repository this service owns.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    async fn create_record(&self, params: CreateParams) -> Result<Created> {
        validate_url(&params.url)?;
        let validity = validate_validity(params.validity)?;
        let custom = params
            .shortcode
            .as_deref()
            .map(validate_shortcode_format)
            .transpose()?;

        let created_at = self.clock.now();
        let expires_at = validity.expires_after(created_at)?;
        let target_url = params.url;
        let record_for = |code: ShortCode| UrlRecord {
            code,
            target_url: target_url.clone(),
            created_at,
            validity,
            expires_at,
            clicks: Vec::new(),
        };

        if let Some(code) = custom {
            // Conflict maps to ShortcodeTaken.
            self.repository.insert(record_for(code.clone())).await?;
            return Ok(Created { code, expires_at });
        }

        loop {
            let code = self.allocator.allocate().await?;
            match self.repository.insert(record_for(code.clone())).await {
                Ok(()) => return Ok(Created { code, expires_at }),
                Err(StorageError::Conflict(_)) => {
                    debug!(code = %code, "lost allocation race, drawing a new code");
                }
                Err(other) => return Err(other.into()),
            }
        }
    }

    fn report(&self, operation: &str, outcome: std::result::Result<String, &ShortenerError>) {
        let notification = match outcome {
            Ok(message) => {
                info!(operation, "{}", message);
                Notification::info(Package::Service, message)
            }
            Err(error) => {
                let level = level_for(error);
                warn!(operation, error = %error, "operation failed");
                Notification::new(
                    level,
                    Package::Service,
                    format!("{} failed: {}", operation, error),
                )
            }
        };
        self.notifier.notify(notification);
    }
}

/// Validation failures are errors on the caller's side; a missing or
/// expired code is only a warning.
fn level_for(error: &ShortenerError) -> Level {
    match error {
        ShortenerError::NotFound(_) | ShortenerError::Expired(_) => Level::Warn,
        _ => Level::Error,
    }
}

/// Codes that fail the format check can never have been stored.
fn lookup_code(code: &str) -> Result<ShortCode> {
    ShortCode::new(code).map_err(|_| ShortenerError::NotFound(code.to_string()))
}

#[async_trait]
impl<R: Repository, G: Generator, C: Clock> Shortener for ShortenerService<R, G, C> {
    async fn create(&self, params: CreateParams) -> Result<Created> {
        let result = self.create_record(params).await;
        match &result {
            Ok(created) => self.report(
                "create",
                Ok(format!(
                    "Short URL created: {} (expires {})",
                    created.code, created.expires_at
                )),
            ),
            Err(error) => self.report("create", Err(error)),
        }
        result
    }

    async fn stats(&self, code: &str) -> Result<UrlRecord> {
        let result = match lookup_code(code) {
            Ok(code) => self
                .repository
                .get(&code)
                .await
                .map_err(ShortenerError::from)
                .and_then(|record| {
                    record.ok_or_else(|| ShortenerError::NotFound(code.to_string()))
                }),
            Err(error) => Err(error),
        };
        match &result {
            Ok(record) => self.report(
                "stats",
                Ok(format!(
                    "Stats served for {} ({} clicks)",
                    record.code,
                    record.clicks.len()
                )),
            ),
            Err(error) => self.report("stats", Err(error)),
        }
        result
    }

    async fn redirect(&self, code: &str, meta: ClickMeta) -> Result<String> {
        let result = match lookup_code(code) {
            Ok(code) => {
                let now = self.clock.now();
                self.redirector
                    .resolve(&code, now, meta)
                    .await
                    .map_err(ShortenerError::from)
            }
            Err(error) => Err(error),
        };
        match &result {
            Ok(url) => self.report("redirect", Ok(format!("Redirected {} to {}", code, url))),
            Err(error) => self.report("redirect", Err(error)),
        }
        result
    }
}
