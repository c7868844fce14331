use serde::Serialize;
use std::fmt::Display;

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// The area of the service a [`Notification`] originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    Cache,
    Controller,
    CronJob,
    Db,
    Domain,
    Handler,
    Repository,
    Route,
    Service,
    Auth,
    Config,
    Middleware,
    Utils,
}

/// An operation outcome reported to an external log sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub package: Package,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, package: Package, message: impl Into<String>) -> Self {
        Self {
            level,
            package,
            message: message.into(),
        }
    }

    pub fn info(package: Package, message: impl Into<String>) -> Self {
        Self::new(Level::Info, package, message)
    }

    pub fn warn(package: Package, message: impl Into<String>) -> Self {
        Self::new(Level::Warn, package, message)
    }

    pub fn error(package: Package, message: impl Into<String>) -> Self {
        Self::new(Level::Error, package, message)
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}/{:?}] {}", self.level, self.package, self.message)
    }
}

/// Fire-and-forget sink for operation outcomes.
///
/// `notify` has no return value: delivery failures stay inside the
/// implementation and can never change the result of the operation that
/// produced the notification. Implementations must not block.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notification: Notification);
}

/// A notifier that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}
