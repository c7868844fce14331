use crate::error::NotifierError;
use hopper_core::{Level, Notification, Notifier, Package};
use serde::Serialize;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{trace, warn};
use typed_builder::TypedBuilder;
use url::Url;

/// Which side of the application a log line comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Backend,
    Frontend,
}

/// Configures an [`HttpLogNotifier`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct HttpLogSettings {
    /// Where log entries are POSTed.
    #[builder(setter(into))]
    pub endpoint: String,
    /// Sent as `Authorization: Bearer <token>`.
    #[builder(setter(into))]
    pub token: String,
    /// Per-request timeout.
    #[builder(default = Duration::from_secs(3))]
    pub timeout: Duration,
    #[builder(default = Stack::Backend)]
    pub stack: Stack,
}

#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    stack: Stack,
    level: Level,
    package: Package,
    message: &'a str,
}

/// Ships notifications to a remote log API over HTTP.
///
/// Each notification is sent on its own spawned task, so `notify` returns
/// immediately. Failures are logged locally and dropped.
#[derive(Debug, Clone)]
pub struct HttpLogNotifier {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
    stack: Stack,
}

impl HttpLogNotifier {
    pub fn new(settings: HttpLogSettings) -> Result<Self, NotifierError> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|e| NotifierError::InvalidEndpoint(format!("{}: {}", settings.endpoint, e)))?;
        if settings.token.trim().is_empty() {
            return Err(NotifierError::MissingToken);
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token: settings.token,
            stack: settings.stack,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), reqwest::Error> {
        let entry = LogEntry {
            stack: self.stack,
            level: notification.level,
            package: notification.package,
            message: &notification.message,
        };

        self.client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&entry)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl Notifier for HttpLogNotifier {
    fn notify(&self, notification: Notification) {
        if notification.message.trim().is_empty() {
            trace!("dropping notification with empty message");
            return;
        }

        let Ok(handle) = Handle::try_current() else {
            warn!(%notification, "no async runtime available, dropping notification");
            return;
        };

        let this = self.clone();
        handle.spawn(async move {
            match this.deliver(&notification).await {
                Ok(()) => trace!(%notification, "notification delivered"),
                Err(error) => warn!(
                    endpoint = %this.endpoint,
                    error = %error,
                    "failed to deliver notification"
                ),
            }
        });
    }
}
