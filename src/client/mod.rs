//! Client layer: provider selection, single sends and batch dispatch.

mod backend;
mod http;

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;

use crate::config::ProviderConfig;
use crate::domain::{
    BatchEntry, BatchOutcome, BatchResult, BulkSendRequest, DeliveryResult, MessageText, Provider,
    SendRequest, ValidationError, normalize,
};
use crate::transport::DEFAULT_CARRIER_BASE;

use self::backend::Backend;
use self::http::{HttpTransport, ReqwestTransport};

#[derive(Debug, thiserror::Error)]
/// Errors returned by a single send.
///
/// In a batch these are captured per recipient and never abort the batch.
pub enum DeliveryError {
    /// HTTP client / transport failure (DNS, TLS, connection reset, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the provider, with its payload if any.
    #[error(
        "unexpected HTTP status: {status}{}",
        .body.as_deref().map(|body| format!(" ({body})")).unwrap_or_default()
    )]
    HttpStatus { status: u16, body: Option<String> },

    /// The provider did not answer within the configured bound.
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    /// A configuration value was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl DeliveryError {
    /// Provider payload attached to the error, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`Dispatcher`].
///
/// Use this when you need to customize the carrier endpoint, timeout, or user-agent.
pub struct DispatcherBuilder {
    config: ProviderConfig,
    carrier_base: String,
    user_agent: Option<String>,
}

impl DispatcherBuilder {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            carrier_base: DEFAULT_CARRIER_BASE.to_owned(),
            user_agent: None,
        }
    }

    /// Override the carrier accounts base URL (`.../Accounts`).
    pub fn carrier_base(mut self, base: impl Into<String>) -> Self {
        self.carrier_base = base.into();
        self
    }

    /// Override the per-request timeout taken from the configuration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<Dispatcher, DeliveryError> {
        let mut builder = reqwest::Client::builder().timeout(self.config.timeout);
        if let Some(user_agent) = self.user_agent.as_deref() {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| DeliveryError::Transport(Box::new(err)))?;

        self.build_with_transport(Arc::new(ReqwestTransport { client }))
    }

    fn build_with_transport(self, http: Arc<dyn HttpTransport>) -> Result<Dispatcher, DeliveryError> {
        url::Url::parse(&self.carrier_base).map_err(|_| ValidationError::InvalidUrl {
            field: "carrier_base",
            input: self.carrier_base.clone(),
        })?;

        Ok(Dispatcher {
            backend: Backend::select(&self.config, &self.carrier_base, http),
        })
    }
}

#[derive(Clone)]
/// Outbound SMS dispatcher.
///
/// The delivery backend is chosen once, at construction, from the [`ProviderConfig`]:
/// - primary carrier (Twilio) when account sid, auth token and sender number are set,
/// - otherwise the generic gateway when an API key is set,
/// - otherwise simulation, which only logs.
///
/// A delivery failure never switches the dispatcher to another provider.
pub struct Dispatcher {
    backend: Backend,
}

impl Dispatcher {
    /// Create a dispatcher with the default carrier endpoint.
    ///
    /// For more customization, use [`Dispatcher::builder`].
    pub fn new(config: ProviderConfig) -> Result<Self, DeliveryError> {
        DispatcherBuilder::new(config).build()
    }

    pub fn builder(config: ProviderConfig) -> DispatcherBuilder {
        DispatcherBuilder::new(config)
    }

    /// Provider that every send goes through.
    pub fn provider(&self) -> Provider {
        self.backend.provider()
    }

    /// Normalize `destination_raw` and deliver `message` through the active provider.
    ///
    /// Errors:
    /// - [`DeliveryError::Transport`] for network failures,
    /// - [`DeliveryError::HttpStatus`] for non-2xx responses (payload attached),
    /// - [`DeliveryError::Timeout`] when the provider exceeds the configured bound.
    pub async fn send(
        &self,
        destination_raw: &str,
        message: &MessageText,
    ) -> Result<DeliveryResult, DeliveryError> {
        let to = normalize(destination_raw);
        if !to.is_plausible() {
            tracing::warn!(
                to = %to.masked(),
                "destination does not look like a valid number; sending anyway"
            );
        }
        self.backend.send(&to, message).await
    }

    pub async fn send_request(&self, request: &SendRequest) -> Result<DeliveryResult, DeliveryError> {
        self.send(&request.destination_raw, &request.message).await
    }

    /// Send `message` to every destination in order.
    ///
    /// Each failure is recorded in its entry and the remaining destinations are still
    /// attempted. The result has exactly one entry per destination, in input order.
    pub async fn send_bulk<S: AsRef<str>>(
        &self,
        destinations: &[S],
        message: &MessageText,
    ) -> BatchResult {
        let mut entries = Vec::with_capacity(destinations.len());
        for destination in destinations {
            entries.push(self.send_entry(destination.as_ref(), message).await);
        }
        finish_batch(entries)
    }

    /// Like [`Dispatcher::send_bulk`] but with up to `limit` sends in flight.
    ///
    /// Ordering and per-destination isolation are the same as the sequential version.
    /// A `limit` of 0 is treated as 1.
    pub async fn send_bulk_concurrent<S: AsRef<str>>(
        &self,
        destinations: &[S],
        message: &MessageText,
        limit: usize,
    ) -> BatchResult {
        let entries = futures::stream::iter(destinations)
            .map(|destination| self.send_entry(destination.as_ref(), message))
            .buffered(limit.max(1))
            .collect::<Vec<_>>()
            .await;
        finish_batch(entries)
    }

    pub async fn send_bulk_request(&self, request: &BulkSendRequest) -> BatchResult {
        self.send_bulk(request.destinations_raw.as_slice(), &request.message)
            .await
    }

    async fn send_entry(&self, destination_raw: &str, message: &MessageText) -> BatchEntry {
        let outcome = match self.send(destination_raw, message).await {
            Ok(result) => BatchOutcome::Delivered(result),
            Err(err) => BatchOutcome::Failed {
                error: err.to_string(),
            },
        };
        BatchEntry {
            destination_raw: destination_raw.to_owned(),
            outcome,
        }
    }
}

fn finish_batch(entries: Vec<BatchEntry>) -> BatchResult {
    let result = BatchResult::from_entries(entries);
    tracing::info!(
        total = result.len(),
        succeeded = result.succeeded(),
        failed = result.failed(),
        "bulk SMS finished"
    );
    result
}
