//! Delivery backends. One variant is selected from [`ProviderConfig`] and kept for the
//! lifetime of the dispatcher.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::client::DeliveryError;
use crate::client::http::{HttpBody, HttpRequest, HttpTransport};
use crate::config::{CarrierCredentials, GatewayCredentials, ProviderConfig};
use crate::domain::{DeliveryResult, MessageText, NormalizedAddress, Provider};

#[derive(Clone)]
struct Delivery {
    http: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl Delivery {
    /// Issue the request within the timeout bound and decode a 2xx body.
    async fn execute(&self, request: HttpRequest) -> Result<serde_json::Value, DeliveryError> {
        let response = tokio::time::timeout(self.timeout, self.http.post(request))
            .await
            .map_err(|_| DeliveryError::Timeout {
                after: self.timeout,
            })?
            .map_err(DeliveryError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(DeliveryError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(crate::transport::decode_response_body(&response.body))
    }
}

#[derive(Clone)]
pub(crate) struct CarrierBackend {
    credentials: CarrierCredentials,
    url: String,
    delivery: Delivery,
}

impl CarrierBackend {
    async fn send(
        &self,
        to: &NormalizedAddress,
        message: &MessageText,
    ) -> Result<DeliveryResult, DeliveryError> {
        let request = HttpRequest {
            url: self.url.clone(),
            basic_auth: Some((
                self.credentials.account_sid.as_str().to_owned(),
                self.credentials.auth_token.as_str().to_owned(),
            )),
            body: HttpBody::Form(crate::transport::encode_carrier_form(
                &self.credentials,
                to,
                message,
            )),
        };

        let response = self.delivery.execute(request).await?;
        Ok(DeliveryResult {
            success: true,
            provider: Provider::PrimaryCarrier,
            to: to.clone(),
            message_id: crate::transport::decode_carrier_message_id(&response),
            response,
        })
    }
}

#[derive(Clone)]
pub(crate) struct GatewayBackend {
    credentials: GatewayCredentials,
    delivery: Delivery,
}

impl GatewayBackend {
    async fn send(
        &self,
        to: &NormalizedAddress,
        message: &MessageText,
    ) -> Result<DeliveryResult, DeliveryError> {
        let request = HttpRequest {
            url: self.credentials.api_url.as_str().to_owned(),
            basic_auth: None,
            body: HttpBody::Json(crate::transport::encode_gateway_json(
                &self.credentials,
                to,
                message,
            )),
        };

        let response = self.delivery.execute(request).await?;
        Ok(DeliveryResult {
            success: true,
            provider: Provider::Gateway,
            to: to.clone(),
            message_id: crate::transport::decode_gateway_message_id(&response),
            response,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SimulatedBackend;

impl SimulatedBackend {
    fn send(&self, to: &NormalizedAddress, message: &MessageText) -> DeliveryResult {
        info!(
            target: "smsdispatch::simulated",
            to = %to,
            message = %message.as_str(),
            "simulated SMS; no provider configured"
        );
        DeliveryResult {
            success: true,
            provider: Provider::Simulated,
            to: to.clone(),
            message_id: None,
            response: serde_json::json!({ "simulated": true }),
        }
    }
}

#[derive(Clone)]
pub(crate) enum Backend {
    PrimaryCarrier(CarrierBackend),
    Gateway(GatewayBackend),
    Simulated(SimulatedBackend),
}

impl Backend {
    /// Pick the active backend: primary carrier, then gateway, then simulation.
    pub(crate) fn select(
        config: &ProviderConfig,
        carrier_base: &str,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        let delivery = Delivery {
            http,
            timeout: config.timeout,
        };

        let backend = if let Some(credentials) = &config.primary_carrier {
            Self::PrimaryCarrier(CarrierBackend {
                url: crate::transport::carrier_messages_url(carrier_base, credentials),
                credentials: credentials.clone(),
                delivery,
            })
        } else if let Some(credentials) = &config.gateway {
            Self::Gateway(GatewayBackend {
                credentials: credentials.clone(),
                delivery,
            })
        } else {
            Self::Simulated(SimulatedBackend)
        };

        match backend.provider() {
            Provider::Simulated => {
                warn!("no SMS provider credentials configured; messages will be simulated")
            }
            provider => info!(%provider, timeout_secs = config.timeout.as_secs(), "SMS provider selected"),
        }
        backend
    }

    pub(crate) fn provider(&self) -> Provider {
        match self {
            Self::PrimaryCarrier(_) => Provider::PrimaryCarrier,
            Self::Gateway(_) => Provider::Gateway,
            Self::Simulated(_) => Provider::Simulated,
        }
    }

    pub(crate) async fn send(
        &self,
        to: &NormalizedAddress,
        message: &MessageText,
    ) -> Result<DeliveryResult, DeliveryError> {
        let provider = self.provider();
        debug!(
            %provider,
            to = %to.masked(),
            message_length = message.len(),
            "sending SMS"
        );

        let result = match self {
            Self::PrimaryCarrier(backend) => backend.send(to, message).await,
            Self::Gateway(backend) => backend.send(to, message).await,
            Self::Simulated(backend) => Ok(backend.send(to, message)),
        };

        match &result {
            Ok(delivered) => info!(
                %provider,
                to = %to.masked(),
                message_id = delivered.message_id.as_deref().unwrap_or("-"),
                "SMS sent"
            ),
            Err(err) => warn!(
                %provider,
                to = %to.masked(),
                error = %err,
                "SMS delivery failed"
            ),
        }
        result
    }
}
