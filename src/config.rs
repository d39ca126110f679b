//! Provider configuration, read once at startup and injected into the dispatcher.

use std::time::Duration;

use crate::domain::{AccountSid, ApiKey, ApiUrl, AuthToken, SenderNumber, ValidationError};

/// Gateway endpoint used when `SMS_API_URL` is not set.
pub const DEFAULT_GATEWAY_URL: &str = "https://api.sms-gateway.example/v1/send";

/// Bound applied to every outbound delivery request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding [`DEFAULT_TIMEOUT`], in whole seconds.
pub const TIMEOUT_VAR: &str = "SMS_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Primary-carrier (Twilio) credentials. All three parts are required.
pub struct CarrierCredentials {
    pub account_sid: AccountSid,
    pub auth_token: AuthToken,
    pub sender_number: SenderNumber,
}

impl CarrierCredentials {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        sender_number: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_sid: AccountSid::new(account_sid)?,
            auth_token: AuthToken::new(auth_token)?,
            sender_number: SenderNumber::new(sender_number)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Generic-gateway credentials.
pub struct GatewayCredentials {
    pub api_key: ApiKey,
    pub api_url: ApiUrl,
}

impl GatewayCredentials {
    /// Gateway credentials pointing at [`DEFAULT_GATEWAY_URL`].
    pub fn new(api_key: impl Into<String>) -> Result<Self, ValidationError> {
        Self::with_url(api_key, DEFAULT_GATEWAY_URL)
    }

    pub fn with_url(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            api_url: ApiUrl::parse(api_url)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Process-wide delivery configuration.
///
/// Read-only once built. Missing credentials are not an error: with neither provider
/// configured the dispatcher falls back to simulation.
pub struct ProviderConfig {
    pub primary_carrier: Option<CarrierCredentials>,
    pub gateway: Option<GatewayCredentials>,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            primary_carrier: None,
            gateway: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProviderConfig {
    /// Configuration with no credentials (simulation only).
    pub fn simulated() -> Self {
        Self::default()
    }

    pub fn with_primary_carrier(mut self, credentials: CarrierCredentials) -> Self {
        self.primary_carrier = Some(credentials);
        self
    }

    pub fn with_gateway(mut self, credentials: GatewayCredentials) -> Self {
        self.gateway = Some(credentials);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// Recognised variables: `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`,
    /// `TWILIO_PHONE_NUMBER`, `SMS_API_KEY`, `SMS_API_URL` and `SMS_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as absent. Carrier credentials are only taken when all three
    /// parts are present. Errors only on a present but unparsable `SMS_API_URL`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let primary_carrier = match (
            get(AccountSid::FIELD),
            get(AuthToken::FIELD),
            get(SenderNumber::FIELD),
        ) {
            (Some(sid), Some(token), Some(sender)) => {
                Some(CarrierCredentials::new(sid, token, sender)?)
            }
            (None, None, None) => None,
            _ => {
                tracing::warn!(
                    "incomplete primary-carrier credentials; {}, {} and {} are all required",
                    AccountSid::FIELD,
                    AuthToken::FIELD,
                    SenderNumber::FIELD,
                );
                None
            }
        };

        let gateway = match get(ApiKey::FIELD) {
            Some(api_key) => {
                let api_url = get(ApiUrl::FIELD).unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_owned());
                Some(GatewayCredentials::with_url(api_key, api_url)?)
            }
            None => None,
        };

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default_secs = DEFAULT_TIMEOUT.as_secs(),
                        "ignoring invalid {TIMEOUT_VAR}",
                    );
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            primary_carrier,
            gateway,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_has_no_credentials() {
        let config = ProviderConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ProviderConfig::simulated());
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_all_carrier_credentials() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_AUTH_TOKEN", "token"),
            ("TWILIO_PHONE_NUMBER", "+15005550006"),
        ]))
        .unwrap();

        let carrier = config.primary_carrier.unwrap();
        assert_eq!(carrier.account_sid.as_str(), "AC123");
        assert_eq!(carrier.auth_token.as_str(), "token");
        assert_eq!(carrier.sender_number.as_str(), "+15005550006");
        assert!(config.gateway.is_none());
    }

    #[test]
    fn partial_carrier_credentials_are_ignored() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_AUTH_TOKEN", "token"),
            ("TWILIO_PHONE_NUMBER", "   "),
        ]))
        .unwrap();
        assert!(config.primary_carrier.is_none());
    }

    #[test]
    fn gateway_url_defaults_when_unset() {
        let config = ProviderConfig::from_lookup(lookup(&[("SMS_API_KEY", "key")])).unwrap();
        let gateway = config.gateway.unwrap();
        assert_eq!(gateway.api_key.as_str(), "key");
        assert_eq!(gateway.api_url.as_str(), DEFAULT_GATEWAY_URL);
    }

    #[test]
    fn gateway_url_is_taken_from_environment() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("SMS_API_KEY", "key"),
            ("SMS_API_URL", "https://gateway.example.com/messages"),
        ]))
        .unwrap();
        assert_eq!(
            config.gateway.unwrap().api_url.as_str(),
            "https://gateway.example.com/messages"
        );
    }

    #[test]
    fn gateway_url_without_key_is_ignored() {
        let config = ProviderConfig::from_lookup(lookup(&[(
            "SMS_API_URL",
            "https://gateway.example.com/messages",
        )]))
        .unwrap();
        assert!(config.gateway.is_none());
    }

    #[test]
    fn invalid_gateway_url_is_rejected() {
        let err = ProviderConfig::from_lookup(lookup(&[
            ("SMS_API_KEY", "key"),
            ("SMS_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidUrl {
                field: "SMS_API_URL",
                ..
            }
        ));
    }

    #[test]
    fn timeout_override_and_fallback() {
        let config = ProviderConfig::from_lookup(lookup(&[("SMS_TIMEOUT_SECS", "3")])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));

        let config = ProviderConfig::from_lookup(lookup(&[("SMS_TIMEOUT_SECS", "soon")])).unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config = ProviderConfig::from_lookup(lookup(&[("SMS_TIMEOUT_SECS", "0")])).unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
