use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

fn non_blank(value: impl Into<String>, field: &'static str) -> Result<String, ValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Primary-carrier account identifier (Twilio `AccountSid`).
///
/// Invariant: non-empty after trimming.
pub struct AccountSid(String);

impl AccountSid {
    /// Environment variable the value is read from.
    pub const FIELD: &'static str = "TWILIO_ACCOUNT_SID";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    /// Borrow the validated account id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Primary-carrier auth token.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct AuthToken(String);

impl AuthToken {
    /// Environment variable the value is read from.
    pub const FIELD: &'static str = "TWILIO_AUTH_TOKEN";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender number configured on the primary-carrier account (`From`).
///
/// Invariant: non-empty after trimming. Sent as configured, without normalization.
pub struct SenderNumber(String);

impl SenderNumber {
    /// Environment variable the value is read from.
    pub const FIELD: &'static str = "TWILIO_PHONE_NUMBER";

    /// Create a validated [`SenderNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    /// Borrow the validated sender number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Generic-gateway API key.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct ApiKey(String);

impl ApiKey {
    /// Environment variable the value is read from.
    pub const FIELD: &'static str = "SMS_API_KEY";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_blank(value, Self::FIELD).map(Self)
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Generic-gateway endpoint.
///
/// Invariant: parses as an absolute URL.
pub struct ApiUrl(url::Url);

impl ApiUrl {
    /// Environment variable the value is read from.
    pub const FIELD: &'static str = "SMS_API_URL";

    /// Parse and validate a gateway URL.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = non_blank(value, Self::FIELD)?;
        let url = url::Url::parse(&raw).map_err(|_| ValidationError::InvalidUrl {
            field: Self::FIELD,
            input: raw.clone(),
        })?;
        Ok(Self(url))
    }

    /// Borrow the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// SMS message body.
///
/// Kept as provided. Empty bodies are passed through; the provider decides whether to accept them.
pub struct MessageText(String);

impl MessageText {
    /// Wrap a message body.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the message body.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Body length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the body is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for MessageText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MessageText {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_newtypes_trim_and_validate() {
        let sid = AccountSid::new("  AC123 ").unwrap();
        assert_eq!(sid.as_str(), "AC123");
        assert!(AccountSid::new("   ").is_err());

        let token = AuthToken::new(" secret ").unwrap();
        assert_eq!(token.as_str(), "secret");
        assert!(matches!(
            AuthToken::new(""),
            Err(ValidationError::Empty {
                field: AuthToken::FIELD
            })
        ));

        let sender = SenderNumber::new(" +15005550006 ").unwrap();
        assert_eq!(sender.as_str(), "+15005550006");

        let key = ApiKey::new(" key ").unwrap();
        assert_eq!(key.as_str(), "key");
        assert!(ApiKey::new("\t").is_err());
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let token = AuthToken::new("super-secret").unwrap();
        let key = ApiKey::new("also-secret").unwrap();
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }

    #[test]
    fn api_url_requires_absolute_url() {
        let url = ApiUrl::parse(" https://gateway.example.com/send ").unwrap();
        assert_eq!(url.as_str(), "https://gateway.example.com/send");

        assert!(matches!(
            ApiUrl::parse("gateway/send"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ApiUrl::parse(""),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn message_text_is_kept_verbatim() {
        let msg = MessageText::new(" hi ");
        assert_eq!(msg.as_str(), " hi ");
        assert_eq!(msg.len(), 4);
        assert!(MessageText::new("").is_empty());
    }
}
