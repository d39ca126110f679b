use serde::Deserialize;

use crate::domain::value::MessageText;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Single-recipient send, as received from an HTTP layer.
pub struct SendRequest {
    pub destination_raw: String,
    pub message: MessageText,
}

impl SendRequest {
    pub fn new(destination_raw: impl Into<String>, message: impl Into<MessageText>) -> Self {
        Self {
            destination_raw: destination_raw.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One message fanned out to many recipients, as received from an HTTP layer.
pub struct BulkSendRequest {
    pub destinations_raw: Vec<String>,
    pub message: MessageText,
}

impl BulkSendRequest {
    pub fn new(destinations_raw: Vec<String>, message: impl Into<MessageText>) -> Self {
        Self {
            destinations_raw,
            message: message.into(),
        }
    }
}
