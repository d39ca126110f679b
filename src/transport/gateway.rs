use crate::config::GatewayCredentials;
use crate::domain::{MessageText, NormalizedAddress};

pub fn encode_gateway_json(
    credentials: &GatewayCredentials,
    to: &NormalizedAddress,
    message: &MessageText,
) -> serde_json::Value {
    serde_json::json!({
        "apiKey": credentials.api_key.as_str(),
        "to": to.as_str(),
        "message": message.as_str(),
    })
}

/// Message id from a gateway response, accepting `messageId` or `id`, string or number.
pub fn decode_gateway_message_id(response: &serde_json::Value) -> Option<String> {
    ["messageId", "id"]
        .iter()
        .filter_map(|key| response.get(*key))
        .find_map(|value| match value {
            serde_json::Value::String(id) => Some(id.clone()),
            serde_json::Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
}
