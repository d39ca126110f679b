//! Transport layer: provider wire formats (form / JSON encoding, response decoding).

mod carrier;
mod gateway;

pub use carrier::{
    DEFAULT_CARRIER_BASE, carrier_messages_url, decode_carrier_message_id, encode_carrier_form,
};
pub use gateway::{decode_gateway_message_id, encode_gateway_json};

/// Parse a provider body as JSON, keeping non-JSON bodies as a JSON string.
pub fn decode_response_body(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_owned()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::decode_response_body;

    #[test]
    fn response_body_decoding_is_lenient() {
        assert_eq!(decode_response_body(r#"{"sid":"SM1"}"#), json!({"sid": "SM1"}));
        assert_eq!(decode_response_body("Queued"), json!("Queued"));
        assert_eq!(decode_response_body("  "), serde_json::Value::Null);
    }
}
