use crate::config::CarrierCredentials;
use crate::domain::{MessageText, NormalizedAddress};

pub const DEFAULT_CARRIER_BASE: &str = "https://api.twilio.com/2010-04-01/Accounts";

pub fn carrier_messages_url(base: &str, credentials: &CarrierCredentials) -> String {
    format!(
        "{}/{}/Messages.json",
        base.trim_end_matches('/'),
        credentials.account_sid.as_str()
    )
}

pub fn encode_carrier_form(
    credentials: &CarrierCredentials,
    to: &NormalizedAddress,
    message: &MessageText,
) -> Vec<(String, String)> {
    vec![
        ("To".to_owned(), to.as_str().to_owned()),
        (
            "From".to_owned(),
            credentials.sender_number.as_str().to_owned(),
        ),
        ("Body".to_owned(), message.as_str().to_owned()),
    ]
}

/// Message resource id (`sid`) from a Messages.json response.
pub fn decode_carrier_message_id(response: &serde_json::Value) -> Option<String> {
    response
        .get("sid")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}
