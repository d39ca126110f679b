//! Domain layer: strong types with validation and invariants (no I/O).

mod address;
mod request;
mod response;
mod validation;
mod value;

pub use address::{COUNTRY_CODE, NormalizedAddress, mask_address, normalize};
pub use request::{BulkSendRequest, SendRequest};
pub use response::{BatchEntry, BatchOutcome, BatchResult, DeliveryResult, Provider};
pub use validation::ValidationError;
pub use value::{AccountSid, ApiKey, ApiUrl, AuthToken, MessageText, SenderNumber};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_deserializes_camel_case() {
        let request: SendRequest =
            serde_json::from_str(r#"{"destinationRaw": "0712 345 678", "message": "hi"}"#)
                .unwrap();
        assert_eq!(request, SendRequest::new("0712 345 678", "hi"));
        assert_eq!(normalize(&request.destination_raw).as_str(), "+255712345678");
    }

    #[test]
    fn bulk_send_request_keeps_destination_order() {
        let request: BulkSendRequest = serde_json::from_str(
            r#"{"destinationsRaw": ["0712345678", "0655000111", "712000000"], "message": "hi"}"#,
        )
        .unwrap();
        assert_eq!(
            request.destinations_raw,
            vec!["0712345678", "0655000111", "712000000"]
        );
        assert_eq!(request.message.as_str(), "hi");
    }

    #[test]
    fn bulk_send_request_accepts_empty_list() {
        let request: BulkSendRequest =
            serde_json::from_str(r#"{"destinationsRaw": [], "message": "hi"}"#).unwrap();
        assert!(request.destinations_raw.is_empty());
    }
}
