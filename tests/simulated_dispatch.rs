use std::collections::HashMap;

use smsdispatch::{BulkSendRequest, Dispatcher, MessageText, Provider, ProviderConfig, SendRequest};

fn dispatcher_from(vars: &[(&str, &str)]) -> Dispatcher {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    let config = ProviderConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
    Dispatcher::new(config).unwrap()
}

#[test]
fn provider_follows_configured_credentials() {
    assert_eq!(dispatcher_from(&[]).provider(), Provider::Simulated);
    assert_eq!(
        dispatcher_from(&[("SMS_API_KEY", "key")]).provider(),
        Provider::Gateway
    );
    assert_eq!(
        dispatcher_from(&[
            ("SMS_API_KEY", "key"),
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_AUTH_TOKEN", "token"),
            ("TWILIO_PHONE_NUMBER", "+15005550006"),
        ])
        .provider(),
        Provider::PrimaryCarrier
    );
}

#[tokio::test]
async fn unconfigured_dispatcher_simulates_sends() {
    let dispatcher = dispatcher_from(&[]);

    let result = dispatcher
        .send_request(&SendRequest::new("+255 712 345 678", "hello"))
        .await
        .unwrap();
    assert!(result.success);
    assert!(result.simulated());
    assert_eq!(result.to.as_str(), "+255712345678");

    let request: BulkSendRequest = serde_json::from_str(
        r#"{"destinationsRaw": ["0712345678", "712345678", "garbage"], "message": "hi"}"#,
    )
    .unwrap();
    let batch = dispatcher.send_bulk_request(&request).await;
    assert_eq!(batch.len(), 3);
    assert_eq!(batch.succeeded(), 3);

    let json = serde_json::to_value(&batch).unwrap();
    assert_eq!(json[1]["destinationRaw"], "712345678");
    assert_eq!(json[1]["result"]["to"], "+255712345678");
    assert_eq!(json[2]["result"]["to"], "+");

    let empty: Vec<String> = Vec::new();
    let batch = dispatcher
        .send_bulk_concurrent(empty.as_slice(), &MessageText::new("hi"), 8)
        .await;
    assert!(batch.is_empty());
}
