use std::io;

use smsdispatch::{Dispatcher, MessageText, ProviderConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smsdispatch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let to = std::env::var("SMS_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS_TO environment variable is required",
        )
    })?;
    let message = std::env::var("SMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsdispatch demo.".to_owned());

    let dispatcher = Dispatcher::new(ProviderConfig::from_env()?)?;
    tracing::info!(provider = %dispatcher.provider(), "dispatcher ready");

    let result = dispatcher.send(&to, &MessageText::new(message)).await?;
    println!("{}", describe(&result));

    Ok(())
}

fn describe(result: &smsdispatch::DeliveryResult) -> String {
    format!(
        "provider: {}, to: {}, message_id: {:?}, response: {}",
        result.provider, result.to, result.message_id, result.response
    )
}
