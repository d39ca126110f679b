use std::io;

use smsdispatch::{Dispatcher, MessageText, ProviderConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Upper bound on sends in flight.
const DEFAULT_CONCURRENCY: usize = 4;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smsdispatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Comma-separated, e.g. "0712345678,0755000001".
    let destinations: Vec<String> = std::env::var("SMS_TO")
        .map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "SMS_TO environment variable is required",
            )
        })?
        .split(',')
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_owned)
        .collect();
    let message = std::env::var("SMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsdispatch demo.".to_owned());
    let concurrency = std::env::var("SMS_CONCURRENCY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CONCURRENCY);

    let dispatcher = Dispatcher::new(ProviderConfig::from_env()?)?;
    let batch = dispatcher
        .send_bulk_concurrent(destinations.as_slice(), &MessageText::new(message), concurrency)
        .await;

    for entry in &batch {
        match entry.error() {
            None => println!("{}: sent", entry.destination_raw),
            Some(error) => println!("{}: failed ({error})", entry.destination_raw),
        }
    }
    println!("{} sent, {} failed", batch.succeeded(), batch.failed());

    Ok(())
}
