//! Outbound SMS dispatcher.
//!
//! Destinations are normalized to `+255...` form, a single delivery provider is chosen
//! from the [`ProviderConfig`] (Twilio-style primary carrier, a generic JSON gateway, or a
//! log-only simulation), and every send reports a uniform [`DeliveryResult`]. Bulk sends
//! keep one entry per recipient and never let one failure stop the rest.
//!
//! ```rust,no_run
//! use smsdispatch::{Dispatcher, MessageText, ProviderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = Dispatcher::new(ProviderConfig::from_env()?)?;
//!     let msg = MessageText::new("hello");
//!     let _sent = dispatcher.send("0712 345 678", &msg).await?;
//!     let batch = dispatcher.send_bulk(&["0712345678", "0755000001"], &msg).await;
//!     assert_eq!(batch.len(), 2);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use client::{DeliveryError, Dispatcher, DispatcherBuilder};
pub use config::{CarrierCredentials, DEFAULT_GATEWAY_URL, GatewayCredentials, ProviderConfig};
pub use domain::{
    BatchEntry, BatchOutcome, BatchResult, BulkSendRequest, DeliveryResult, MessageText,
    NormalizedAddress, Provider, SendRequest, ValidationError, normalize,
};
