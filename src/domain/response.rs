use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::address::NormalizedAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
/// Delivery backend that produced a result.
pub enum Provider {
    PrimaryCarrier,
    Gateway,
    Simulated,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryCarrier => "primary-carrier",
            Self::Gateway => "gateway",
            Self::Simulated => "simulated",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Outcome of one successful send attempt.
pub struct DeliveryResult {
    pub success: bool,
    pub provider: Provider,
    pub to: NormalizedAddress,
    pub message_id: Option<String>,
    /// Provider payload. Bodies that are not JSON are kept as a JSON string.
    pub response: serde_json::Value,
}

impl DeliveryResult {
    /// Whether the result came from the simulation backend.
    pub fn simulated(&self) -> bool {
        self.provider == Provider::Simulated
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Delivered(DeliveryResult),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
/// Per-recipient entry of a [`BatchResult`].
pub struct BatchEntry {
    pub destination_raw: String,
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Delivered(_))
    }

    pub fn result(&self) -> Option<&DeliveryResult> {
        match &self.outcome {
            BatchOutcome::Delivered(result) => Some(result),
            BatchOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            BatchOutcome::Delivered(_) => None,
            BatchOutcome::Failed { error } => Some(error),
        }
    }
}

impl Serialize for BatchEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BatchEntry", 3)?;
        state.serialize_field("destinationRaw", &self.destination_raw)?;
        state.serialize_field("success", &self.is_success())?;
        match &self.outcome {
            BatchOutcome::Delivered(result) => state.serialize_field("result", result)?,
            BatchOutcome::Failed { error } => state.serialize_field("error", error)?,
        }
        state.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
/// Ordered per-recipient outcomes of a bulk send.
///
/// Invariant: one entry per input address, in input order.
pub struct BatchResult(Vec<BatchEntry>);

impl BatchResult {
    pub(crate) fn from_entries(entries: Vec<BatchEntry>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchEntry> {
        self.0.iter()
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.0
    }

    /// Number of entries that were delivered.
    pub fn succeeded(&self) -> usize {
        self.0.iter().filter(|entry| entry.is_success()).count()
    }

    /// Number of entries that failed.
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    pub fn into_entries(self) -> Vec<BatchEntry> {
        self.0
    }
}

impl IntoIterator for BatchResult {
    type Item = BatchEntry;
    type IntoIter = std::vec::IntoIter<BatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a BatchEntry;
    type IntoIter = std::slice::Iter<'a, BatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
