//! Single-slot holder for the most recent webhook payload.
//!
//! The automation workflow posts its rows here and the dashboard later reads
//! back whatever arrived last. Only one payload is ever kept; a new one
//! replaces the old one wholesale.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedPayload {
    pub data: Value,
    pub received_at: DateTime<Utc>,
    pub source: String,
}

impl ReceivedPayload {
    /// Number of records: the array length, or 1 for anything else.
    pub fn record_count(&self) -> usize {
        match &self.data {
            Value::Array(items) => items.len(),
            _ => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub record_count: usize,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct PayloadInbox {
    slot: Mutex<Option<ReceivedPayload>>,
}

impl PayloadInbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<ReceivedPayload>> {
        // The slot holds plain data; a panic mid-write cannot leave it torn.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store `data` as the latest payload, replacing any earlier one.
    pub fn receive(&self, data: Value, source: impl Into<String>) -> Receipt {
        self.receive_at(data, source, Utc::now())
    }

    pub fn receive_at(
        &self,
        data: Value,
        source: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Receipt {
        let payload = ReceivedPayload {
            data,
            received_at,
            source: source.into(),
        };
        let receipt = Receipt {
            record_count: payload.record_count(),
            received_at,
        };
        log::info!(
            "received {} records from {}",
            receipt.record_count,
            payload.source
        );
        *self.lock() = Some(payload);
        receipt
    }

    pub fn latest(&self) -> Option<ReceivedPayload> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }
}
