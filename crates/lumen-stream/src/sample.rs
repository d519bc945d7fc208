use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::payload::Payload;

/// A timestamped scalar reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub value: f64,
    /// Milliseconds since the UNIX epoch.
    pub timestamp: u64,
}

impl Sample {
    pub fn new(value: f64, timestamp: u64) -> Self {
        Self { value, timestamp }
    }

    /// A sample stamped with the current wall-clock time.
    pub fn now(value: f64) -> Self {
        Self::new(value, unix_millis())
    }

    /// Wraps the sample in a payload, the same shape a live endpoint sends.
    pub fn to_payload(&self) -> Payload {
        Payload::from_value(serde_json::json!({
            "value": self.value,
            "timestamp": self.timestamp,
        }))
    }
}

fn unix_millis() -> u64 {
    // A clock before 1970 reads as zero.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
