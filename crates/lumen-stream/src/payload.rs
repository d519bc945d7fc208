use std::fmt;

use serde_json::Value;

use crate::error::StreamError;

/// A decoded stream payload together with its canonical JSON text.
///
/// Any JSON document is accepted; consumers look up the fields they care about.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    document: Value,
    encoded: String,
}

impl Payload {
    /// Parses `raw` as JSON.
    pub fn decode(raw: &str) -> Result<Self, StreamError> {
        let document: Value = serde_json::from_str(raw).map_err(|source| StreamError::Decode {
            payload: raw.to_owned(),
            source,
        })?;
        Ok(Self::from_value(document))
    }

    pub fn from_value(document: Value) -> Self {
        let encoded = document.to_string();
        Self { document, encoded }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Compact JSON encoding of the document.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Returns `field` if the payload is an object and that field is a JSON number.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.document.get(field).and_then(Value::as_f64)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}
