/// Errors raised by signal sources.
///
/// `Decode` is always contained inside the source: the payload is logged and
/// dropped while the connection stays up. `Endpoint` is a configuration error
/// raised before any connection is made. The remaining variants are transport
/// failures that end the current connection and trigger a reconnect.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("dropping undecodable payload {payload:?}: {source}")]
    Decode {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stream transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("stream endpoint answered HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("stream endpoint served {0:?} instead of text/event-stream")]
    ContentType(String),

    #[error("stream endpoint closed the connection")]
    Closed,

    #[error("invalid stream endpoint {url:?}: {reason}")]
    Endpoint { url: String, reason: String },
}

impl StreamError {
    /// `true` for errors that concern a single payload rather than the connection.
    pub fn is_decode(&self) -> bool {
        matches!(self, StreamError::Decode { .. })
    }
}
