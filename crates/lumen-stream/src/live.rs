use std::time::Duration;

use futures::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use tokio::time;

use crate::backoff::{Backoff, DEFAULT_RECONNECT_INITIAL, DEFAULT_RECONNECT_MAX};
use crate::dispatch::Dispatcher;
use crate::error::StreamError;
use crate::payload::Payload;
use crate::sse::{EventParser, SseEvent};
use crate::status::{ConnectionState, ConnectionStatus};

const EVENT_STREAM: &str = "text/event-stream";
const LAST_EVENT_ID: &str = "Last-Event-ID";

#[derive(Debug, Clone)]
pub struct LiveConfig {
    pub url: String,
    pub reconnect_initial: Duration,
    pub reconnect_max: Duration,
    pub connect_timeout: Duration,
}

impl LiveConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_initial: DEFAULT_RECONNECT_INITIAL,
            reconnect_max: DEFAULT_RECONNECT_MAX,
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Checks that the endpoint is a plain `http://` URL.
    ///
    /// The client carries no TLS backend, so `https://` could never connect.
    pub fn validate(&self) -> Result<(), StreamError> {
        let invalid = |reason: String| StreamError::Endpoint {
            url: self.url.clone(),
            reason,
        };

        let url = reqwest::Url::parse(&self.url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" => Ok(()),
            other => Err(invalid(format!(
                "unsupported scheme {other:?}, only http:// endpoints are supported"
            ))),
        }
    }
}

/// Server-Sent Events client.
///
/// Holds one long-lived GET open at a time. Any transport failure, non-success
/// status, wrong content type or server close reports the reconnecting status and
/// retries after an exponential backoff. The backoff restarts after every
/// successful open, and the last seen event id is sent back on reconnect.
pub struct LiveSource {
    client: reqwest::Client,
    config: LiveConfig,
    backoff: Backoff,
    last_event_id: Option<String>,
    state: ConnectionState,
}

impl LiveSource {
    pub fn new(config: LiveConfig) -> Result<Self, StreamError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            backoff: Backoff::new(config.reconnect_initial, config.reconnect_max),
            config,
            last_event_id: None,
            state: ConnectionState::Disconnected,
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Streams until the task is dropped. Never returns on its own.
    pub async fn run(mut self, dispatcher: &mut Dispatcher) {
        loop {
            let err = match self.connect_once(dispatcher).await {
                Ok(()) => StreamError::Closed,
                Err(err) => err,
            };
            log::error!("{err}");

            self.state = ConnectionState::Errored;
            dispatcher.connection_changed(&ConnectionStatus::RECONNECTING);

            let delay = self.backoff.next_delay();
            log::info!("reconnecting to {} in {delay:?}", self.config.url);
            time::sleep(delay).await;
        }
    }

    /// One connection attempt. `Ok(())` means the server ended the stream.
    async fn connect_once(&mut self, dispatcher: &mut Dispatcher) -> Result<(), StreamError> {
        self.state = ConnectionState::Connecting;
        log::debug!("connecting to {}", self.config.url);

        let mut request = self
            .client
            .get(&self.config.url)
            .header(ACCEPT, EVENT_STREAM)
            .header(CACHE_CONTROL, "no-cache");
        if let Some(id) = &self.last_event_id {
            request = request.header(LAST_EVENT_ID, id.as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Status(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        if !is_event_stream(&content_type) {
            return Err(StreamError::ContentType(content_type));
        }

        self.backoff.reset();
        self.state = ConnectionState::Open;
        dispatcher.connection_changed(&ConnectionStatus::CONNECTED);
        log::info!("stream open: {}", self.config.url);

        let mut parser = EventParser::resuming(self.last_event_id.as_deref());
        let mut body = response.bytes_stream();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for event in parser.feed(&chunk) {
                self.handle_event(&event, dispatcher);
            }

            if let Some(retry) = parser.take_retry() {
                log::debug!("server requested retry delay {retry:?}");
                self.backoff.set_base(retry);
            }
            self.last_event_id = parser.last_event_id().map(str::to_owned);
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &SseEvent, dispatcher: &mut Dispatcher) {
        if !event.is_message() {
            log::debug!("ignoring '{}' event", event.event);
            return;
        }

        match Payload::decode(&event.data) {
            Ok(payload) => {
                self.state = ConnectionState::Streaming;
                dispatcher.deliver(&payload);
            }
            Err(err) => log::warn!("{err}"),
        }
    }
}

fn is_event_stream(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(EVENT_STREAM))
}
