//! Incremental `text/event-stream` parser.
//!
//! Bytes are fed as they arrive from the network; chunk boundaries may fall
//! anywhere, including inside a CRLF pair or a multi-byte UTF-8 sequence. Complete
//! events are returned from [`EventParser::feed`] in arrival order. An event still
//! being assembled when the stream ends is discarded.

use std::time::Duration;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Event type used when the stream does not name one.
pub const DEFAULT_EVENT: &str = "message";

/// One dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
    /// Last event id in effect when this event was dispatched.
    pub id: Option<String>,
}

impl SseEvent {
    pub fn is_message(&self) -> bool {
        self.event == DEFAULT_EVENT
    }
}

#[derive(Debug, Default)]
pub struct EventParser {
    line: Vec<u8>,
    skip_lf: bool,
    started: bool,

    event_type: String,
    data: String,
    id_buffer: String,
    last_event_id: String,
    retry: Option<Duration>,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser for a reconnected stream that continues from `last_event_id`.
    pub fn resuming(last_event_id: Option<&str>) -> Self {
        let id = last_event_id.unwrap_or_default().to_owned();
        Self {
            id_buffer: id.clone(),
            last_event_id: id,
            ..Self::default()
        }
    }

    /// Consumes a chunk and returns every event it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut events = Vec::new();

        for &byte in chunk {
            if self.skip_lf {
                self.skip_lf = false;
                if byte == b'\n' {
                    continue;
                }
            }

            match byte {
                b'\r' => {
                    self.skip_lf = true;
                    self.end_line(&mut events);
                }
                b'\n' => self.end_line(&mut events),
                _ => self.line.push(byte),
            }
        }

        events
    }

    /// Reconnection delay most recently announced by the server, if not yet taken.
    pub fn take_retry(&mut self) -> Option<Duration> {
        self.retry.take()
    }

    /// Id of the last dispatched event, `None` if unset or reset by an empty `id:`.
    pub fn last_event_id(&self) -> Option<&str> {
        non_empty(&self.last_event_id)
    }

    fn end_line(&mut self, events: &mut Vec<SseEvent>) {
        let mut raw = std::mem::take(&mut self.line);

        if !self.started {
            self.started = true;
            if raw.starts_with(BOM) {
                raw.drain(..BOM.len());
            }
        }

        let line = String::from_utf8_lossy(&raw);

        if line.is_empty() {
            if let Some(event) = self.dispatch() {
                events.push(event);
            }
            return;
        }

        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.find(':') {
            Some(i) => {
                let value = &line[i + 1..];
                (&line[..i], value.strip_prefix(' ').unwrap_or(value))
            }
            None => (&line[..], ""),
        };

        self.process_field(field, value);
    }

    fn process_field(&mut self, field: &str, value: &str) {
        match field {
            "event" => {
                self.event_type.clear();
                self.event_type.push_str(value);
            }
            "data" => {
                self.data.push_str(value);
                self.data.push('\n');
            }
            "id" => {
                if !value.contains('\0') {
                    self.id_buffer.clear();
                    self.id_buffer.push_str(value);
                }
            }
            "retry" => {
                if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(ms) = value.parse::<u64>() {
                        self.retry = Some(Duration::from_millis(ms));
                    }
                }
            }
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        self.last_event_id.clone_from(&self.id_buffer);

        if self.data.is_empty() {
            self.event_type.clear();
            return None;
        }

        let mut data = std::mem::take(&mut self.data);
        if data.ends_with('\n') {
            data.pop();
        }

        let event = match std::mem::take(&mut self.event_type) {
            t if t.is_empty() => DEFAULT_EVENT.to_string(),
            t => t,
        };

        Some(SseEvent {
            event,
            data,
            id: non_empty(&self.last_event_id).map(str::to_owned),
        })
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(chunks: &[&[u8]]) -> (EventParser, Vec<SseEvent>) {
        let mut parser = EventParser::new();
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend(parser.feed(chunk));
        }
        (parser, out)
    }

    fn data_of(events: &[SseEvent]) -> Vec<&str> {
        events.iter().map(|e| e.data.as_str()).collect()
    }

    // ── dispatch ─────────────────────────────────────────────────────────

    #[test]
    fn single_message() {
        let (_, events) = parse_all(&[b"data: {\"value\":0.7}\n\n"]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "message");
        assert_eq!(events[0].data, "{\"value\":0.7}");
        assert_eq!(events[0].id, None);
        assert!(events[0].is_message());
    }

    #[test]
    fn no_dispatch_without_blank_line() {
        let (_, events) = parse_all(&[b"data: pending\n"]);
        assert!(events.is_empty());
    }

    #[test]
    fn multiline_data_joined_with_newline() {
        let (_, events) = parse_all(&[b"data: a\ndata: b\ndata\n\n"]);
        assert_eq!(data_of(&events), ["a\nb\n"]);
    }

    #[test]
    fn empty_data_is_not_dispatched() {
        let (_, events) = parse_all(&[b"event: ping\n\ndata: x\n\n"]);
        assert_eq!(events.len(), 1);
        // The event type does not leak into the next event.
        assert_eq!(events[0].event, "message");
    }

    #[test]
    fn named_events_keep_their_type() {
        let (_, events) = parse_all(&[b"event: tick\ndata: 1\n\n"]);
        assert_eq!(events[0].event, "tick");
        assert!(!events[0].is_message());
    }

    #[test]
    fn several_events_in_one_chunk() {
        let (_, events) = parse_all(&[b"data: 1\n\ndata: 2\n\ndata: 3\n\n"]);
        assert_eq!(data_of(&events), ["1", "2", "3"]);
    }

    // ── line handling ────────────────────────────────────────────────────

    #[test]
    fn accepts_cr_lf_and_crlf() {
        let (_, events) = parse_all(&[b"data: a\r\rdata: b\n\ndata: c\r\n\r\n"]);
        assert_eq!(data_of(&events), ["a", "b", "c"]);
    }

    #[test]
    fn crlf_split_across_chunks() {
        let (_, events) = parse_all(&[b"data: a\r", b"\n", b"\r", b"\ndata: b\r\n\r\n"]);
        assert_eq!(data_of(&events), ["a", "b"]);
    }

    #[test]
    fn field_split_across_chunks() {
        let (_, events) = parse_all(&[b"da", b"ta: {\"val", b"ue\":1}\n", b"\n"]);
        assert_eq!(data_of(&events), ["{\"value\":1}"]);
    }

    #[test]
    fn utf8_split_across_chunks() {
        let bytes = "data: héllo\n\n".as_bytes();
        // Split inside the two-byte 'é'.
        let split = bytes.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let (_, events) = parse_all(&[&bytes[..split], &bytes[split..]]);
        assert_eq!(data_of(&events), ["héllo"]);
    }

    #[test]
    fn leading_bom_is_stripped() {
        let (_, events) = parse_all(&[b"\xEF\xBB", b"\xBFdata: x\n\n"]);
        assert_eq!(data_of(&events), ["x"]);
    }

    #[test]
    fn comments_are_ignored() {
        let (_, events) = parse_all(&[b": keep-alive\n:\ndata: x\n\n"]);
        assert_eq!(data_of(&events), ["x"]);
    }

    #[test]
    fn only_one_leading_space_is_stripped() {
        let (_, events) = parse_all(&[b"data:  two\ndata:none\n\n"]);
        assert_eq!(data_of(&events), [" two\nnone"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let (_, events) = parse_all(&[b"foo: bar\ndata: x\n\n"]);
        assert_eq!(data_of(&events), ["x"]);
    }

    // ── id / retry ───────────────────────────────────────────────────────

    #[test]
    fn id_persists_across_events() {
        let (parser, events) = parse_all(&[b"id: 7\ndata: a\n\ndata: b\n\n"]);
        assert_eq!(events[0].id.as_deref(), Some("7"));
        assert_eq!(events[1].id.as_deref(), Some("7"));
        assert_eq!(parser.last_event_id(), Some("7"));
    }

    #[test]
    fn empty_id_resets() {
        let (parser, events) = parse_all(&[b"id: 7\ndata: a\n\nid\ndata: b\n\n"]);
        assert_eq!(events[1].id, None);
        assert_eq!(parser.last_event_id(), None);
    }

    #[test]
    fn id_with_nul_is_ignored() {
        let (parser, _) = parse_all(&[b"id: 1\ndata: a\n\nid: 2\0x\ndata: b\n\n"]);
        assert_eq!(parser.last_event_id(), Some("1"));
    }

    #[test]
    fn id_commits_even_without_data() {
        let (parser, events) = parse_all(&[b"id: 9\n\n"]);
        assert!(events.is_empty());
        assert_eq!(parser.last_event_id(), Some("9"));
    }

    #[test]
    fn resuming_keeps_the_previous_id() {
        let mut parser = EventParser::resuming(Some("41"));
        assert_eq!(parser.last_event_id(), Some("41"));

        let events = parser.feed(b"data: x\n\n");
        assert_eq!(events[0].id.as_deref(), Some("41"));
    }

    #[test]
    fn retry_accepts_digits_only() {
        let (mut parser, _) = parse_all(&[b"retry: 1500\n"]);
        assert_eq!(parser.take_retry(), Some(Duration::from_millis(1500)));
        assert_eq!(parser.take_retry(), None);

        parser.feed(b"retry: 1.5\nretry: -3\nretry:\n");
        assert_eq!(parser.take_retry(), None);
    }
}
