//! Realtime change feed over the Phoenix channel protocol
//!
//! The socket itself is supplied by a [`RealtimeTransport`] (the browser's
//! WebSocket in the web app). This module only speaks the protocol: it
//! decides which frames go out on open, on each heartbeat tick and on
//! release, and turns incoming `postgres_changes` frames into
//! [`ChangeEvent`]s.

use crate::provider::{ChangeEvent, ChangeKind, ProviderError};
use serde::Deserialize;
use serde_json::{json, Value};

/// Interval at which the transport should deliver [`TransportEvent::Tick`]
pub const HEARTBEAT_INTERVAL_MS: u64 = 30_000;

const SCHEMA: &str = "public";

/// What happened on the underlying socket
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Open,
    Message(String),
    /// Heartbeat timer fired
    Tick,
    Closed,
}

/// Called for every socket event; returns the text frames to send back
pub type FrameHandler = Box<dyn FnMut(TransportEvent) -> Vec<String>>;

/// An open socket. Closing sends the farewell frames first if it can.
pub trait RealtimeConnection {
    fn close(&mut self, farewell: Vec<String>);
}

pub trait RealtimeTransport {
    fn connect(
        &self,
        url: &str,
        heartbeat_ms: u64,
        handler: FrameHandler,
    ) -> Result<Box<dyn RealtimeConnection>, ProviderError>;
}

/// Incoming wire frame
#[derive(Debug, Deserialize)]
struct Frame {
    topic: String,
    event: String,
    #[serde(default)]
    payload: Value,
    #[serde(rename = "ref", default)]
    reference: Option<String>,
}

fn encode(topic: &str, event: &str, payload: Value, reference: u64) -> String {
    json!({
        "topic": topic,
        "event": event,
        "payload": payload,
        "ref": reference.to_string(),
    })
    .to_string()
}

fn parse_kind(raw: &str) -> Option<ChangeKind> {
    match raw {
        "INSERT" => Some(ChangeKind::Insert),
        "UPDATE" => Some(ChangeKind::Update),
        "DELETE" => Some(ChangeKind::Delete),
        _ => None,
    }
}

/// Protocol state for one table subscription
#[derive(Debug)]
pub struct RealtimeChannel {
    table: String,
    access_token: String,
    next_ref: u64,
    join_ref: Option<String>,
    joined: bool,
}

impl RealtimeChannel {
    pub fn new(table: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            access_token: access_token.into(),
            next_ref: 1,
            join_ref: None,
            joined: false,
        }
    }

    pub fn topic(&self) -> String {
        format!("realtime:{SCHEMA}:{}", self.table)
    }

    pub fn is_joined(&self) -> bool {
        self.joined
    }

    fn take_ref(&mut self) -> u64 {
        let r = self.next_ref;
        self.next_ref += 1;
        r
    }

    /// Join request listening to every event on the table
    pub fn join(&mut self) -> String {
        let reference = self.take_ref();
        self.join_ref = Some(reference.to_string());
        let payload = json!({
            "config": {
                "postgres_changes": [
                    { "event": "*", "schema": SCHEMA, "table": self.table }
                ]
            },
            "access_token": self.access_token,
        });
        encode(&self.topic(), "phx_join", payload, reference)
    }

    pub fn heartbeat(&mut self) -> String {
        let reference = self.take_ref();
        encode("phoenix", "heartbeat", json!({}), reference)
    }

    pub fn leave(&mut self) -> String {
        let reference = self.take_ref();
        self.joined = false;
        encode(&self.topic(), "phx_leave", json!({}), reference)
    }

    /// Handle one incoming text frame
    pub fn receive(&mut self, text: &str) -> Result<Option<ChangeEvent>, ProviderError> {
        let frame: Frame =
            serde_json::from_str(text).map_err(|e| ProviderError::Realtime(e.to_string()))?;

        if frame.topic != self.topic() {
            return Ok(None);
        }

        match frame.event.as_str() {
            "phx_reply" => {
                let status = frame.payload.get("status").and_then(Value::as_str);
                let is_join_reply = frame.reference.is_some() && frame.reference == self.join_ref;
                match status {
                    Some("ok") if is_join_reply => {
                        self.joined = true;
                        Ok(None)
                    }
                    Some("error") => Err(ProviderError::Realtime(
                        frame
                            .payload
                            .get("response")
                            .map(Value::to_string)
                            .unwrap_or_else(|| "join refused".to_string()),
                    )),
                    _ => Ok(None),
                }
            }
            "phx_error" | "phx_close" => {
                self.joined = false;
                Err(ProviderError::Realtime(format!(
                    "channel {} closed by server",
                    frame.topic
                )))
            }
            "postgres_changes" => {
                let data = frame.payload.get("data").unwrap_or(&Value::Null);
                let kind = data
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(parse_kind);
                let table = data
                    .get("table")
                    .and_then(Value::as_str)
                    .unwrap_or(self.table.as_str())
                    .to_string();
                Ok(kind.map(|kind| ChangeEvent { table, kind }))
            }
            other => Ok(parse_kind(other).map(|kind| ChangeEvent {
                table: self.table.clone(),
                kind,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn join_subscribes_to_all_events_on_table() {
        let mut channel = RealtimeChannel::new("bookmarks", "token");
        let join = parse(&channel.join());

        assert_eq!(join["topic"], "realtime:public:bookmarks");
        assert_eq!(join["event"], "phx_join");
        assert_eq!(join["ref"], "1");
        assert_eq!(
            join["payload"]["config"]["postgres_changes"][0],
            json!({"event": "*", "schema": "public", "table": "bookmarks"})
        );
        assert_eq!(join["payload"]["access_token"], "token");
    }

    #[test]
    fn heartbeat_goes_to_phoenix_topic_with_fresh_ref() {
        let mut channel = RealtimeChannel::new("bookmarks", "token");
        channel.join();
        let beat = parse(&channel.heartbeat());

        assert_eq!(beat["topic"], "phoenix");
        assert_eq!(beat["event"], "heartbeat");
        assert_eq!(beat["ref"], "2");
    }

    #[test]
    fn join_reply_marks_channel_joined() {
        let mut channel = RealtimeChannel::new("bookmarks", "token");
        channel.join();
        let reply = r#"{"topic":"realtime:public:bookmarks","event":"phx_reply","payload":{"status":"ok","response":{}},"ref":"1"}"#;

        assert_eq!(channel.receive(reply).unwrap(), None);
        assert!(channel.is_joined());
    }

    #[test]
    fn postgres_change_becomes_event() {
        let mut channel = RealtimeChannel::new("bookmarks", "token");
        let frame = r#"{"topic":"realtime:public:bookmarks","event":"postgres_changes","payload":{"data":{"type":"DELETE","table":"bookmarks","schema":"public"}},"ref":null}"#;

        assert_eq!(
            channel.receive(frame).unwrap(),
            Some(ChangeEvent {
                table: "bookmarks".into(),
                kind: ChangeKind::Delete,
            })
        );
    }

    #[test]
    fn frames_for_other_topics_are_ignored() {
        let mut channel = RealtimeChannel::new("bookmarks", "token");
        let frame = r#"{"topic":"phoenix","event":"phx_reply","payload":{"status":"ok"},"ref":"2"}"#;

        assert_eq!(channel.receive(frame).unwrap(), None);
    }

    #[test]
    fn join_error_is_reported() {
        let mut channel = RealtimeChannel::new("bookmarks", "token");
        channel.join();
        let reply = r#"{"topic":"realtime:public:bookmarks","event":"phx_reply","payload":{"status":"error","response":{"reason":"unauthorized"}},"ref":"1"}"#;

        assert!(matches!(
            channel.receive(reply),
            Err(ProviderError::Realtime(_))
        ));
    }

    #[test]
    fn garbage_is_an_error_not_a_panic() {
        let mut channel = RealtimeChannel::new("bookmarks", "token");
        assert!(channel.receive("not json").is_err());
    }
}
