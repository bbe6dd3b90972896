//! Server-sent event subscription for `/events`.
//!
//! The server pushes dashboard notifications (NFC reads, doorbell presses)
//! as a `text/event-stream`. [`EventStreamDecoder`] turns raw body chunks
//! into complete `data` payloads; [`HttpClient::listen_events`] drives it
//! over a live response.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::time::Duration;

use futures_util::StreamExt;

use super::api::{ApiError, EVENTS_PATH, HttpClient, decode_response};
use super::types::ServerEvent;

/// Upper bound on a single subscription before the caller must reconnect.
pub const EVENT_STREAM_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Incremental `text/event-stream` decoder.
///
/// Only the `data` field is interpreted. Comment lines (leading `:`) and
/// other fields (`event`, `id`, `retry`) are skipped.
#[derive(Debug, Default)]
pub struct EventStreamDecoder {
    pending: Vec<u8>,
    data: Vec<String>,
}

impl EventStreamDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a body chunk; returns the payloads of every event it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut completed = Vec::new();

        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if !self.data.is_empty() {
                    completed.push(self.data.join("\n"));
                    self.data.clear();
                }
                continue;
            }
            if line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };
            if field == "data" {
                self.data.push(value.to_owned());
            }
        }

        completed
    }
}

/// Parse one event payload. Malformed JSON is logged and skipped.
#[must_use]
pub fn parse_event(payload: &str) -> Option<ServerEvent> {
    match serde_json::from_str::<ServerEvent>(payload) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed event payload");
            None
        }
    }
}

impl HttpClient {
    /// Subscribe to `/events` and hand every parsed event to `on_event`
    /// until the server closes the stream.
    ///
    /// The client-wide request timeout is replaced by [`EVENT_STREAM_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription is refused or the connection drops.
    pub async fn listen_events<F>(&self, mut on_event: F) -> Result<(), ApiError>
    where
        F: FnMut(ServerEvent),
    {
        let url = self.config.url(EVENTS_PATH);
        tracing::info!(%url, "subscribing to events");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .timeout(EVENT_STREAM_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return decode_response::<()>(status, &body);
        }

        let mut decoder = EventStreamDecoder::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ApiError::Unreachable(e.to_string()))?;
            for payload in decoder.push(&chunk) {
                if let Some(event) = parse_event(&payload) {
                    tracing::debug!(?event, "event received");
                    on_event(event);
                }
            }
        }

        tracing::info!("event stream closed by server");
        Ok(())
    }
}
