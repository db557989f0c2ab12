//! Backend response decoding.

use serde_json::{json, Value};

/// How a client method should hand back a non-streamed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Decoded JSON value; undecodable bodies become `{"raw": <text>}`.
    #[default]
    Structured,
    /// Pretty-printed JSON text, or the raw body when it is not JSON.
    Text,
}

/// Result of one backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResponse {
    Object(Value),
    RawText(String),
    /// Non-empty lines of a streamed body joined with `\n`.
    StreamConcat(String),
}

impl RemoteResponse {
    /// Decode a 2xx body according to `format`. Never fails.
    pub fn decode(body: &str, format: ResponseFormat) -> Self {
        let parsed = serde_json::from_str::<Value>(body);
        match (format, parsed) {
            (ResponseFormat::Structured, Ok(value)) => RemoteResponse::Object(value),
            (ResponseFormat::Structured, Err(e)) => {
                tracing::debug!("Body is not JSON ({}), wrapping as raw", e);
                RemoteResponse::Object(json!({ "raw": body }))
            }
            (ResponseFormat::Text, Ok(value)) => RemoteResponse::RawText(pretty(&value)),
            (ResponseFormat::Text, Err(_)) => RemoteResponse::RawText(body.to_string()),
        }
    }

    /// Wrap a locally produced value (e.g. a not-found upload) the same way
    /// a backend body would be.
    pub fn local(value: Value, format: ResponseFormat) -> Self {
        match format {
            ResponseFormat::Structured => RemoteResponse::Object(value),
            ResponseFormat::Text => RemoteResponse::RawText(value.to_string()),
        }
    }

    /// Structured view used when embedding into a tool result.
    pub fn into_value(self) -> Value {
        match self {
            RemoteResponse::Object(value) => value,
            RemoteResponse::RawText(text) => Value::String(text),
            RemoteResponse::StreamConcat(text) => Value::String(text),
        }
    }

    /// Text view of the response.
    pub fn to_text(&self) -> String {
        match self {
            RemoteResponse::Object(value) => pretty(value),
            RemoteResponse::RawText(text) | RemoteResponse::StreamConcat(text) => text.clone(),
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Accumulates streamed chunks and joins complete, non-empty lines.
///
/// Chunk boundaries are arbitrary; a line split across two chunks is only
/// emitted once its terminator (or the end of stream) arrives.
#[derive(Debug, Default)]
pub struct LineJoiner {
    pending: Vec<u8>,
    lines: Vec<String>,
}

impl LineJoiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of body bytes.
    pub fn push(&mut self, chunk: &[u8]) {
        // `pending` never holds a newline between calls.
        let mut search = self.pending.len();
        self.pending.extend_from_slice(chunk);

        let mut start = 0;
        while let Some(offset) = self.pending[search..].iter().position(|b| *b == b'\n') {
            let end = search + offset;
            Self::take_line(&mut self.lines, &self.pending[start..end]);
            start = end + 1;
            search = start;
        }
        self.pending.drain(..start);
    }

    /// Flush the trailing partial line and return the joined text.
    pub fn finish(mut self) -> String {
        let rest = std::mem::take(&mut self.pending);
        Self::take_line(&mut self.lines, &rest);
        self.lines.join("\n")
    }

    fn take_line(lines: &mut Vec<String>, raw: &[u8]) {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        if raw.is_empty() {
            return;
        }
        lines.push(String::from_utf8_lossy(raw).into_owned());
    }
}
