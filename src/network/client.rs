//! HTTP dispatcher - sends built requests and formats responses

use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::IgnoredAny;
use tokio::task::JoinHandle;

use crate::constants::{DEFAULT_TIMEOUT_SECS, JSON_INDENT, MAX_RESPONSE_BYTES};
use crate::error::TransportError;
use crate::request::BuiltRequest;

/// Limits applied to every send
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    pub timeout: Duration,
    pub max_body_bytes: usize,
    pub json_indent: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_body_bytes: MAX_RESPONSE_BYTES,
            json_indent: JSON_INDENT,
        }
    }
}

/// Outcome of one send
#[derive(Debug)]
pub struct DispatchResult {
    /// Protocol version, status code and reason phrase; empty on transport failure
    pub status_line: String,
    pub status: Option<u16>,
    pub body: String,
    pub is_error: bool,
    pub error: Option<TransportError>,
    pub elapsed: Duration,
}

impl DispatchResult {
    fn failed(error: TransportError, elapsed: Duration) -> Self {
        DispatchResult {
            status_line: String::new(),
            status: None,
            body: String::new(),
            is_error: true,
            error: Some(error),
            elapsed,
        }
    }

    /// Text for the response pane
    pub fn display_text(&self) -> String {
        match &self.error {
            Some(err) => err.to_string(),
            None => format!("{}\n{}", self.status_line, self.body),
        }
    }
}

/// Sends requests through one pooled client.
///
/// Cheap to clone; clones share the connection pool. Every send is timed
/// out and capped on its own.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    client: reqwest::Client,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::Send)?;
        Ok(Dispatcher::with_client(client, config))
    }

    /// Use an existing client, e.g. one shared with other sessions
    pub fn with_client(client: reqwest::Client, config: DispatchConfig) -> Self {
        Dispatcher { client, config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Send with the configured timeout
    pub async fn send(&self, request: BuiltRequest) -> DispatchResult {
        self.send_with_timeout(request, self.config.timeout).await
    }

    /// Execute one request; never fails, transport errors live in the result
    pub async fn send_with_timeout(&self, request: BuiltRequest, timeout: Duration) -> DispatchResult {
        let start = Instant::now();
        tracing::info!(method = %request.method, url = %request.url, "Executing request");

        let headers = match header_map(&request.headers) {
            Ok(headers) => headers,
            Err(e) => {
                tracing::error!(error = %e, "Rejected request headers");
                return DispatchResult::failed(e, start.elapsed());
            }
        };

        let mut req_builder = self
            .client
            .request(request.method, &request.url)
            .headers(headers)
            .timeout(timeout);
        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        let result = req_builder.send().await;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                let err = classify(e, timeout, TransportError::Send);
                tracing::error!(error = %err, "Request failed");
                return DispatchResult::failed(err, start.elapsed());
            }
        };

        let status = resp.status();
        let status_line = format!(
            "{:?} {} {}",
            resp.version(),
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )
        .trim_end()
        .to_string();

        let bytes = match read_capped(resp, self.config.max_body_bytes).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = classify(e, timeout, TransportError::ReadBody);
                tracing::error!(error = %err, "Reading response failed");
                return DispatchResult::failed(err, start.elapsed());
            }
        };
        let len = bytes.len();
        let raw = decode_body(bytes);

        let is_error = status.as_u16() >= 400;
        let body = if is_error {
            raw
        } else {
            pretty_json(&raw, self.config.json_indent).unwrap_or(raw)
        };

        let elapsed = start.elapsed();
        tracing::info!(status = status.as_u16(), bytes = len, elapsed_ms = elapsed.as_millis() as u64, "Request completed");

        DispatchResult {
            status_line,
            status: Some(status.as_u16()),
            body,
            is_error,
            error: None,
            elapsed,
        }
    }

    /// Run the send as its own task.
    ///
    /// The caller owns the handle: await it for the result, or drop/abort it
    /// to abandon the request.
    pub fn spawn(&self, request: BuiltRequest, timeout: Duration) -> JoinHandle<DispatchResult> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.send_with_timeout(request, timeout).await })
    }
}

/// Fold a finished dispatch task back into a result
pub fn join_result(joined: Result<DispatchResult, tokio::task::JoinError>) -> DispatchResult {
    joined.unwrap_or_else(|e| DispatchResult::failed(TransportError::Task(e.to_string()), Duration::ZERO))
}

fn classify(
    e: reqwest::Error,
    timeout: Duration,
    otherwise: fn(reqwest::Error) -> TransportError,
) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(timeout)
    } else if e.is_connect() {
        TransportError::Connect(e)
    } else {
        otherwise(e)
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let invalid = || TransportError::InvalidHeader { key: key.clone() };
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Read at most `limit` bytes of the body; the remainder is never read
async fn read_capped(resp: reqwest::Response, limit: usize) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let room = limit - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Decode a capped body. A character cut by the cap is dropped, so the text
/// never grows past the bytes read.
fn decode_body(mut bytes: Vec<u8>) -> String {
    let tail = bytes.len().saturating_sub(3);
    if let Some(start) = (tail..bytes.len()).find(|&i| bytes[i] & 0xC0 != 0x80) {
        if let Err(e) = std::str::from_utf8(&bytes[start..]) {
            if e.error_len().is_none() {
                bytes.truncate(start + e.valid_up_to());
            }
        }
    }
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Re-indent a JSON document; `None` if it is not JSON.
///
/// Only whitespace outside strings changes: keys, duplicates, escapes and
/// number literals are copied as received. Leading whitespace is dropped,
/// trailing whitespace kept. Empty objects and arrays stay on one line.
pub fn pretty_json(text: &str, indent: usize) -> Option<String> {
    serde_json::from_str::<IgnoredAny>(text).ok()?;

    let text = text.trim_start();
    let value = text.trim_end();
    let unit = " ".repeat(indent);
    let newline = |out: &mut String, depth: usize| {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(&unit);
        }
    };

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut opened = false;

    for c in value.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            continue;
        }

        let just_opened = std::mem::take(&mut opened);
        match c {
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if !just_opened {
                    newline(&mut out, depth);
                }
                out.push(c);
                continue;
            }
            _ if just_opened => newline(&mut out, depth),
            _ => {}
        }

        out.push(c);
        match c {
            '{' | '[' => {
                depth += 1;
                opened = true;
            }
            ',' => newline(&mut out, depth),
            ':' => out.push(' '),
            '"' => in_string = true,
            _ => {}
        }
    }

    out.push_str(&text[value.len()..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_json_four_spaces() {
        assert_eq!(pretty_json(r#"{"ok":true}"#, 4).unwrap(), "{\n    \"ok\": true\n}");
    }

    #[test]
    fn test_pretty_json_keeps_key_order() {
        let pretty = pretty_json(r#"{"z":1,"a":[1,2]}"#, 2).unwrap();
        assert_eq!(pretty, "{\n  \"z\": 1,\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn test_pretty_json_keeps_duplicate_keys() {
        assert_eq!(
            pretty_json(r#"{"a":1,"b":0,"a":2}"#, 4).unwrap(),
            "{\n    \"a\": 1,\n    \"b\": 0,\n    \"a\": 2\n}"
        );
    }

    #[test]
    fn test_pretty_json_only_touches_whitespace() {
        let pretty = pretty_json("  {\"s\" : \"caf\\u00e9 \\/ \\\" {x, y}\", \"n\":1.50e2}\n", 4).unwrap();
        assert_eq!(pretty, "{\n    \"s\": \"caf\\u00e9 \\/ \\\" {x, y}\",\n    \"n\": 1.50e2\n}\n");
    }

    #[test]
    fn test_pretty_json_empty_containers() {
        assert_eq!(pretty_json(r#"{"a":{},"b":[ ]}"#, 2).unwrap(), "{\n  \"a\": {},\n  \"b\": []\n}");
        assert_eq!(pretty_json("[]", 4).unwrap(), "[]");
    }

    #[test]
    fn test_decode_body_drops_cut_character() {
        assert_eq!(decode_body(vec![b'a', 0xC3]), "a");
        assert_eq!(decode_body(vec![b'a', 0xF0, 0x9F, 0x98]), "a");
        assert_eq!(decode_body("caf\u{e9}".as_bytes().to_vec()), "caf\u{e9}");
        assert_eq!(decode_body("\u{1F600}".as_bytes().to_vec()), "\u{1F600}");
    }

    #[test]
    fn test_decode_body_replaces_invalid_bytes() {
        assert_eq!(decode_body(vec![0xFF, b'o', b'k']), "\u{FFFD}ok");
    }

    #[test]
    fn test_pretty_json_rejects_text() {
        assert!(pretty_json("hello", 4).is_none());
        assert!(pretty_json("", 4).is_none());
    }

    #[test]
    fn test_header_map_rejects_bad_name() {
        let err = header_map(&[("Bad Name".to_string(), "v".to_string())]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidHeader { key } if key == "Bad Name"));
    }

    #[test]
    fn test_header_map_keeps_values() {
        let map = header_map(&[("X-Test".to_string(), "value".to_string())]).unwrap();
        assert_eq!(map.get("x-test").unwrap(), "value");
    }

    #[test]
    fn test_display_text_for_transport_error() {
        let result = DispatchResult::failed(TransportError::Timeout(Duration::from_secs(10)), Duration::ZERO);
        assert!(result.is_error);
        assert!(result.status_line.is_empty());
        assert_eq!(result.display_text(), "request timed out after 10s");
    }
}
