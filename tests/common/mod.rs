//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::convert::Infallible;
use std::pin::pin;

use bytes::Bytes;
use futures::executor::block_on;
use futures::stream::{self, Stream, StreamExt};
use news_classifier::{NdjsonStream, SkippedLine};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock inference endpoint is mounted under
pub const GENERATE_PATH: &str = "/api/generate";

/// Split `body` into chunks of at most `size` bytes, ignoring char boundaries
pub fn chunked(
    body: &[u8],
    size: usize,
) -> impl Stream<Item = Result<Bytes, Infallible>> + use<> {
    let parts: Vec<Result<Bytes, Infallible>> =
        body.chunks(size.max(1)).map(|c| Ok(Bytes::copy_from_slice(c))).collect();
    stream::iter(parts)
}

/// Split `body` at the given byte offsets
pub fn split_at(
    body: &[u8],
    offsets: &[usize],
) -> impl Stream<Item = Result<Bytes, Infallible>> + use<> {
    let mut parts = Vec::new();
    let mut start = 0;
    for &offset in offsets {
        parts.push(Ok(Bytes::copy_from_slice(&body[start..offset])));
        start = offset;
    }
    parts.push(Ok(Bytes::copy_from_slice(&body[start..])));
    stream::iter(parts)
}

/// Drain a chunk stream through the NDJSON parser
pub fn decode_all<S>(chunks: S) -> (Vec<Value>, Vec<SkippedLine>)
where
    S: Stream<Item = Result<Bytes, Infallible>>,
{
    let mut parser = pin!(NdjsonStream::<_, Value>::new(chunks));
    let values = block_on(async {
        let mut values = Vec::new();
        while let Some(item) = parser.next().await {
            match item {
                Ok(value) => values.push(value),
                Err(never) => match never {},
            }
        }
        values
    });

    (values, parser.as_mut().take_skipped())
}

/// Builder for generate response records
#[derive(Default)]
pub struct RecordBuilder {
    done: Option<bool>,
    status: Option<String>,
    response: Option<String>,
    total_duration: Option<u64>,
    error: Option<String>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finished record with the given label
    pub fn completed(label: &str) -> Self {
        Self::new().done(true).response(label)
    }

    pub fn done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn response(mut self, response: &str) -> Self {
        self.response = Some(response.to_string());
        self
    }

    pub fn total_duration(mut self, nanos: u64) -> Self {
        self.total_duration = Some(nanos);
        self
    }

    pub fn error(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut record = serde_json::Map::new();
        if let Some(done) = self.done {
            record.insert("done".to_string(), json!(done));
        }
        if let Some(status) = &self.status {
            record.insert("status".to_string(), json!(status));
        }
        if let Some(response) = &self.response {
            record.insert("response".to_string(), json!(response));
        }
        if let Some(nanos) = self.total_duration {
            record.insert("total_duration".to_string(), json!(nanos));
        }
        if let Some(error) = &self.error {
            record.insert("error".to_string(), json!(error));
        }
        Value::Object(record)
    }

    /// Serialize as one NDJSON line including the trailing newline
    pub fn to_line(&self) -> String {
        format!("{}\n", self.to_json())
    }
}

/// Join records into an NDJSON body
pub fn ndjson_body(records: &[RecordBuilder]) -> String {
    records.iter().map(RecordBuilder::to_line).collect()
}

/// Start a mock endpoint answering every generate call with `body`
pub async fn mock_endpoint(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/x-ndjson"),
        )
        .mount(&server)
        .await;
    server
}

/// Full URL of the generate route on a mock server
pub fn generate_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), GENERATE_PATH)
}
