//! HTTP client for the classification endpoint.
//!
//! A classification is one `POST` of a [`GenerateRequest`] followed by reading the
//! response body through [`NdjsonStream`]. Only the first record is inspected; see
//! [`reader::read_single_response`].

pub mod cancel;
pub mod reader;

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;
use url::Url;

pub use cancel::CancelToken;

use crate::errors::ClassifyError;
use crate::models::{DEFAULT_MODEL, GenerateRequest, GenerateResponse};
use crate::parsers::{NdjsonStream, SkippedLine};
use crate::utils::duration::format_nanos;

/// Endpoint settings for [`ClassifierClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub url: Url,
    pub model: String,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(url: &str) -> Result<Self, ClassifyError> {
        Ok(Self { url: Url::parse(url)?, model: DEFAULT_MODEL.to_string(), timeout: None })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Result of a successful classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// First record of the response body
    pub record: GenerateResponse,
    /// Lines of the body that were not valid records
    pub skipped: Vec<SkippedLine>,
}

impl Classification {
    /// Model output with surrounding whitespace removed
    pub fn label(&self) -> &str {
        self.record.response.as_deref().map(str::trim).unwrap_or("")
    }

    /// Generation time reported by the endpoint, e.g. `05sec`
    pub fn duration(&self) -> Option<String> {
        self.record.total_duration.map(format_nanos)
    }
}

#[derive(Debug)]
pub struct ClassifierClient {
    http: Client,
    config: ClientConfig,
}

impl ClassifierClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClassifyError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send an article for classification and read the first response record
    #[instrument(skip(self, article), fields(url = %self.config.url, model = %self.config.model))]
    pub async fn classify(&self, article: &str) -> Result<Classification, ClassifyError> {
        let request = GenerateRequest::classify(&self.config.model, article);
        tracing::debug!(bytes = article.len(), "Sending classification request");

        let response = self.http.post(self.config.url.clone()).json(&request).send().await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Response received");

        let mut records =
            Box::pin(NdjsonStream::<_, GenerateResponse>::new(response.bytes_stream()));
        let result = reader::read_single_response(&mut records).await;
        let skipped = records.as_mut().take_skipped();

        let record = match result {
            Ok(record) => record,
            // An error status with nothing parseable is more useful than "missing response"
            Err(ClassifyError::MissingResponse) if !status.is_success() => {
                return Err(ClassifyError::Remote(format!("HTTP status {}", status)));
            }
            Err(e) => return Err(e),
        };

        if !skipped.is_empty() {
            tracing::warn!(count = skipped.len(), "Response contained invalid lines");
        }
        if let Some(nanos) = record.total_duration {
            tracing::info!(duration = %format_nanos(nanos), "Classification complete");
        }

        Ok(Classification { record, skipped })
    }

    /// Like [`ClassifierClient::classify`], but gives up when `cancel` fires.
    ///
    /// The pending request is dropped on cancellation, which closes the
    /// connection.
    pub async fn classify_with_cancel(
        &self,
        article: &str,
        cancel: &CancelToken,
    ) -> Result<Classification, ClassifyError> {
        if cancel.is_cancelled() {
            return Err(ClassifyError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Classification cancelled");
                Err(ClassifyError::Cancelled)
            }
            result = self.classify(article) => result,
        }
    }
}
