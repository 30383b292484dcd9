use serde::{Deserialize, Serialize};

/// Model name the classifier is served under
pub const DEFAULT_MODEL: &str = "newsClassifier";

/// Status value the endpoint reports for an accepted, in-progress request
pub const STATUS_SUCCESS: &str = "success";

/// Body of a generate call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

impl GenerateRequest {
    /// Build a non-streaming classification request for an article
    pub fn classify(model: impl Into<String>, article: &str) -> Self {
        Self { model: model.into(), prompt: classification_prompt(article), stream: false }
    }
}

/// Prompt template sent to the classifier model
pub fn classification_prompt(article: &str) -> String {
    format!("Classify this article: {}", article)
}

/// One record of a generate response body.
///
/// Error bodies (`{"error": "..."}`) deserialize into the same type with
/// `done == false` and only `error` set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Nanoseconds spent generating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// True when the record reports completion or an accepted status
    pub fn is_acceptable(&self) -> bool {
        self.done || self.status.as_deref() == Some(STATUS_SUCCESS)
    }
}
