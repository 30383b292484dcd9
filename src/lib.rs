//! News Classifier - classify news articles with a locally hosted language model
//!
//! This library sends article text to an Ollama-style `generate` endpoint and reads the
//! response body as newline-delimited JSON. It provides:
//!
//! - An incremental NDJSON stream parser that tolerates partial chunks, split multi-byte
//!   characters, and malformed lines
//! - A single-shot response reader that validates the first record
//! - An HTTP client with optional timeout and cancellation
//! - A command-line interface and an interactive terminal UI
//!
//! # Example
//!
//! ```no_run
//! use news_classifier::{ClassifierClient, ClientConfig};
//!
//! # async fn example() -> Result<(), news_classifier::ClassifyError> {
//! let config = ClientConfig::new("http://localhost:11434/api/generate")?;
//! let client = ClassifierClient::new(config)?;
//! let result = client.classify("Central bank cuts interest rates").await?;
//! println!("{} ({:?})", result.label(), result.duration());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod errors;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use client::{CancelToken, Classification, ClassifierClient, ClientConfig};
pub use errors::ClassifyError;
pub use models::{GenerateRequest, GenerateResponse};
pub use parsers::{NdjsonStream, SkippedLine, parse_ndjson_reader};
pub use utils::format_nanos;
