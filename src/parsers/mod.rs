//! Streaming NDJSON decoding for inference endpoint responses
//!
//! # Error Handling Strategy
//!
//! The parser separates failures by where they come from:
//!
//! - **Individual line failures**: A candidate line that is not a valid record is logged with
//!   `tracing::warn!`, recorded as a [`SkippedLine`], and skipped. Later lines are unaffected.
//!
//! - **Source failures**: An error from the underlying byte stream (network read, file read) is
//!   yielded as-is and ends the stream. Nothing is retried.
//!
//! - **Encoding**: Bytes are decoded incrementally, so a multi-byte character split between two
//!   chunks is never mistaken for a line break or dropped.
//!
//! Deciding whether the records make sense (completion flags, status values) is left to the
//! caller; see [`crate::client::reader`].

pub mod decoder;
pub mod lines;
pub mod ndjson;

pub use decoder::ChunkDecoder;
pub use lines::LineBuffer;
pub use ndjson::{NdjsonStream, ParsedLines, SkippedLine, parse_ndjson_reader};
