//! Wire types for the inference endpoint.
//!
//! - [`GenerateRequest`] - JSON body posted to the endpoint
//! - [`GenerateResponse`] - one NDJSON record of the response body

pub mod generate;

pub use generate::{
    DEFAULT_MODEL, GenerateRequest, GenerateResponse, STATUS_SUCCESS, classification_prompt,
};
