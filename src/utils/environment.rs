use std::env;

use anyhow::{Context, Result, bail};

/// Environment variable holding the inference endpoint URL
pub const LLM_URL_VAR: &str = "LLM_URL";

/// Get the inference endpoint URL from `LLM_URL`
pub fn get_llm_url() -> Result<String> {
    let url = env::var(LLM_URL_VAR).context("LLM_URL environment variable not set")?;
    if url.trim().is_empty() {
        bail!("LLM_URL environment variable is empty");
    }
    Ok(url.trim().to_string())
}

/// Prefer an explicit URL, falling back to the environment
pub fn resolve_llm_url(explicit: Option<&str>) -> Result<String> {
    match explicit {
        Some(url) if !url.trim().is_empty() => Ok(url.trim().to_string()),
        _ => get_llm_url(),
    }
}
