use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Largest article accepted from a file, stdin, or the clipboard (10MB)
pub const MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Read an article from a file, rejecting files over [`MAX_INPUT_BYTES`]
pub fn read_input_file(path: &Path) -> Result<String> {
    // Size check on the open handle avoids a TOCTOU gap with the read below
    let file =
        File::open(path).with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    if metadata.len() > MAX_INPUT_BYTES as u64 {
        bail!(
            "Input too large: {} ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_INPUT_BYTES
        );
    }

    read_bounded(file).with_context(|| format!("Failed to read input file: {}", path.display()))
}

/// Read UTF-8 text from any reader, failing past [`MAX_INPUT_BYTES`]
pub fn read_bounded<R: Read>(reader: R) -> Result<String> {
    let mut text = String::new();
    let read = reader
        .take(MAX_INPUT_BYTES as u64 + 1)
        .read_to_string(&mut text)
        .context("Input is not valid UTF-8 text")?;

    if read > MAX_INPUT_BYTES {
        bail!("Input too large (more than {} bytes)", MAX_INPUT_BYTES);
    }

    Ok(text)
}

/// Reject text that is empty or whitespace-only.
///
/// The text is returned as given; surrounding whitespace is part of the article.
pub fn validate_article(text: &str) -> Result<&str> {
    if text.trim().is_empty() {
        bail!("Nothing to classify: input text is empty");
    }
    if text.len() > MAX_INPUT_BYTES {
        bail!("Input too large ({} bytes, max {})", text.len(), MAX_INPUT_BYTES);
    }
    Ok(text)
}
