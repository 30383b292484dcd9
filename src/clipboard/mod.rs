use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::utils::MAX_INPUT_BYTES;

/// Trait for clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn get_text(&mut self) -> Result<String>;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Result<String> {
        self.clipboard.get_text().context("Failed to read clipboard contents")
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Clipboard text is empty");
    }

    if text.len() > MAX_INPUT_BYTES {
        anyhow::bail!("Clipboard text too large ({} bytes, max {})", text.len(), MAX_INPUT_BYTES);
    }

    Ok(())
}

fn paste_with_provider(provider: &mut dyn ClipboardProvider) -> Result<String> {
    let text = provider.get_text()?;
    validate_clipboard_text(&text)?;
    Ok(text)
}

fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)
}

/// Read article text from the system clipboard.
///
/// # Errors
/// Returns error if:
/// - The clipboard is empty or holds non-text data
/// - The text is larger than [`MAX_INPUT_BYTES`]
/// - System clipboard is unavailable (headless environment)
pub fn paste_from_clipboard() -> Result<String> {
    let mut clipboard = SystemClipboard::new()?;
    paste_with_provider(&mut clipboard)
}

/// Copy a classification result to the system clipboard.
///
/// Validation runs before the clipboard is opened, so empty or oversized text
/// fails the same way with or without a display server.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    validate_clipboard_text(text)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(text, &mut clipboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock clipboard for testing without system clipboard access
    struct MockClipboard {
        text: Option<String>,
        should_fail: bool,
    }

    impl MockClipboard {
        fn with_text(text: &str) -> Self {
            Self { text: Some(text.to_string()), should_fail: false }
        }

        fn empty() -> Self {
            Self { text: None, should_fail: false }
        }

        fn with_failure() -> Self {
            Self { text: None, should_fail: true }
        }
    }

    impl ClipboardProvider for MockClipboard {
        fn get_text(&mut self) -> Result<String> {
            if self.should_fail {
                anyhow::bail!("Mock clipboard error");
            }
            Ok(self.text.clone().unwrap_or_default())
        }

        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.should_fail {
                anyhow::bail!("Mock clipboard error");
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_paste_article_text() {
        let mut mock = MockClipboard::with_text("Central bank raises rates");
        assert_eq!(paste_with_provider(&mut mock).unwrap(), "Central bank raises rates");
    }

    #[test]
    fn test_paste_unicode() {
        let mut mock = MockClipboard::with_text("Élections 2024 🗳️");
        assert_eq!(paste_with_provider(&mut mock).unwrap(), "Élections 2024 🗳️");
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let mut mock = MockClipboard::empty();
        let err = paste_with_provider(&mut mock).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_paste_too_large() {
        let mut mock = MockClipboard::with_text(&"a".repeat(MAX_INPUT_BYTES + 1));
        let err = paste_with_provider(&mut mock).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_paste_provider_failure() {
        let mut mock = MockClipboard::with_failure();
        let err = paste_with_provider(&mut mock).unwrap_err();
        assert!(err.to_string().contains("Mock clipboard error"));
    }

    #[test]
    fn test_copy_result() {
        let mut mock = MockClipboard::empty();
        copy_with_provider("Business", &mut mock).unwrap();
        assert_eq!(mock.text.as_deref(), Some("Business"));
    }

    #[test]
    fn test_copy_empty_rejected_before_provider() {
        let mut mock = MockClipboard::with_failure();
        let err = copy_with_provider("", &mut mock).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_copy_to_clipboard_validates_before_clipboard_access() {
        let err = copy_to_clipboard("").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
