//! Sanitising model output for terminal display
//!
//! The classifier's `response` text is printed verbatim to a terminal (CLI) or drawn into a
//! ratatui buffer (TUI). Escape sequences in that text could recolour output, move the cursor,
//! or set the window title, so everything passes through [`sanitize_for_terminal`] first.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Removes escape sequences and control characters from text.
///
/// Handles CSI (`ESC [ ... final`), OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`), and
/// two-character `ESC x` sequences. Newlines and tabs are kept; carriage returns are
/// dropped since they let later text overwrite earlier text on the same row.
///
/// # Examples
///
/// ```
/// use news_classifier::utils::terminal::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mBusiness\x1b[0m"), "Business");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.next() {
                // CSI: parameters then a final byte in @..~
                Some('[') => {
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ST (ESC \)
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\n' && ch != '\t' {
            continue;
        }

        result.push(ch);
    }

    result
}
