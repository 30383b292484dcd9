/// Accumulates decoded text and hands back complete lines.
///
/// The buffer never contains a line break after [`LineBuffer::push`] returns:
/// everything up to the last `\n` is split off as candidate lines and only the
/// unterminated remainder is kept for the next chunk.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text and return every line it completes, in order.
    ///
    /// Empty lines between two line breaks are returned like any other line.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.buffer.push_str(text);

        let Some(last_break) = self.buffer.rfind('\n') else {
            return Vec::new();
        };

        let remainder = self.buffer.split_off(last_break + 1);
        let complete = std::mem::replace(&mut self.buffer, remainder);

        complete[..last_break].split('\n').map(str::to_owned).collect()
    }

    /// Drain the buffer at end of input, dropping empty fragments
    pub fn finish(&mut self) -> Vec<String> {
        let rest = std::mem::take(&mut self.buffer);
        rest.split('\n').filter(|part| !part.is_empty()).map(str::to_owned).collect()
    }

    /// Text received since the last line break
    pub fn remainder(&self) -> &str {
        &self.buffer
    }
}
