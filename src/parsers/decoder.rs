use encoding_rs::{CoderResult, Decoder, UTF_8};

/// Incremental UTF-8 decoder for transport chunks.
///
/// Multi-byte sequences split across chunk boundaries are held inside the
/// underlying `encoding_rs` decoder until the remaining bytes arrive, so every
/// call returns only fully decoded text. Invalid bytes become U+FFFD rather than
/// errors, matching how browsers decode response bodies.
pub struct ChunkDecoder {
    decoder: Decoder,
    finished: bool,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self { decoder: UTF_8.new_decoder_with_bom_removal(), finished: false }
    }

    /// Decode one chunk, returning the text that is complete so far
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.decode_inner(bytes, false)
    }

    /// Flush any bytes still held at end of stream.
    ///
    /// A truncated trailing sequence is emitted as a replacement character.
    /// Subsequent calls return an empty string.
    pub fn finish(&mut self) -> String {
        if self.finished {
            return String::new();
        }
        let tail = self.decode_inner(&[], true);
        self.finished = true;
        tail
    }

    fn decode_inner(&mut self, bytes: &[u8], last: bool) -> String {
        if self.finished {
            return String::new();
        }

        let mut output = String::new();
        let mut input = bytes;

        loop {
            let needed = self.decoder.max_utf8_buffer_length(input.len()).unwrap_or(input.len());
            output.reserve(needed);

            let (result, read, _had_replacements) =
                self.decoder.decode_to_string(input, &mut output, last);
            input = &input[read..];

            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }

        output
    }
}

impl Default for ChunkDecoder {
    fn default() -> Self {
        Self::new()
    }
}
