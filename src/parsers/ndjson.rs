use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read};
use std::marker::PhantomData;
use std::pin::{Pin, pin};
use std::task::{Context, Poll, ready};

use futures::stream::{self, FusedStream, Stream, StreamExt};
use pin_project_lite::pin_project;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::decoder::ChunkDecoder;
use super::lines::LineBuffer;

/// Longest prefix of a skipped line kept for diagnostics (in chars)
const MAX_SKIPPED_CONTENT_CHARS: usize = 256;

/// Read size used when decoding from a blocking reader
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// A candidate line that failed to parse and was left out of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based position among all candidate lines seen by the parser
    pub line_number: usize,
    /// The offending text, truncated for display
    pub content: String,
    /// Deserialization error message
    pub error: String,
}

/// Parses candidate lines and remembers the ones that fail.
#[derive(Debug, Default)]
struct RecordParser {
    line_number: usize,
    skipped: Vec<SkippedLine>,
}

impl RecordParser {
    fn parse<T: DeserializeOwned>(&mut self, line: &str) -> Option<T> {
        self.line_number += 1;

        match serde_json::from_str::<T>(line) {
            Ok(record) => Some(record),
            Err(e) => {
                let content: String = line.chars().take(MAX_SKIPPED_CONTENT_CHARS).collect();
                tracing::warn!(
                    line = self.line_number,
                    bytes = line.len(),
                    error = %e,
                    content = %content,
                    "Skipping invalid JSON line"
                );
                self.skipped.push(SkippedLine {
                    line_number: self.line_number,
                    content,
                    error: e.to_string(),
                });
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting on the source for more bytes
    AwaitingChunk,
    /// Source ended; only buffered candidates remain
    Draining,
    Terminated,
}

pin_project! {
    /// Lazy stream of records decoded from newline-delimited JSON bytes.
    ///
    /// Each pull decodes as many source chunks as needed to produce the next
    /// well-formed line. Malformed lines are logged, recorded in
    /// [`NdjsonStream::skipped`], and never end the stream. An error from the
    /// source is yielded once and terminates the stream.
    ///
    /// The stream is single-use: once it returns `None` (or an error) it stays
    /// terminated.
    pub struct NdjsonStream<S, T = Value> {
        #[pin]
        inner: S,
        decoder: ChunkDecoder,
        lines: LineBuffer,
        pending: VecDeque<String>,
        records: RecordParser,
        state: State,
        _record: PhantomData<fn() -> T>,
    }
}

impl<S, T> NdjsonStream<S, T> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            decoder: ChunkDecoder::new(),
            lines: LineBuffer::new(),
            pending: VecDeque::new(),
            records: RecordParser::default(),
            state: State::AwaitingChunk,
            _record: PhantomData,
        }
    }

    /// Lines skipped so far because they were not valid records
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.records.skipped
    }

    /// Take the skipped-line diagnostics collected so far
    pub fn take_skipped(self: Pin<&mut Self>) -> Vec<SkippedLine> {
        std::mem::take(&mut self.project().records.skipped)
    }
}

impl<S, B, E, T> Stream for NdjsonStream<S, T>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    T: DeserializeOwned,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            while let Some(line) = this.pending.pop_front() {
                if let Some(record) = this.records.parse::<T>(&line) {
                    return Poll::Ready(Some(Ok(record)));
                }
            }

            match *this.state {
                State::Terminated => return Poll::Ready(None),
                State::Draining => {
                    *this.state = State::Terminated;
                    return Poll::Ready(None);
                }
                State::AwaitingChunk => match ready!(this.inner.as_mut().poll_next(cx)) {
                    Some(Ok(chunk)) => {
                        let text = this.decoder.decode(chunk.as_ref());
                        this.pending.extend(this.lines.push(&text));
                    }
                    Some(Err(e)) => {
                        *this.state = State::Terminated;
                        return Poll::Ready(Some(Err(e)));
                    }
                    None => {
                        let tail = this.decoder.finish();
                        this.pending.extend(this.lines.push(&tail));
                        this.pending.extend(this.lines.finish());
                        *this.state = State::Draining;
                    }
                },
            }
        }
    }
}

impl<S, B, E, T> FusedStream for NdjsonStream<S, T>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    T: DeserializeOwned,
{
    fn is_terminated(&self) -> bool {
        self.state == State::Terminated
    }
}

/// Output of decoding a whole NDJSON source
#[derive(Debug)]
pub struct ParsedLines<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedLine>,
}

/// Adapts a blocking reader into fixed-size byte chunks
struct ReadChunks<R> {
    reader: R,
    done: bool,
}

impl<R: Read> Iterator for ReadChunks<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => {
                    buf.truncate(n);
                    return Some(Ok(buf));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Decode every record from a blocking reader (file, stdin).
///
/// Uses the same streaming parser as network bodies, so chunking and
/// malformed-line behaviour is identical. Read errors abort with `Err`.
pub fn parse_ndjson_reader<R, T>(reader: R) -> io::Result<ParsedLines<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    let chunks = stream::iter(ReadChunks { reader, done: false });
    let mut parser = pin!(NdjsonStream::<_, T>::new(chunks));

    let records = futures::executor::block_on(async {
        let mut records = Vec::new();
        while let Some(record) = parser.next().await {
            records.push(record?);
        }
        Ok::<_, io::Error>(records)
    })?;

    Ok(ParsedLines { records, skipped: parser.as_mut().take_skipped() })
}
