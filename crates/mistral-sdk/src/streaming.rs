//! Streaming support for the Mistral SDK.
//!
//! Streaming endpoints answer with a long-lived body made of newline
//! delimited frames. A frame is either a JSON envelope `{"data": "..."}` or a
//! Server-Sent-Events line `data: ...`. The payload is a JSON document of
//! the endpoint's message type, or the sentinel `[DONE]`.
//!
//! [`EventStream`] turns such a body into a [`Stream`] of typed messages:
//!
//! - a message per frame, in arrival order;
//! - `None` once the sentinel is read or the peer closes the body;
//! - [`Error::MalformedFrame`] when a payload does not parse, after which
//!   the stream yields nothing more;
//! - [`Error::StreamClosed`] on every poll after [`EventStream::close`].

use crate::error::{Error, Result};
use crate::types::{AgentResponse, ChatCompletionChunk, ContentDelta, FimResponse, Usage};
use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::{debug, trace, warn};

/// Payload marking the intentional end of a stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Stream of chat completion chunks.
pub type ChatStream = EventStream<ChatCompletionChunk>;
/// Stream of agent response fragments.
pub type AgentStream = EventStream<AgentResponse>;
/// Stream of fill-in-the-middle fragments.
pub type FimStream = EventStream<FimResponse>;

/// One frame read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The frame's `data` payload.
    pub payload: String,
}

impl Frame {
    /// Whether this frame is the end-of-stream sentinel.
    pub fn is_terminal(&self) -> bool {
        self.payload.trim() == DONE_SENTINEL
    }
}

#[derive(Deserialize)]
struct Envelope {
    data: String,
}

/// Longest line a [`FrameDecoder`] buffers by default (4 MiB).
pub const DEFAULT_MAX_LINE_LEN: usize = 4 * 1024 * 1024;

/// Splits raw body bytes into frames.
///
/// Bytes are buffered until a newline arrives, so frames and multi-byte
/// characters may be split across transport chunks. A line longer than the
/// configured limit is a [`Error::MalformedFrame`].
#[derive(Debug)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
    /// Start of the first unconsumed line.
    start: usize,
    /// Everything before this offset is known to hold no newline.
    scanned: usize,
    max_line_len: usize,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::with_max_line_len(DEFAULT_MAX_LINE_LEN)
    }
}

impl FrameDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty decoder that rejects lines longer than `max_line_len` bytes.
    pub fn with_max_line_len(max_line_len: usize) -> Self {
        Self {
            buffer: Vec::new(),
            start: 0,
            scanned: 0,
            max_line_len,
        }
    }

    /// Append bytes received from the transport.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes buffered but not yet returned as a frame.
    pub fn pending(&self) -> usize {
        self.buffer.len() - self.start
    }

    /// Next frame among the complete lines received so far.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            let Some(offset) = self.buffer[self.scanned..].iter().position(|b| *b == b'\n') else {
                self.scanned = self.buffer.len();
                self.compact();
                if self.buffer.len() > self.max_line_len {
                    return Err(self.overflow());
                }
                return Ok(None);
            };

            let line_start = self.start;
            let line_end = self.scanned + offset;
            self.start = line_end + 1;
            self.scanned = self.start;

            if line_end - line_start > self.max_line_len {
                return Err(self.overflow_at(line_start));
            }
            if let Some(frame) = parse_line(&self.buffer[line_start..line_end])? {
                return Ok(Some(frame));
            }
        }
    }

    /// Next frame once the transport has no more bytes: complete lines
    /// first, then whatever unterminated line is left.
    pub fn finish(&mut self) -> Result<Option<Frame>> {
        if let Some(frame) = self.next_frame()? {
            return Ok(Some(frame));
        }
        if self.buffer.is_empty() {
            return Ok(None);
        }
        let rest = std::mem::take(&mut self.buffer);
        self.start = 0;
        self.scanned = 0;
        parse_line(&rest)
    }

    /// Drop consumed lines from the front of the buffer.
    fn compact(&mut self) {
        if self.start > 0 {
            self.buffer.drain(..self.start);
            self.scanned -= self.start;
            self.start = 0;
        }
    }

    fn overflow(&mut self) -> Error {
        self.overflow_at(self.start)
    }

    fn overflow_at(&mut self, line_start: usize) -> Error {
        let preview_end = self.buffer.len().min(line_start + 256);
        let preview = String::from_utf8_lossy(&self.buffer[line_start..preview_end]).into_owned();
        self.buffer.clear();
        self.start = 0;
        self.scanned = 0;
        Error::malformed_frame(
            format!("line exceeds {} bytes", self.max_line_len),
            preview,
        )
    }
}

fn parse_line(raw: &[u8]) -> Result<Option<Frame>> {
    let line = std::str::from_utf8(raw).map_err(|e| {
        Error::malformed_frame(
            format!("invalid UTF-8: {e}"),
            String::from_utf8_lossy(raw).into_owned(),
        )
    })?;
    let line = line.trim_end_matches('\r');

    if line.trim().is_empty() || line.starts_with(':') {
        return Ok(None);
    }

    if let Some(data) = line.strip_prefix("data:") {
        let payload = data.strip_prefix(' ').unwrap_or(data);
        return Ok(Some(Frame {
            payload: payload.to_string(),
        }));
    }

    if ["event:", "id:", "retry:"]
        .iter()
        .any(|field| line.starts_with(field))
    {
        return Ok(None);
    }

    serde_json::from_str::<Envelope>(line)
        .map(|envelope| {
            Some(Frame {
                payload: envelope.data,
            })
        })
        .map_err(|e| Error::malformed_frame(format!("invalid frame envelope: {e}"), line))
}

/// Lifecycle of an [`EventStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Frames may still arrive.
    Open,
    /// The sentinel was read or the peer closed the body.
    Exhausted,
    /// A frame or transport error was returned.
    Errored,
    /// [`EventStream::close`] was called.
    Closed,
}

/// A stream of typed messages decoded from a framed response body.
///
/// Single reader: polling takes `&mut self`, so concurrent reads need
/// external synchronization. Dropping the stream releases the connection.
pub struct EventStream<T> {
    source: Option<BoxStream<'static, Result<Bytes>>>,
    frames: FrameDecoder,
    source_done: bool,
    state: StreamState,
    _message: PhantomData<fn() -> T>,
}

impl<T> EventStream<T> {
    /// Create a stream from a body byte stream.
    pub fn new<S, E>(source: S) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
        E: Into<Error>,
    {
        Self {
            source: Some(source.map(|chunk| chunk.map_err(Into::into)).boxed()),
            frames: FrameDecoder::new(),
            source_done: false,
            state: StreamState::Open,
            _message: PhantomData,
        }
    }

    /// Release the underlying byte source.
    ///
    /// Safe to call any number of times and in any state. Every later poll
    /// returns [`Error::StreamClosed`].
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            debug!(state = ?self.state, "Closing event stream");
        }
        self.state = StreamState::Closed;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Whether the stream was closed.
    pub fn is_closed(&self) -> bool {
        self.state == StreamState::Closed
    }

    /// Whether the stream ended, normally or with an error.
    pub fn is_done(&self) -> bool {
        matches!(self.state, StreamState::Exhausted | StreamState::Errored)
    }

    fn exhaust(&mut self) {
        self.source = None;
        self.state = StreamState::Exhausted;
    }

    fn fail(&mut self, error: Error) -> Error {
        self.source = None;
        self.state = StreamState::Errored;
        error
    }
}

impl<T: DeserializeOwned> EventStream<T> {
    fn decode(&mut self, frame: Frame) -> Option<Result<T>> {
        if frame.is_terminal() {
            debug!("Stream sentinel received");
            self.exhaust();
            return None;
        }

        trace!(payload = %frame.payload, "Stream frame received");
        match serde_json::from_str::<T>(&frame.payload) {
            Ok(message) => Some(Ok(message)),
            Err(e) => {
                warn!(error = %e, payload = %frame.payload, "Malformed stream frame");
                Some(Err(self.fail(Error::malformed_frame(e.to_string(), frame.payload))))
            }
        }
    }
}

impl<T: DeserializeOwned> Stream for EventStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match this.state {
                StreamState::Closed => return Poll::Ready(Some(Err(Error::StreamClosed))),
                StreamState::Exhausted | StreamState::Errored => return Poll::Ready(None),
                StreamState::Open => {}
            }

            let frame = if this.source_done {
                this.frames.finish()
            } else {
                this.frames.next_frame()
            };

            match frame {
                Ok(Some(frame)) => return Poll::Ready(this.decode(frame)),
                Ok(None) if this.source_done => {
                    debug!("Stream ended without sentinel");
                    this.exhaust();
                    return Poll::Ready(None);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "Malformed stream frame");
                    return Poll::Ready(Some(Err(this.fail(e))));
                }
            }

            let Some(source) = this.source.as_mut() else {
                this.state = StreamState::Closed;
                continue;
            };

            match source.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.frames.push(&bytes),
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(this.fail(e)))),
                Poll::Ready(None) => this.source_done = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<T: DeserializeOwned + ContentDelta> EventStream<T> {
    /// Read the stream to its end and concatenate the text of every message.
    pub async fn collect_content(mut self) -> Result<String> {
        let mut content = String::new();
        while let Some(message) = self.next().await {
            content.push_str(message?.content_delta());
        }
        Ok(content)
    }
}

impl EventStream<ChatCompletionChunk> {
    /// Read the stream to its end and accumulate it.
    pub async fn collect_result(mut self) -> Result<StreamResult> {
        let mut result = StreamResult::new();
        while let Some(chunk) = self.next().await {
            result.add_chunk(&chunk?);
        }
        Ok(result)
    }
}

impl<T> std::fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("state", &self.state)
            .field("pending_bytes", &self.frames.pending())
            .finish_non_exhaustive()
    }
}

/// Collected result of a streamed chat completion.
#[derive(Debug, Clone, Default)]
pub struct StreamResult {
    /// Full accumulated content.
    pub content: String,
    /// Model used.
    pub model: String,
    /// Finish reason.
    pub finish_reason: Option<String>,
    /// Token usage (if reported).
    pub usage: Option<Usage>,
    /// Number of chunks received.
    pub chunk_count: usize,
}

impl StreamResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk to the result.
    pub fn add_chunk(&mut self, chunk: &ChatCompletionChunk) {
        self.content.push_str(chunk.content());
        self.chunk_count += 1;

        if self.model.is_empty() {
            self.model.clone_from(&chunk.model);
        }

        if let Some(reason) = chunk.finish_reason() {
            self.finish_reason = Some(reason.to_string());
        }

        if let Some(usage) = chunk.usage {
            self.usage = Some(usage);
        }
    }
}
