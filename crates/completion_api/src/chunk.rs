use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures_util::stream::BoxStream;
use futures_util::{Stream, StreamExt};

use crate::error::CompletionApiError;

/// Pull-based iterator over the decoded text chunks of one completion stream.
///
/// Wraps the transport byte stream and decodes incrementally: a trailing
/// incomplete UTF-8 sequence at a transport-chunk boundary is carried over
/// and prepended to the next chunk, so callers only ever observe whole
/// decoded text segments. Transport chunks that decode to nothing are
/// skipped rather than surfaced.
///
/// The stream is finite and not restartable; after end-of-stream or a
/// terminal error every further pull yields `None`.
pub struct TextChunkStream {
    bytes: BoxStream<'static, Result<Vec<u8>, CompletionApiError>>,
    carry: Vec<u8>,
    finished: bool,
}

impl TextChunkStream {
    /// Wraps an already-boxed transport byte stream.
    pub fn from_bytes_stream(
        bytes: BoxStream<'static, Result<Vec<u8>, CompletionApiError>>,
    ) -> Self {
        Self {
            bytes,
            carry: Vec::new(),
            finished: false,
        }
    }

    /// Pulls the next decoded text chunk.
    ///
    /// Returns `Ok(None)` at clean end-of-stream. Mid-stream transport or
    /// decoding failures are terminal and never silently swallowed.
    pub async fn next_chunk(&mut self) -> Result<Option<String>, CompletionApiError> {
        self.next().await.transpose()
    }

    /// Drains the longest valid UTF-8 prefix of the carry buffer.
    fn drain_decoded(&mut self) -> Result<String, CompletionApiError> {
        match std::str::from_utf8(&self.carry) {
            Ok(text) => {
                let text = text.to_owned();
                self.carry.clear();
                Ok(text)
            }
            Err(error) if error.error_len().is_none() => {
                // The trailing bytes are an incomplete sequence; keep them
                // for the next transport chunk.
                let rest = self.carry.split_off(error.valid_up_to());
                let decoded = std::mem::replace(&mut self.carry, rest);
                String::from_utf8(decoded)
                    .map_err(|error| CompletionApiError::ChunkDecode(error.to_string()))
            }
            Err(error) => Err(CompletionApiError::ChunkDecode(error.to_string())),
        }
    }
}

impl Stream for TextChunkStream {
    type Item = Result<String, CompletionApiError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.finished {
                return Poll::Ready(None);
            }

            match ready!(this.bytes.as_mut().poll_next(cx)) {
                None => {
                    this.finished = true;
                    if this.carry.is_empty() {
                        return Poll::Ready(None);
                    }
                    return Poll::Ready(Some(Err(CompletionApiError::ChunkDecode(
                        "stream ended inside a multi-byte sequence".to_owned(),
                    ))));
                }
                Some(Err(error)) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(error)));
                }
                Some(Ok(chunk)) => {
                    this.carry.extend_from_slice(&chunk);
                    match this.drain_decoded() {
                        Ok(text) if text.is_empty() => continue,
                        Ok(text) => return Poll::Ready(Some(Ok(text))),
                        Err(error) => {
                            this.finished = true;
                            return Poll::Ready(Some(Err(error)));
                        }
                    }
                }
            }
        }
    }
}
