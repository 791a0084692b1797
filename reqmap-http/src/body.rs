//! Replayable HTTP bodies and bounded capture.
//!
//! # Design Rationale: Single-Read Streams
//!
//! An HTTP request body is a stream that can be read once. Building a
//! snapshot of a request consumes that stream — but the request must remain
//! usable afterward: whoever handles it next (a proxy upstream, a router, a
//! handler) expects a readable body. Since bytes cannot be "un-read", the
//! capture step must:
//!
//! 1. Read a bounded prefix of the stream (the configured cap plus one byte,
//!    so truncation is detectable)
//! 2. Trim to the cap when the body overflows it
//! 3. Install a fresh body over the captured bytes in place of the original
//!
//! After capture, downstream consumers see exactly the captured (possibly
//! truncated) bytes — never the untruncated original, and never an exhausted
//! stream.
//!
//! ## Body States
//!
//! - **Missing**: the request carried no body at all
//! - **Buffered**: captured bytes, replayed once when polled
//! - **Stream**: the original body, not yet read
//!
//! ## Degradation
//!
//! A read error never fails the caller. Capture reports a present, empty,
//! non-truncated body and leaves the slot `Buffered(empty)` — still
//! readable. Snapshot building is best-effort and must not be blocked by a
//! broken body stream.

use bytes::{Buf, Bytes, BytesMut};
use http_body::{Body as HttpBody, Frame};
use pin_project::pin_project;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Outcome of capturing a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyCapture {
    /// Whether the request had a body slot at all.
    pub present: bool,
    /// The captured bytes, possibly trimmed to the cap.
    pub bytes: Bytes,
    /// Whether the body exceeded the cap (a zero cap always truncates).
    pub truncated: bool,
}

impl BodyCapture {
    fn absent() -> Self {
        Self {
            present: false,
            bytes: Bytes::new(),
            truncated: false,
        }
    }

    fn present(bytes: Bytes, truncated: bool) -> Self {
        Self {
            present: true,
            bytes,
            truncated,
        }
    }
}

/// A request body that can be captured and then replayed downstream.
///
/// Implements [`http_body::Body`], so a request rebuilt around a
/// `ReplayBody` is an ordinary HTTP request for whatever consumes it next.
#[pin_project(project = ReplayBodyProj)]
pub enum ReplayBody<B>
where
    B: HttpBody,
{
    /// The request carried no body.
    Missing,

    /// Captured bytes, yielded once when polled.
    ///
    /// The `Option` is used to yield the data once, then return `None` on
    /// subsequent polls.
    Buffered(Option<Bytes>),

    /// The original body stream, not yet read.
    Stream(#[pin] B),
}

impl<B> ReplayBody<B>
where
    B: HttpBody,
{
    /// Wraps an unread body stream.
    pub fn new(body: B) -> Self {
        ReplayBody::Stream(body)
    }

    /// A body over already-owned bytes.
    pub fn buffered(bytes: impl Into<Bytes>) -> Self {
        ReplayBody::Buffered(Some(bytes.into()))
    }
}

impl<B> ReplayBody<B>
where
    B: HttpBody + Unpin,
{
    /// Reads up to `max_bytes` (+1 to detect truncation), then installs the
    /// captured bytes as the replacement body.
    ///
    /// Consumes the body and returns the replacement state together with the
    /// [`BodyCapture`] outcome. Capturing an already-`Buffered` body
    /// re-applies the cap to the buffered bytes, so repeated captures with a
    /// cap at or above the buffered length are idempotent.
    pub async fn capture(self, max_bytes: usize) -> (Self, BodyCapture) {
        match self {
            ReplayBody::Missing => (ReplayBody::Missing, BodyCapture::absent()),

            // A zero cap drops any content the stream may hold.
            _ if max_bytes == 0 => (
                ReplayBody::Buffered(Some(Bytes::new())),
                BodyCapture::present(Bytes::new(), true),
            ),

            ReplayBody::Buffered(data) => {
                let data = data.unwrap_or_else(Bytes::new);
                let truncated = data.len() > max_bytes;
                let bytes = if truncated {
                    data.slice(..max_bytes)
                } else {
                    data
                };
                (
                    ReplayBody::Buffered(Some(bytes.clone())),
                    BodyCapture::present(bytes, truncated),
                )
            }

            ReplayBody::Stream(mut stream) => {
                use http_body_util::BodyExt;

                let mut buffer = BytesMut::new();
                while buffer.len() <= max_bytes {
                    match stream.frame().await {
                        Some(Ok(frame)) => {
                            if let Ok(mut data) = frame.into_data() {
                                buffer.extend_from_slice(&data.copy_to_bytes(data.remaining()));
                            }
                        }
                        Some(Err(_)) => {
                            tracing::debug!(
                                buffered = buffer.len(),
                                "body read failed, capturing empty body"
                            );
                            return (
                                ReplayBody::Buffered(Some(Bytes::new())),
                                BodyCapture::present(Bytes::new(), false),
                            );
                        }
                        None => break,
                    }
                }

                let collected = buffer.freeze();
                let truncated = collected.len() > max_bytes;
                // The remainder of an overflowing stream is dropped with it.
                let bytes = if truncated {
                    collected.slice(..max_bytes)
                } else {
                    collected
                };
                tracing::trace!(captured = bytes.len(), truncated, "captured request body");
                (
                    ReplayBody::Buffered(Some(bytes.clone())),
                    BodyCapture::present(bytes, truncated),
                )
            }
        }
    }
}

impl<B> HttpBody for ReplayBody<B>
where
    B: HttpBody,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.project() {
            ReplayBodyProj::Missing => Poll::Ready(None),

            ReplayBodyProj::Buffered(data) => {
                if let Some(bytes) = data.take() {
                    Poll::Ready(Some(Ok(Frame::data(bytes))))
                } else {
                    Poll::Ready(None)
                }
            }

            ReplayBodyProj::Stream(body) => match body.poll_frame(cx) {
                Poll::Ready(Some(Ok(frame))) => {
                    let frame = frame.map_data(|mut data| data.copy_to_bytes(data.remaining()));
                    Poll::Ready(Some(Ok(frame)))
                }
                Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => Poll::Ready(None),
                Poll::Pending => Poll::Pending,
            },
        }
    }

    fn size_hint(&self) -> http_body::SizeHint {
        match self {
            ReplayBody::Missing => http_body::SizeHint::with_exact(0),
            ReplayBody::Buffered(Some(bytes)) => {
                http_body::SizeHint::with_exact(bytes.len() as u64)
            }
            ReplayBody::Buffered(None) => http_body::SizeHint::with_exact(0),
            ReplayBody::Stream(body) => body.size_hint(),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            ReplayBody::Missing => true,
            ReplayBody::Buffered(Some(_)) => false,
            ReplayBody::Buffered(None) => true,
            ReplayBody::Stream(body) => body.is_end_stream(),
        }
    }
}

impl<B> fmt::Debug for ReplayBody<B>
where
    B: HttpBody,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayBody::Missing => f.debug_tuple("Missing").finish(),
            ReplayBody::Buffered(Some(bytes)) => f
                .debug_tuple("Buffered")
                .field(&format!("{} bytes", bytes.len()))
                .finish(),
            ReplayBody::Buffered(None) => f.debug_tuple("Buffered").field(&"consumed").finish(),
            ReplayBody::Stream(_) => f.debug_tuple("Stream").field(&"...").finish(),
        }
    }
}
