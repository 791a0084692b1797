//! Request-bound facade over capture, root building, and evaluation.

use http::Request;
use http::request::Parts;
use http_body::Body as HttpBody;
use reqmap_core::Builtins;
use serde_json::Value;

use crate::body::{BodyCapture, ReplayBody};
use crate::config::RequestOptions;
use crate::root::request_root;

/// An HTTP request whose body slot can be captured and replayed.
///
/// Operations consume the request and hand it back alongside their result:
/// capture replaces the body slot, and threading ownership through makes
/// that side effect explicit — two concurrent captures of the same request
/// cannot be expressed.
#[derive(Debug)]
pub struct RemapRequest<ReqBody>
where
    ReqBody: HttpBody,
{
    parts: Parts,
    body: ReplayBody<ReqBody>,
}

/// A built snapshot: the canonical root plus the capture outcome.
#[derive(Debug)]
pub struct Snapshot {
    /// The canonical root document.
    pub root: Value,
    /// How the body capture went.
    pub capture: BodyCapture,
}

impl<ReqBody> RemapRequest<ReqBody>
where
    ReqBody: HttpBody,
{
    /// Wraps a request, treating its body as an unread stream.
    pub fn from_request(request: Request<ReqBody>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            parts,
            body: ReplayBody::new(body),
        }
    }

    /// Assembles a request from parts and a body state.
    ///
    /// Use `ReplayBody::Missing` for a request known to carry no body.
    pub fn from_parts(parts: Parts, body: ReplayBody<ReqBody>) -> Self {
        Self { parts, body }
    }

    /// Rebuilds the plain `http::Request` for downstream consumers.
    pub fn into_request(self) -> Request<ReplayBody<ReqBody>> {
        Request::from_parts(self.parts, self.body)
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    pub fn into_parts(self) -> (Parts, ReplayBody<ReqBody>) {
        (self.parts, self.body)
    }
}

impl<ReqBody> RemapRequest<ReqBody>
where
    ReqBody: HttpBody + Unpin,
{
    /// Captures the body under the configured cap and builds the canonical
    /// root.
    ///
    /// The returned request holds the replayable captured body; the original
    /// stream is gone. An absent or zero `max_body_bytes` option falls back
    /// to the 1 MiB default.
    pub async fn snapshot(self, options: &RequestOptions) -> (Self, Snapshot) {
        let (body, capture) = self
            .body
            .capture(options.max_body_bytes_or_default())
            .await;
        let root = request_root(&self.parts, &capture.bytes);
        (
            Self {
                parts: self.parts,
                body,
            },
            Snapshot { root, capture },
        )
    }

    /// Evaluates one path-query expression against the request's snapshot.
    ///
    /// No match, an invalid expression, and an unreadable body all degrade
    /// to `None`.
    pub async fn evaluate(
        self,
        expression: &str,
        options: &RequestOptions,
    ) -> (Self, Option<Value>) {
        let (request, snapshot) = self.snapshot(options).await;
        let value = reqmap_core::evaluate(&snapshot.root, expression);
        (request, value)
    }

    /// Applies a remap template against the request's snapshot.
    ///
    /// Template semantics are those of [`reqmap_core::apply_template`]:
    /// strings starting with `$` are path-query expressions, `uuid()` and
    /// `now()` resolve through `builtins`, other strings are literals.
    pub async fn apply_template(
        self,
        template: &Value,
        builtins: &Builtins,
        options: &RequestOptions,
    ) -> (Self, Value) {
        let (request, snapshot) = self.snapshot(options).await;
        let value = reqmap_core::apply_template(&snapshot.root, template, builtins);
        (request, value)
    }
}
