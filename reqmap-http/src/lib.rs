//! Canonical JSON snapshots of HTTP requests.
//!
//! Builds a normalized, JSON-shaped view of an `http::Request` — method,
//! path, host, headers, query parameters, cookies, and parsed body — and
//! evaluates path-query expressions or remap templates against it via
//! `reqmap-core`. Capturing the body leaves the request with a replayable
//! copy, so downstream consumers still see a readable body.

pub mod body;
pub mod config;
pub mod query;
pub mod root;
mod request;

pub use body::{BodyCapture, ReplayBody};
pub use config::{DEFAULT_MAX_BODY_BYTES, RequestOptions};
pub use request::{RemapRequest, Snapshot};
