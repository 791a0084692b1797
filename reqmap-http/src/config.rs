//! Snapshot configuration.

use serde::Deserialize;

/// Default body capture cap: 1 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Options for building a request snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// Caps how many bytes of the request body are captured.
    /// Absent or zero falls back to [`DEFAULT_MAX_BODY_BYTES`].
    pub max_body_bytes: Option<usize>,
}

impl RequestOptions {
    pub(crate) fn max_body_bytes_or_default(&self) -> usize {
        match self.max_body_bytes {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_MAX_BODY_BYTES,
        }
    }
}
