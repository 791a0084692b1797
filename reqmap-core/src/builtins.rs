//! Caller-supplied value producers for template evaluation.

use std::fmt::Debug;

use chrono::{SecondsFormat, Utc};

/// Zero-argument producer for the `now()` builtin.
pub type NowFn = Box<dyn Fn() -> String + Send + Sync>;

/// Values substituted for builtin calls during template application.
///
/// The template engine never generates identifiers or reads the clock on its
/// own initiative: `uuid()` resolves to whatever string the caller put here,
/// and `now()` resolves to the supplied clock when one is present. That
/// keeps template evaluation deterministic under test — supply fixed values
/// and the output tree is a pure function of the root and the template.
///
/// # Examples
///
/// ```
/// use reqmap_core::Builtins;
///
/// let builtins = Builtins::new("req-42").with_now(|| "2024-01-01T00:00:00Z".into());
/// ```
pub struct Builtins {
    /// Identifier substituted for `uuid()`.
    pub uuid: String,
    /// Clock substituted for `now()`; when absent, the current UTC time is
    /// rendered as RFC 3339 with nanoseconds.
    pub now: Option<NowFn>,
}

impl Builtins {
    /// Creates builtins with the given `uuid()` value and no clock.
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            now: None,
        }
    }

    /// Creates builtins with a freshly generated v4 uuid and no clock.
    pub fn random() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// Sets the clock used for `now()`.
    pub fn with_now(mut self, now: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.now = Some(Box::new(now));
        self
    }

    pub(crate) fn now_value(&self) -> String {
        match &self.now {
            Some(now) => now(),
            None => Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
        }
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new("")
    }
}

impl Debug for Builtins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtins")
            .field("uuid", &self.uuid)
            .field("now", &self.now.as_ref().map(|_| "Fn"))
            .finish()
    }
}
