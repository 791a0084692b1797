#![warn(missing_docs)]
//! # reqmap-core
//!
//! Protocol-agnostic engine for remapping canonical request snapshots.
//!
//! This crate provides the evaluation half of reqmap: given a **root
//! document** (a generic JSON value describing a request — built by
//! `reqmap-http` or by hand), it resolves path-query expressions and applies
//! declarative remap templates against it. It knows nothing about HTTP
//! types; the root is just a [`serde_json::Value`].
//!
//! ## Components
//!
//! - [`json`] — best-effort decoding of raw bytes into JSON values
//! - [`expression`] — compiled path-query expressions ([`PathExpression`])
//!   and the [`Evaluate`] seam for injecting a stub engine in tests
//! - [`template`] — the recursive template walk ([`apply_template`])
//! - [`builtins`] — caller-supplied value producers ([`Builtins`])
//!
//! ## Degradation policy
//!
//! This is a best-effort extraction layer: malformed input and failed
//! lookups degrade to documented defaults (`None`, `{}`, `Value::Null`)
//! instead of surfacing errors. The single fallible public API is
//! [`PathExpression::parse`], for callers that pre-compile expressions.

pub mod builtins;
pub mod expression;
pub mod json;
pub mod template;

pub use builtins::Builtins;
pub use expression::{Evaluate, ExpressionError, JsonPathEvaluator, PathExpression, evaluate};
pub use template::{apply_template, apply_template_with};
