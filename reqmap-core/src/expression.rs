//! Path-query expression evaluation against a root document.
//!
//! Expressions are RFC 9535 JSONPath, compiled with [`serde_json_path`].
//! The engine returns an ordered node list; this module normalizes the
//! result count into the scalar-or-collection contract shared with the
//! canonical root's first/all duality:
//!
//! - zero matches → `None`
//! - exactly one match → the value itself, unwrapped
//! - two or more matches → a `Value::Array` of the matches, in order
//!
//! Lookup is a primitive, not an operation that can fail: an invalid
//! expression or a path with no match is reported as `None`, never as an
//! error. Callers that pre-compile expressions and want the parse error use
//! [`PathExpression::parse`].

use std::fmt::Debug;

use serde_json::Value;
use serde_json_path::JsonPath;
use thiserror::Error;

/// Failure to compile a path-query expression.
#[derive(Debug, Error)]
pub enum ExpressionError {
    /// The expression is not valid RFC 9535 JSONPath.
    #[error("invalid path-query expression: {0}")]
    Parse(#[from] serde_json_path::ParseError),
}

/// A compiled path-query expression.
///
/// Compile once and reuse across documents; compilation is the only cost
/// worth amortizing, application is a pure tree walk.
///
/// # Examples
///
/// ```
/// use reqmap_core::PathExpression;
/// use serde_json::json;
///
/// let expression = PathExpression::parse("$.headers['x-test']").unwrap();
/// let root = json!({"headers": {"x-test": "abc"}});
/// assert_eq!(expression.apply(&root), Some(json!("abc")));
/// ```
#[derive(Clone)]
pub struct PathExpression(JsonPath);

impl PathExpression {
    /// Compiles an expression into a reusable form.
    pub fn parse(expression: &str) -> Result<Self, ExpressionError> {
        Ok(Self(JsonPath::parse(expression)?))
    }

    /// Applies the expression to a document, normalizing the result count.
    ///
    /// Returns `None` for zero matches, the single value for exactly one
    /// match, and an array of the ordered matches otherwise. A matched JSON
    /// `null` is returned as `Some(Value::Null)` — matching a null is not
    /// the same as not matching.
    pub fn apply(&self, document: &Value) -> Option<Value> {
        let matches = self.0.query(document).all();
        match matches.len() {
            0 => None,
            1 => Some(matches[0].clone()),
            _ => Some(Value::Array(matches.into_iter().cloned().collect())),
        }
    }
}

impl Debug for PathExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathExpression").finish_non_exhaustive()
    }
}

/// Resolves a single expression against a document.
///
/// The lookup primitive used by the template engine and the request facade:
/// compile-and-apply, with compile failures converted to "no match".
pub fn evaluate(document: &Value, expression: &str) -> Option<Value> {
    match PathExpression::parse(expression) {
        Ok(compiled) => compiled.apply(document),
        Err(error) => {
            tracing::debug!(%error, expression, "expression rejected, treating as no match");
            None
        }
    }
}

/// Capability interface over the expression engine.
///
/// The template engine resolves lookups through this trait so it can run
/// against a stub engine in tests, independent of the real path-matching
/// implementation. [`JsonPathEvaluator`] is the production implementation.
pub trait Evaluate {
    /// Resolves `expression` against `document` under the
    /// scalar-or-collection contract of [`evaluate`].
    fn evaluate(&self, document: &Value, expression: &str) -> Option<Value>;
}

/// The default [`Evaluate`] implementation, backed by [`serde_json_path`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathEvaluator;

impl Evaluate for JsonPathEvaluator {
    fn evaluate(&self, document: &Value, expression: &str) -> Option<Value> {
        evaluate(document, expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root() -> Value {
        json!({
            "headers": {"x-test": "abc"},
            "query": {"q": "1"},
            "query_all": {"q": ["1", "2"]},
            "body": {"a": 1, "n": null},
        })
    }

    #[test]
    fn test_single_match_is_unwrapped() {
        assert_eq!(evaluate(&root(), "$.query.q"), Some(json!("1")));
        assert_eq!(evaluate(&root(), "$.body.a"), Some(json!(1)));
    }

    #[test]
    fn test_multiple_matches_keep_order() {
        assert_eq!(
            evaluate(&root(), "$.query_all.q[*]"),
            Some(json!(["1", "2"]))
        );
    }

    #[test]
    fn test_whole_array_is_a_single_match() {
        assert_eq!(evaluate(&root(), "$.query_all.q"), Some(json!(["1", "2"])));
    }

    #[test]
    fn test_no_match_is_none() {
        assert_eq!(evaluate(&root(), "$.missing"), None);
    }

    #[test]
    fn test_matched_null_is_some() {
        assert_eq!(evaluate(&root(), "$.body.n"), Some(Value::Null));
    }

    #[test]
    fn test_invalid_expression_is_none() {
        assert_eq!(evaluate(&root(), "$.["), None);
        assert_eq!(evaluate(&root(), "not a path"), None);
    }

    #[test]
    fn test_parse_surfaces_error() {
        assert!(PathExpression::parse("$.headers['x-test']").is_ok());
        assert!(matches!(
            PathExpression::parse("$.["),
            Err(ExpressionError::Parse(_))
        ));
    }

    #[test]
    fn test_compiled_expression_is_reusable() {
        let expression = PathExpression::parse("$.headers['x-test']").unwrap();
        assert_eq!(expression.apply(&root()), Some(json!("abc")));
        assert_eq!(expression.apply(&json!({})), None);
    }
}
