//! Recursive template application against a root document.
//!
//! A template is an ordinary JSON value whose string leaves carry meaning:
//!
//! | Leaf (after trim)      | Result                                        |
//! |------------------------|-----------------------------------------------|
//! | empty                  | `""`                                          |
//! | `uuid()`               | [`Builtins::uuid`], verbatim                  |
//! | `now()`                | the supplied clock, or current UTC RFC 3339   |
//! | starts with `$`        | path-query lookup, no match → `null`          |
//! | anything else          | the original string, untouched                |
//!
//! Objects and arrays are walked structurally — keys, order, and length are
//! preserved; non-string scalars pass through unchanged. The input template
//! is never mutated; application builds a fresh tree.
//!
//! Builtin dispatch is an exact whole-string match on the trimmed leaf.
//! `uuid()` inside a longer string, or with arguments, is a literal.
//! Trimming affects classification only: an expression leaf is handed to the
//! evaluator exactly as it appears in the template.

use serde_json::Value;

use crate::builtins::Builtins;
use crate::expression::{Evaluate, JsonPathEvaluator};

/// Applies `template` against `root` with the default path-query engine.
///
/// # Examples
///
/// ```
/// use reqmap_core::{Builtins, apply_template};
/// use serde_json::json;
///
/// let root = json!({"query": {"page": "3"}});
/// let template = json!({"page": "$.query.page", "limit": 20});
/// let out = apply_template(&root, &template, &Builtins::default());
/// assert_eq!(out, json!({"page": "3", "limit": 20}));
/// ```
pub fn apply_template(root: &Value, template: &Value, builtins: &Builtins) -> Value {
    apply_template_with(&JsonPathEvaluator, root, template, builtins)
}

/// Applies `template` against `root`, resolving lookups through `evaluator`.
pub fn apply_template_with<E>(
    evaluator: &E,
    root: &Value,
    template: &Value,
    builtins: &Builtins,
) -> Value
where
    E: Evaluate,
{
    match template {
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, value)| {
                    (
                        key.clone(),
                        apply_template_with(evaluator, root, value, builtins),
                    )
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| apply_template_with(evaluator, root, item, builtins))
                .collect(),
        ),
        Value::String(text) => apply_string(evaluator, root, text, builtins),
        other => other.clone(),
    }
}

fn apply_string<E>(evaluator: &E, root: &Value, text: &str, builtins: &Builtins) -> Value
where
    E: Evaluate,
{
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::String(String::new());
    }
    if trimmed == "uuid()" {
        return Value::String(builtins.uuid.clone());
    }
    if trimmed == "now()" {
        return Value::String(builtins.now_value());
    }
    if trimmed.starts_with('$') {
        // Lookup receives the leaf as written, not the trimmed copy.
        return evaluator.evaluate(root, text).unwrap_or(Value::Null);
    }
    Value::String(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root() -> Value {
        json!({
            "x": 42,
            "headers": {"x-test": "abc"},
            "cookies": {"sid": "123"},
        })
    }

    fn builtins() -> Builtins {
        Builtins::new("U").with_now(|| "T".to_string())
    }

    #[test]
    fn test_structure_is_preserved() {
        let template = json!({"a": [1, "$.x", "uuid()"]});
        let out = apply_template(&root(), &template, &builtins());
        assert_eq!(out, json!({"a": [1, 42, "U"]}));
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let template = json!({
            "meta": {"id": "uuid()", "at": "now()"},
            "values": [["$.cookies.sid"], true, null],
        });
        let out = apply_template(&root(), &template, &builtins());
        assert_eq!(
            out,
            json!({
                "meta": {"id": "U", "at": "T"},
                "values": [["123"], true, null],
            })
        );
    }

    #[test]
    fn test_literal_passthrough_keeps_whitespace() {
        let template = json!("  hello  ");
        let out = apply_template(&root(), &template, &builtins());
        assert_eq!(out, json!("  hello  "));
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        let out = apply_template(&root(), &json!("   "), &builtins());
        assert_eq!(out, json!(""));
    }

    #[test]
    fn test_builtins_dispatch_on_trimmed_leaf() {
        let out = apply_template(&root(), &json!(" uuid() "), &builtins());
        assert_eq!(out, json!("U"));
    }

    #[test]
    fn test_builtins_are_exact_matches_only() {
        let out = apply_template(&root(), &json!("uuid() please"), &builtins());
        assert_eq!(out, json!("uuid() please"));
        let out = apply_template(&root(), &json!("now(3)"), &builtins());
        assert_eq!(out, json!("now(3)"));
    }

    #[test]
    fn test_no_match_becomes_null() {
        let out = apply_template(&root(), &json!("$.missing"), &builtins());
        assert_eq!(out, Value::Null);
    }

    #[test]
    fn test_non_string_scalars_are_identity() {
        for template in [json!(7), json!(1.5), json!(false), Value::Null] {
            assert_eq!(apply_template(&root(), &template, &builtins()), template);
        }
    }

    #[test]
    fn test_template_is_not_mutated() {
        let template = json!({"a": "$.x"});
        let before = template.clone();
        let _ = apply_template(&root(), &template, &builtins());
        assert_eq!(template, before);
    }

    #[test]
    fn test_stub_evaluator_injection() {
        struct Stub;
        impl Evaluate for Stub {
            fn evaluate(&self, _document: &Value, expression: &str) -> Option<Value> {
                Some(Value::String(format!("seen:{expression}")))
            }
        }

        let out = apply_template_with(&Stub, &root(), &json!(" $.x "), &builtins());
        // The stub observes the untrimmed leaf.
        assert_eq!(out, json!("seen: $.x "));
    }
}
