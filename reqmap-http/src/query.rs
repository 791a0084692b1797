//! Query-string parsing into first/all value maps.
//!
//! Pairs are decoded in arrival order with `url::form_urlencoded`
//! (percent-decoding, `+` as space). Keys keep their original casing.

use serde_json::{Map, Value};

/// Parses a raw query string into the first-value and all-values maps.
///
/// For each key, the first map holds the first value seen as a scalar
/// string and the all map holds every value in arrival order. A key never
/// appears with an empty value list.
pub fn parse(query: &str) -> (Map<String, Value>, Map<String, Value>) {
    let mut first = Map::new();
    let mut all = Map::new();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        first
            .entry(key.to_string())
            .or_insert_with(|| Value::String(value.to_string()));
        let values = all
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(values) = values {
            values.push(Value::String(value.to_string()));
        }
    }

    (first, all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_pair() {
        let (first, all) = parse("key=value");
        assert_eq!(first.get("key"), Some(&json!("value")));
        assert_eq!(all.get("key"), Some(&json!(["value"])));
    }

    #[test]
    fn test_parse_repeated_key_keeps_order() {
        let (first, all) = parse("q=1&q=2");
        assert_eq!(first.get("q"), Some(&json!("1")));
        assert_eq!(all.get("q"), Some(&json!(["1", "2"])));
    }

    #[test]
    fn test_parse_preserves_key_case() {
        let (first, _) = parse("Page=3");
        assert_eq!(first.get("Page"), Some(&json!("3")));
        assert_eq!(first.get("page"), None);
    }

    #[test]
    fn test_parse_decodes_values() {
        let (first, _) = parse("name=a%20b+c");
        assert_eq!(first.get("name"), Some(&json!("a b c")));
    }

    #[test]
    fn test_parse_empty_query() {
        let (first, all) = parse("");
        assert!(first.is_empty());
        assert!(all.is_empty());
    }

    #[test]
    fn test_parse_bare_key_has_empty_value() {
        let (first, all) = parse("flag");
        assert_eq!(first.get("flag"), Some(&json!("")));
        assert_eq!(all.get("flag"), Some(&json!([""])));
    }
}
