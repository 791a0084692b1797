//! Canonical root construction from request parts and captured body bytes.
//!
//! The root is the document all lookups and templates run against. Its
//! shape is fixed:
//!
//! ```json
//! {
//!   "method": "POST",
//!   "path": "/test",
//!   "host": "example.com",
//!   "headers": {"x-test": "abc"},
//!   "headers_all": {"x-test": ["abc"]},
//!   "query": {"q": "1"},
//!   "query_all": {"q": ["1", "2"]},
//!   "cookies": {"sid": "123"},
//!   "body": {"a": 1}
//! }
//! ```
//!
//! `headers`/`query` hold the first value per key; `headers_all`/`query_all`
//! hold the complete ordered value lists. Header keys are lower-case so
//! lookups are case-insensitive; query and cookie keys keep their casing.
//! The body decodes best-effort, defaulting to `{}`.

use cookie::Cookie;
use http::HeaderMap;
use http::header;
use http::request::Parts;
use serde_json::{Map, Value};

use crate::query;

/// Builds the canonical root for a request.
///
/// Pure function of the given parts and body bytes; safe to call with
/// default (empty) parts.
pub fn request_root(parts: &Parts, body: &[u8]) -> Value {
    let (headers, headers_all) = header_maps(&parts.headers);
    let (query, query_all) = query::parse(parts.uri.query().unwrap_or(""));
    let cookies = cookie_map(&parts.headers);
    let body = reqmap_core::json::try_parse(body).unwrap_or_else(|| Value::Object(Map::new()));

    let mut root = Map::new();
    root.insert("method".into(), Value::String(parts.method.to_string()));
    root.insert("path".into(), Value::String(parts.uri.path().to_owned()));
    root.insert("host".into(), Value::String(host(parts)));
    root.insert("headers".into(), Value::Object(headers));
    root.insert("headers_all".into(), Value::Object(headers_all));
    root.insert("query".into(), Value::Object(query));
    root.insert("query_all".into(), Value::Object(query_all));
    root.insert("cookies".into(), Value::Object(cookies));
    root.insert("body".into(), body);
    Value::Object(root)
}

/// Builds the first-value and all-values header maps.
///
/// The `http` crate stores header names lower-cased, which is what makes
/// root lookups case-insensitive. Values that are not visible ASCII are
/// skipped; a key with no decodable values is omitted from both maps.
pub fn header_maps(headers: &HeaderMap) -> (Map<String, Value>, Map<String, Value>) {
    let mut first = Map::new();
    let mut all = Map::new();

    for key in headers.keys() {
        let values: Vec<Value> = headers
            .get_all(key)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(|value| Value::String(value.to_owned()))
            .collect();
        let Some(head) = values.first() else {
            continue;
        };
        first.insert(key.as_str().to_owned(), head.clone());
        all.insert(key.as_str().to_owned(), Value::Array(values));
    }

    (first, all)
}

/// Builds the cookie name→value map from every `Cookie` header.
///
/// Malformed pairs are skipped; duplicate names last-wins in arrival order.
pub fn cookie_map(headers: &HeaderMap) -> Map<String, Value> {
    let mut cookies = Map::new();
    for header in headers.get_all(header::COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        for cookie in Cookie::split_parse(raw).flatten() {
            cookies.insert(
                cookie.name().to_owned(),
                Value::String(cookie.value().to_owned()),
            );
        }
    }
    cookies
}

fn host(parts: &Parts) -> String {
    if let Some(authority) = parts.uri.authority() {
        return authority.as_str().to_owned();
    }
    parts
        .headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_owned()
}
