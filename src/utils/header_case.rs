use std::collections::BTreeMap;

use axum::http::HeaderMap;

/// Renders a header name in canonical MIME form: `x-forwarded-for` becomes
/// `X-Forwarded-For`.
pub fn canonical_header_key(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

/// Copies every header into a map keyed by canonical name. Values keep the
/// order in which they were received.
pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    headers
        .keys()
        .map(|name| {
            let values = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect();
            (canonical_header_key(name.as_str()), values)
        })
        .collect()
}
