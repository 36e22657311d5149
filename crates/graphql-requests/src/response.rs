use std::sync::OnceLock;

use serde_json::Value;

/// A captured admin API response: status, headers, the raw body, and the
/// body's JSON document, parsed at most once on first inspection.
#[derive(Debug)]
pub struct GraphqlHttpResponse {
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    text: String,
    json: OnceLock<Option<Value>>,
}

impl GraphqlHttpResponse {
    pub fn new(status: http::StatusCode, headers: http::HeaderMap, text: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            text: text.into(),
            json: OnceLock::new(),
        }
    }

    /// The raw body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The body parsed as JSON. A body that is not valid JSON is absent.
    pub fn json(&self) -> Option<&Value> {
        self.json
            .get_or_init(|| serde_json::from_str(&self.text).ok())
            .as_ref()
    }

    /// True iff the body parses as JSON and carries a non-null top-level
    /// `errors` field.
    pub fn has_errors(&self) -> bool {
        self.json().is_some_and(|body| !body["errors"].is_null())
    }

    /// Extracts the value at `path`, a dotted expression with optional array
    /// indices (`data.jobs[0].id`). Anything that does not lead to a value,
    /// whether a missing key, an out-of-range index or a malformed segment,
    /// is absence, never a failure.
    pub fn extract(&self, path: &str) -> Option<&Value> {
        self.json().and_then(|body| lookup(body, path))
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;

    for segment in path.split('.') {
        let (name, indices) = parse_segment(segment)?;
        if !name.is_empty() {
            current = current.as_object()?.get(name)?;
        }
        for index in indices {
            current = current.as_array()?.get(index)?;
        }
    }

    Some(current)
}

/// Splits `name[0][1]` into the field name and its indices. A segment that
/// is not of that shape yields `None`.
fn parse_segment(segment: &str) -> Option<(&str, Vec<usize>)> {
    let bracket = segment.find('[').unwrap_or(segment.len());
    let name = &segment[..bracket];

    let mut indices = Vec::new();
    let mut rest = &segment[bracket..];
    while let Some(inner) = rest.strip_prefix('[') {
        let end = inner.find(']')?;
        indices.push(inner[..end].parse().ok()?);
        rest = &inner[end + 1..];
    }

    if rest.is_empty() {
        Some((name, indices))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use http::{HeaderMap, StatusCode};
    use serde_json::json;

    use super::*;

    fn from_body(body: Value) -> GraphqlHttpResponse {
        GraphqlHttpResponse::new(StatusCode::OK, HeaderMap::new(), body.to_string())
    }

    #[test]
    fn extracts_nested_fields() {
        let response = from_body(json!({"data": {"count": 3}}));
        assert_eq!(response.extract("data.count"), Some(&json!(3)));
    }

    #[test]
    fn extracts_array_elements() {
        let response = from_body(json!({"data": {"jobs": [{"id": "a"}, {"id": "b"}]}}));
        assert_eq!(response.extract("data.jobs[1].id"), Some(&json!("b")));
    }

    #[test]
    fn stacked_indices_walk_nested_arrays() {
        let response = from_body(json!({"rows": [[1, 2], [3, 4]]}));
        assert_eq!(response.extract("rows[1][0]"), Some(&json!(3)));
    }

    #[test]
    fn missing_paths_are_absent() {
        let response = from_body(json!({"data": {}}));
        assert_eq!(response.extract("data.count"), None);
        assert_eq!(response.extract("data.jobs[0]"), None);
        assert_eq!(response.extract("count"), None);
    }

    #[test]
    fn type_mismatches_are_absent() {
        let response = from_body(json!({"data": {"count": 3}}));
        assert_eq!(response.extract("data.count.nested"), None);
        assert_eq!(response.extract("data[0]"), None);
    }

    #[test]
    fn malformed_segments_are_absent() {
        let response = from_body(json!({"data": [1]}));
        assert_eq!(response.extract("data[x]"), None);
        assert_eq!(response.extract("data[0"), None);
        assert_eq!(response.extract("data[0]trailing"), None);
    }

    #[test]
    fn detects_a_populated_errors_field() {
        let response = from_body(json!({"errors": [{"message": "boom"}]}));
        assert!(response.has_errors());
    }

    #[test]
    fn a_null_or_missing_errors_field_is_not_an_error() {
        assert!(!from_body(json!({"data": {}, "errors": null})).has_errors());
        assert!(!from_body(json!({"data": {}})).has_errors());
    }

    #[test]
    fn non_json_bodies_inspect_as_absent() {
        let response = GraphqlHttpResponse::new(
            StatusCode::BAD_GATEWAY,
            HeaderMap::new(),
            "<html>502 Bad Gateway</html>",
        );

        assert!(response.json().is_none());
        assert!(!response.has_errors());
        assert_eq!(response.extract("data"), None);
        assert_eq!(response.text(), "<html>502 Bad Gateway</html>");
    }
}
