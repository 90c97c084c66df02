//! Newline-delimited header blocks (`Key: Value` per line)

use crate::models::Header;
use crate::variables::{substitute, VariableMap};

/// Parse a header block into ordered key/value pairs.
///
/// Empty lines and lines without a colon are dropped. Only the first colon
/// splits, so values may contain colons. Key and value are trimmed. A key
/// repeated later (compared case-insensitively) replaces the earlier value
/// in place.
pub fn parse_header_block(block: &str) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();

    for line in block.split('\n') {
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some(existing) => existing.1 = value.to_string(),
            None => headers.push((key.to_string(), value.to_string())),
        }
    }

    headers
}

/// Render template headers as an editable block.
///
/// Values are substituted, keys are not.
pub fn render_header_block(headers: &[Header], variables: &VariableMap) -> String {
    let mut block = String::new();
    for header in headers {
        block.push_str(&header.key);
        block.push_str(": ");
        block.push_str(&substitute(&header.value, variables));
        block.push('\n');
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_drops_malformed_lines() {
        let headers = parse_header_block("X-A: 1\nbadline\nX-B:  2  ");
        assert_eq!(headers, pairs(&[("X-A", "1"), ("X-B", "2")]));
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let headers = parse_header_block("Referer: http://example.com:8080/x\n\n");
        assert_eq!(headers, pairs(&[("Referer", "http://example.com:8080/x")]));
    }

    #[test]
    fn test_parse_handles_crlf_and_blank_lines() {
        let headers = parse_header_block("\r\nAccept: */*\r\n\nX-Empty:\n");
        assert_eq!(headers, pairs(&[("Accept", "*/*"), ("X-Empty", "")]));
    }

    #[test]
    fn test_parse_later_duplicate_replaces() {
        let headers = parse_header_block("Accept: a\nX-Id: 1\naccept: b");
        assert_eq!(headers, pairs(&[("Accept", "b"), ("X-Id", "1")]));
    }

    #[test]
    fn test_render_substitutes_values_only() {
        let vars: VariableMap = [("token".to_string(), "abc".to_string())].into_iter().collect();
        let block = render_header_block(
            &[
                Header::new("Authorization", "Bearer {{token}}"),
                Header::new("X-{{token}}", "plain"),
            ],
            &vars,
        );
        assert_eq!(block, "Authorization: Bearer abc\nX-{{token}}: plain\n");
    }

    #[test]
    fn test_render_then_parse() {
        let block = render_header_block(&[Header::new("Content-Type", "application/json")], &VariableMap::new());
        assert_eq!(parse_header_block(&block), pairs(&[("Content-Type", "application/json")]));
    }
}
