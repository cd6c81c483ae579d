//! Launch query parameters.
//!
//! The client is configured entirely through its launch URL's query string.
//! Keys are matched case-insensitively; values keep their original casing.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Parses a raw query string (`"debug=1&scenario=fs"`). A leading `?` is
    /// tolerated. Empty pairs and keys without values are skipped.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let values = query
            .split('&')
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                if key.is_empty() {
                    return None;
                }
                Some((key.to_ascii_lowercase(), value.to_string()))
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Trimmed value, with empty-after-trim treated as absent.
    pub fn get_nonempty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Debug mode is requested with `debug=1` or `mode=debug`.
    pub fn is_debug(&self) -> bool {
        if self.get("debug") == Some("1") {
            return true;
        }
        self.get("mode")
            .is_some_and(|mode| mode.eq_ignore_ascii_case("debug"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let params = QueryParams::parse("?BookId=2&SCENARIO=fs");
        assert_eq!(params.get("bookid"), Some("2"));
        assert_eq!(params.get("bookId"), Some("2"));
        assert_eq!(params.get("scenario"), Some("fs"));
    }

    #[test]
    fn debug_flag_spellings() {
        assert!(QueryParams::parse("debug=1").is_debug());
        assert!(QueryParams::parse("mode=DEBUG").is_debug());
        assert!(!QueryParams::parse("debug=0").is_debug());
        assert!(!QueryParams::parse("mode=BASE").is_debug());
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let params = QueryParams::parse("a=1&&novalue&=orphan&b=2");
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), Some("2"));
        assert_eq!(params.get("novalue"), None);
    }
}
