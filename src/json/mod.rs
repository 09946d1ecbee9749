//! JSON payloads
//!
//! Link-preview representations carry a JSON document. This module sniffs
//! for JSON, builds a labeled display tree from it, pulls out a URL/title
//! pair, and re-indents the raw text independently of the tree.

pub mod pretty;
pub mod tree;

pub use pretty::pretty_print;
pub use tree::{build_tree, extract_link_info, JsonDisplayType, JsonNode};

use once_cell::sync::Lazy;
use regex::Regex;

static KEY_VALUE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""\s*:"#).expect("static regex"));

/// Cheap sniff test for JSON content
///
/// True iff the trimmed text is wrapped in a matching `{}` or `[]` pair and
/// contains at least one `"key":` separator. This does not validate.
pub fn is_json_content(text: &str) -> bool {
    let trimmed = text.trim();
    let wrapped = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));

    wrapped && KEY_VALUE_SEPARATOR.is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json_content() {
        assert!(is_json_content("  {\"a\":1}  "));
        assert!(is_json_content("[{\"a\" : 1}]"));
        assert!(!is_json_content("not json"));
        assert!(!is_json_content("{unterminated"));
        assert!(!is_json_content("[1, 2, 3]"));
        assert!(!is_json_content("{\"a\":1]"));
        assert!(!is_json_content(""));
    }
}
