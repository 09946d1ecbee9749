//! JSON display tree
//!
//! Converts a parsed JSON document into a labeled tree for display. Every
//! node carries the property name (or `[index]` for array items), a value
//! string for scalars, and a display type. Strings that are absolute
//! http/https URIs are promoted to [`JsonDisplayType::Url`].

use serde::Serialize;
use serde_json::{Number, Value};
use tracing::debug;

use crate::clipboard::error::InspectResult;
use crate::link::LinkInfo;
use crate::utils::uri::{is_absolute_uri, is_web_url};

/// Keys whose string values may hold the link target
const URL_KEYS: &[&str] = &["url", "uri", "link", "href"];

/// Keys whose string values may hold the link title
const TITLE_KEYS: &[&str] = &["title", "name", "description", "text", "label"];

/// How a node should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonDisplayType {
    /// `{...}`
    Object,
    /// `[...]`
    Array,
    /// String value
    String,
    /// Numeric value
    Number,
    /// `true` / `false`
    Boolean,
    /// `null`
    Null,
    /// String holding an absolute http/https URI
    Url,
}

impl JsonDisplayType {
    /// Whether nodes of this type hold children instead of a value
    pub fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

/// One node of the display tree
///
/// Containers have `value == None` and may have children; scalars always
/// have a value and never have children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonNode {
    /// Property name, `[index]`, or `Root` / `Root Array`
    pub name: String,
    /// Scalar value text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Display classification
    pub display_type: JsonDisplayType,
    /// Child nodes in document order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
}

impl JsonNode {
    fn container(name: String, display_type: JsonDisplayType, children: Vec<JsonNode>) -> Self {
        Self {
            name,
            value: None,
            display_type,
            children,
        }
    }

    fn scalar(name: String, display_type: JsonDisplayType, value: String) -> Self {
        Self {
            name,
            value: Some(value),
            display_type,
            children: Vec::new(),
        }
    }

    /// Scalar values of the subtree, depth-first in document order
    pub fn leaf_values(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match &self.value {
            Some(value) => out.push(value),
            None => self.children.iter().for_each(|c| c.collect_leaves(out)),
        }
    }

    /// Indented outline for text display
    pub fn render_outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.name);
        match (&self.value, self.display_type) {
            (_, JsonDisplayType::Object) => out.push_str(" {Object}"),
            (_, JsonDisplayType::Array) => out.push_str(" {Array}"),
            (Some(value), JsonDisplayType::Url) => {
                out.push_str(": ");
                out.push_str(value);
                out.push_str(" [link]");
            }
            (Some(value), _) => {
                out.push_str(": ");
                out.push_str(value);
            }
            (None, _) => {}
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(out, depth + 1);
        }
    }
}

/// Parse JSON text and build the display tree
///
/// Malformed JSON yields [`InspectError::JsonParse`] carrying the parser's
/// message.
///
/// [`InspectError::JsonParse`]: crate::clipboard::InspectError::JsonParse
pub fn build_tree(json_text: &str) -> InspectResult<JsonNode> {
    let root: Value = serde_json::from_str(json_text)?;

    let name = match root {
        Value::Array(_) => "Root Array",
        _ => "Root",
    };
    Ok(convert(name.to_string(), &root))
}

fn convert(name: String, value: &Value) -> JsonNode {
    match value {
        Value::Object(map) => {
            let children = map.iter().map(|(k, v)| convert(k.clone(), v)).collect();
            JsonNode::container(name, JsonDisplayType::Object, children)
        }
        Value::Array(items) => {
            let children = items
                .iter()
                .enumerate()
                .map(|(i, v)| convert(format!("[{}]", i), v))
                .collect();
            JsonNode::container(name, JsonDisplayType::Array, children)
        }
        Value::String(s) => {
            let display_type = if is_web_url(s) {
                JsonDisplayType::Url
            } else {
                JsonDisplayType::String
            };
            JsonNode::scalar(name, display_type, s.clone())
        }
        Value::Number(n) => JsonNode::scalar(name, JsonDisplayType::Number, number_text(n)),
        Value::Bool(b) => JsonNode::scalar(name, JsonDisplayType::Boolean, b.to_string()),
        Value::Null => JsonNode::scalar(name, JsonDisplayType::Null, "null".to_string()),
    }
}

/// Integral text when the number fits an `i64` exactly, decimal otherwise
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// First URL and title found so far
#[derive(Debug, Default)]
struct LinkSearch {
    url: Option<String>,
    title: Option<String>,
}

impl LinkSearch {
    fn is_complete(&self) -> bool {
        self.url.is_some() && self.title.is_some()
    }
}

/// Find a URL/title pair anywhere in the tree
///
/// Depth-first in document order. The first string property whose key
/// contains url/uri/link/href and whose value is an absolute URI wins the
/// URL; the first string property whose key contains
/// title/name/description/text/label wins the title. This may pick a
/// nested field before a top-level one.
pub fn extract_link_info(tree: &JsonNode) -> LinkInfo {
    let found = search(tree, LinkSearch::default());
    debug!(url = ?found.url, title = ?found.title, "JSON link search finished");

    LinkInfo {
        url: found.url,
        title: found.title,
        raw_text: String::new(),
    }
}

fn search(node: &JsonNode, mut acc: LinkSearch) -> LinkSearch {
    if acc.is_complete() {
        return acc;
    }

    if node.display_type.is_container() {
        for child in &node.children {
            acc = search(child, acc);
            if acc.is_complete() {
                break;
            }
        }
        return acc;
    }

    let is_string = matches!(
        node.display_type,
        JsonDisplayType::String | JsonDisplayType::Url
    );
    let Some(value) = node.value.as_deref().filter(|_| is_string) else {
        return acc;
    };

    let key = node.name.to_lowercase();
    if acc.url.is_none() && URL_KEYS.iter().any(|k| key.contains(k)) && is_absolute_uri(value) {
        acc.url = Some(value.to_string());
    }
    if acc.title.is_none() && TITLE_KEYS.iter().any(|k| key.contains(k)) {
        acc.title = Some(value.to_string());
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_preserves_order() {
        let tree = build_tree(r#"{"z":1,"a":"two","m":[true,null]}"#).unwrap();
        assert_eq!(tree.name, "Root");
        assert_eq!(tree.display_type, JsonDisplayType::Object);
        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);

        let array = &tree.children[2];
        assert_eq!(array.display_type, JsonDisplayType::Array);
        assert_eq!(array.children[0].name, "[0]");
        assert_eq!(array.children[0].value.as_deref(), Some("true"));
        assert_eq!(array.children[1].display_type, JsonDisplayType::Null);
        assert_eq!(array.children[1].value.as_deref(), Some("null"));
        assert_eq!(tree.leaf_values(), ["1", "two", "true", "null"]);
    }

    #[test]
    fn test_root_names() {
        assert_eq!(build_tree("[1]").unwrap().name, "Root Array");
        let scalar = build_tree("\"hello\"").unwrap();
        assert_eq!(scalar.name, "Root");
        assert_eq!(scalar.display_type, JsonDisplayType::String);
    }

    #[test]
    fn test_url_promotion() {
        let tree = build_tree(r#"["https://example.com/x","hello","ftp://example.com"]"#).unwrap();
        assert_eq!(tree.children[0].display_type, JsonDisplayType::Url);
        assert_eq!(tree.children[1].display_type, JsonDisplayType::String);
        assert_eq!(tree.children[2].display_type, JsonDisplayType::String);
    }

    #[test]
    fn test_numbers() {
        let tree = build_tree(r#"[42,-7,1.5,2.0,18446744073709551615]"#).unwrap();
        let values: Vec<&str> = tree.leaf_values();
        assert_eq!(values[0], "42");
        assert_eq!(values[1], "-7");
        assert_eq!(values[2], "1.5");
        assert_eq!(values[3], "2");
        assert_ne!(values[4], "18446744073709551615");
    }

    #[test]
    fn test_scalars_have_no_children_containers_no_value() {
        let tree = build_tree(r#"{"a":{},"b":[],"c":"x"}"#).unwrap();
        for node in &tree.children {
            assert_eq!(node.display_type.is_container(), node.value.is_none());
            if !node.display_type.is_container() {
                assert!(node.children.is_empty());
            }
        }
    }

    #[test]
    fn test_parse_error() {
        let err = build_tree("{\"a\":").unwrap_err();
        assert!(err.to_string().starts_with("Error parsing JSON:"));
    }

    #[test]
    fn test_extract_link_info_first_match_wins() {
        let tree = build_tree(
            r#"{
                "meta": {"image_url": "https://cdn.example.com/a.png", "name": "nested"},
                "url": "https://example.com",
                "title": "Top Level"
            }"#,
        )
        .unwrap();
        let info = extract_link_info(&tree);
        assert_eq!(info.url.as_deref(), Some("https://cdn.example.com/a.png"));
        assert_eq!(info.title.as_deref(), Some("nested"));
    }

    #[test]
    fn test_extract_link_info_skips_relative_urls() {
        let tree = build_tree(
            r#"{"href":"/relative","items":[{"link":"https://example.com/page","label":"Page"}]}"#,
        )
        .unwrap();
        let info = extract_link_info(&tree);
        assert_eq!(info.url.as_deref(), Some("https://example.com/page"));
        assert_eq!(info.title.as_deref(), Some("Page"));
    }

    #[test]
    fn test_extract_link_info_ignores_non_strings() {
        let tree = build_tree(r#"{"title":5,"url":null,"text":"caption"}"#).unwrap();
        let info = extract_link_info(&tree);
        assert_eq!(info.url, None);
        assert_eq!(info.title.as_deref(), Some("caption"));
    }

    #[test]
    fn test_outline() {
        let tree = build_tree(r#"{"url":"https://a.example","n":1}"#).unwrap();
        let outline = tree.render_outline();
        assert_eq!(outline, "Root {Object}\n  url: https://a.example [link]\n  n: 1\n");
    }
}
