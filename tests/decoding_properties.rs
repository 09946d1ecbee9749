use clipboard_inspector::clipboard::{classify, FormatKind, FormatRegistry};
use clipboard_inspector::codec::{dib_to_bitmap, extract_null_terminated_strings, hex_dump};
use clipboard_inspector::html::beautify_html;
use clipboard_inspector::json::{build_tree, pretty_print};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Arbitrary JSON with nested objects and arrays
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::vec(("[a-z]{1,6}", inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Scalar texts in document order
fn expected_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => map.values().for_each(|v| expected_leaves(v, out)),
        Value::Array(items) => items.iter().for_each(|v| expected_leaves(v, out)),
        Value::String(s) => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Null => out.push("null".to_string()),
    }
}

proptest! {
    #[test]
    fn bitmap_is_dib_plus_file_header(dib in proptest::collection::vec(any::<u8>(), 0..512)) {
        let bitmap = dib_to_bitmap(&dib);

        prop_assert_eq!(bitmap.len(), dib.len() + 14);
        prop_assert_eq!(&bitmap[..2], b"BM");
        prop_assert_eq!(&bitmap[14..], &dib[..]);

        let declared = u32::from_le_bytes([bitmap[2], bitmap[3], bitmap[4], bitmap[5]]);
        prop_assert_eq!(declared as usize, dib.len() + 14);
    }

    #[test]
    fn hex_dump_line_count(len in 1usize..6000) {
        let bytes = vec![0x41u8; len];
        let dump = hex_dump(&bytes);
        let data_lines = dump.lines().filter(|l| l.contains(": ") && l.contains(" | ")).count();

        prop_assert_eq!(data_lines, len.min(4096).div_ceil(16));
        prop_assert_eq!(dump.contains("more bytes not shown"), len > 4096);
    }

    #[test]
    fn no_terminator_means_no_strings(bytes in proptest::collection::vec(1u8..=255, 0..256)) {
        prop_assert!(extract_null_terminated_strings(&bytes).is_empty());
    }

    #[test]
    fn classification_is_total(id in any::<u32>(), name in ".{0,40}", bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let kind = classify(&FormatRegistry::new(), id, &name, Some(&bytes));
        prop_assert!(FormatKind::ALL.contains(&kind));
    }

    #[test]
    fn beautifier_never_panics(html in "[<>/a-z \"=]{0,80}") {
        let _ = beautify_html(&html, 0);
    }

    #[test]
    fn tree_leaves_follow_document_order(values in proptest::collection::vec("[a-z]{1,8}", 1..8)) {
        let json = format!(
            "{{{}}}",
            values
                .iter()
                .enumerate()
                .map(|(i, v)| format!("\"k{}\":\"{}\"", i, v))
                .collect::<Vec<_>>()
                .join(",")
        );
        let tree = build_tree(&json).unwrap();
        let leaves: Vec<&str> = tree.leaf_values();
        let expected: Vec<&str> = values.iter().map(String::as_str).collect();

        prop_assert_eq!(leaves, expected);
        prop_assert!(pretty_print(&json).contains("\"k0\""));
    }

    #[test]
    fn nested_tree_leaves_follow_document_order(items in proptest::collection::vec(json_value(), 0..6)) {
        let document = Value::Array(items);
        let json = serde_json::to_string(&document).unwrap();
        let tree = build_tree(&json).unwrap();

        let mut expected = Vec::new();
        expected_leaves(&document, &mut expected);

        prop_assert_eq!(tree.name.as_str(), "Root Array");
        prop_assert_eq!(tree.leaf_values(), expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
