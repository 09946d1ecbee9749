use clipboard_inspector::clipboard::formats::{CF_DIB, CF_LOCALE, CF_TEXT, CF_UNICODETEXT};
use clipboard_inspector::clipboard::{DecodedContent, FormatKind, FormatRegistry, Inspector, RawRepresentation};
use clipboard_inspector::config::Config;
use clipboard_inspector::json::JsonDisplayType;

fn utf16z(text: &str) -> Vec<u8> {
    text.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

/// 2x1 24-bit bottom-up DIB with a 40-byte info header
fn tiny_dib() -> Vec<u8> {
    let mut dib = Vec::new();
    dib.extend_from_slice(&40u32.to_le_bytes());
    dib.extend_from_slice(&2i32.to_le_bytes());
    dib.extend_from_slice(&1i32.to_le_bytes());
    dib.extend_from_slice(&1u16.to_le_bytes());
    dib.extend_from_slice(&24u16.to_le_bytes());
    dib.extend_from_slice(&[0u8; 24]);
    // Two BGR pixels padded to a 4-byte row
    dib.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0]);
    dib
}

#[test]
fn test_typical_browser_copy() {
    let html = "Version:0.9\r\nStartHTML:0000000105\r\n<html><body>\r\n<!--StartFragment--><p>Hello <b>world</b></p><!--EndFragment-->\r\n</body></html>";

    let reps = vec![
        RawRepresentation::new(CF_UNICODETEXT, "CF_UNICODETEXT", utf16z("Hello world")),
        RawRepresentation::new(0xC0A1, "HTML Format", html.as_bytes().to_vec()),
        RawRepresentation::new(CF_LOCALE, "CF_LOCALE", vec![0x09, 0x04, 0x00, 0x00]),
        RawRepresentation::new(CF_TEXT, "CF_TEXT", b"Hello world\0".to_vec()),
    ];

    let inspections = Inspector::default().inspect_all(&reps);
    let kinds: Vec<FormatKind> = inspections.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FormatKind::UnicodeText,
            FormatKind::Html,
            FormatKind::Locale,
            FormatKind::PlainText
        ]
    );

    assert_eq!(inspections[0].content, DecodedContent::Text("Hello world".to_string()));

    let document = inspections[1].content.render();
    assert!(document.starts_with("<!-- Version:0.9 -->\n<!-- StartHTML:0000000105 -->\n"));
    assert!(document.contains("<p>"));
    assert!(document.contains("world"));
    assert!(document.ends_with("\n\t</body>\n</html>"));

    assert!(inspections[2].content.render().contains("en-US"));
    assert_eq!(inspections[3].content, DecodedContent::Text("Hello world".to_string()));
}

#[test]
fn test_image_format_wins_over_html_name() {
    let rep = RawRepresentation::new(CF_DIB, "HTML Format", tiny_dib());
    let inspection = Inspector::default().inspect(&rep);

    assert_eq!(inspection.kind, FormatKind::Image);
    match &inspection.content {
        DecodedContent::Image(image) => {
            assert_eq!((image.width, image.height), (2, 1));
            assert!(image.data.starts_with(b"BM"));
        }
        other => panic!("expected image, got {:?}", other),
    }
}

#[test]
fn test_link_preview_json() {
    let json = r#"{"domain":"example.com","preview":{"url":"https://example.com/post","title":"A Post"},"tags":["a",1,true,null]}"#;
    let config = Config::from_toml("[formats]\nlink_preview_id = 49863\n").unwrap();
    let inspector = Inspector::from_config(&config);

    let inspection = inspector.inspect(&RawRepresentation::new(49863, "Custom Format (49863)", json.as_bytes().to_vec()));
    assert_eq!(inspection.kind, FormatKind::JsonLink);

    match inspection.content {
        DecodedContent::JsonTree { root, link, formatted } => {
            assert_eq!(root.display_type, JsonDisplayType::Object);
            assert_eq!(link.url.as_deref(), Some("https://example.com/post"));
            assert_eq!(link.title.as_deref(), Some("A Post"));
            assert!(formatted.contains('\n'));
        }
        other => panic!("expected json tree, got {:?}", other),
    }
}

#[test]
fn test_link_preview_name_without_json_is_not_json_link() {
    let registry = FormatRegistry::new();
    let inspector = Inspector::new(registry, Default::default());
    let rep = RawRepresentation::new(0xC0B0, "Link Preview Format", b"https://example.com".to_vec());

    assert_ne!(inspector.classify(&rep), FormatKind::JsonLink);
}

#[test]
fn test_broken_locale_is_malformed_not_fatal() {
    let reps = vec![
        RawRepresentation::new(CF_LOCALE, "CF_LOCALE", vec![0x09, 0x04]),
        RawRepresentation::new(CF_UNICODETEXT, "CF_UNICODETEXT", utf16z("still here")),
    ];

    let inspections = Inspector::default().inspect_all(&reps);
    assert!(inspections[0].content.is_malformed());
    assert!(inspections[0].content.render().starts_with("Error: "));
    assert_eq!(inspections[1].content, DecodedContent::Text("still here".to_string()));
}

#[test]
fn test_json_output_shape() {
    let rep = RawRepresentation::new(CF_UNICODETEXT, "CF_UNICODETEXT", utf16z("hi"));
    let inspection = Inspector::default().inspect(&rep);
    let value = serde_json::to_value(&inspection).unwrap();

    assert_eq!(value["format_id"], 13);
    assert_eq!(value["kind"], "unicode_text");
    assert_eq!(value["content"]["type"], "text");
    assert_eq!(value["content"]["content"], "hi");
}
