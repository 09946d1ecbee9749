//! HTML re-indentation
//!
//! Two passes: [`tokenize`] splits the input into tags and text runs, then
//! the printer walks the tokens with an explicit stack of open tag names.
//! Each token is printed on its own line, indented with tabs.

use tracing::{debug, trace};

use crate::clipboard::error::{InspectError, InspectResult};

/// Elements that never have a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// One lexical unit of HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlToken<'a> {
    /// `<...>` including the angle brackets
    Tag(&'a str),
    /// Text between tags, or an unterminated `<...` tail
    Text(&'a str),
}

/// Split HTML into tag and text tokens
///
/// Whitespace between tokens is dropped. A `<` with no matching `>` turns the
/// rest of the input into a single text token.
pub fn tokenize(html: &str) -> InspectResult<Vec<HtmlToken<'_>>> {
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < html.len() {
        let rest = slice_from(html, pos)?;
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            break;
        }

        if trimmed.starts_with('<') {
            match trimmed.find('>') {
                Some(close) => {
                    tokens.push(HtmlToken::Tag(slice(trimmed, 0, close + 1)?));
                    pos += close + 1;
                }
                None => {
                    tokens.push(HtmlToken::Text(trimmed));
                    pos = html.len();
                }
            }
        } else {
            let end = trimmed.find('<').unwrap_or(trimmed.len());
            let text = slice(trimmed, 0, end)?;
            if !text.trim().is_empty() {
                tokens.push(HtmlToken::Text(text));
            }
            pos += end;
        }
    }

    trace!(count = tokens.len(), "Tokenized HTML");
    Ok(tokens)
}

/// Re-indent HTML
///
/// `base_indent` tabs are added to every line. Returns the input unchanged
/// when it is blank or cannot be tokenized.
pub fn beautify_html(html: &str, base_indent: usize) -> String {
    if html.trim().is_empty() {
        return html.to_string();
    }

    match try_beautify(html, base_indent) {
        Ok(out) => out,
        Err(e) => {
            debug!("HTML beautify skipped: {}", e);
            html.to_string()
        }
    }
}

fn try_beautify(html: &str, base_indent: usize) -> InspectResult<String> {
    let tokens = tokenize(html)?;
    let mut out = String::with_capacity(html.len() + tokens.len() * (base_indent + 2));
    let mut stack: Vec<&str> = Vec::new();

    for token in tokens {
        match token {
            HtmlToken::Tag(tag) => {
                let tag = tag.trim();
                if tag.starts_with("</") {
                    stack.pop();
                    push_line(&mut out, base_indent + stack.len(), tag);
                } else if tag.ends_with("/>") || is_void(tag) {
                    push_line(&mut out, base_indent + stack.len(), tag);
                } else {
                    push_line(&mut out, base_indent + stack.len(), tag);
                    stack.push(open_tag_name(tag));
                }
            }
            HtmlToken::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    push_line(&mut out, base_indent + stack.len(), text);
                }
            }
        }
    }

    Ok(out)
}

fn push_line(out: &mut String, indent: usize, content: &str) {
    out.push('\n');
    for _ in 0..indent {
        out.push('\t');
    }
    out.push_str(content);
}

/// Name of an opening tag: text after `<` up to whitespace or `>`
fn open_tag_name(tag: &str) -> &str {
    let name = tag.strip_prefix('<').unwrap_or(tag);
    let end = name
        .find(|c: char| c.is_whitespace() || c == '>')
        .unwrap_or(name.len());
    &name[..end]
}

/// Void check by tag name, case-insensitive
fn is_void(tag: &str) -> bool {
    let name = tag.strip_prefix('<').unwrap_or(tag);
    let end = name
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(name.len());
    let name = &name[..end];
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

fn slice_from(s: &str, start: usize) -> InspectResult<&str> {
    s.get(start..)
        .ok_or_else(|| InspectError::Tokenize(format!("offset {} is not a character boundary", start)))
}

fn slice(s: &str, start: usize, end: usize) -> InspectResult<&str> {
    s.get(start..end).ok_or_else(|| {
        InspectError::Tokenize(format!("range {}..{} is not a character boundary", start, end))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("  <p class=\"a\">Hello  world</p> <br>").unwrap();
        assert_eq!(
            tokens,
            [
                HtmlToken::Tag("<p class=\"a\">"),
                HtmlToken::Text("Hello  world"),
                HtmlToken::Tag("</p>"),
                HtmlToken::Tag("<br>"),
            ]
        );
    }

    #[test]
    fn test_unterminated_tag_becomes_text() {
        let tokens = tokenize("<b>x</b><i").unwrap();
        assert_eq!(tokens.last(), Some(&HtmlToken::Text("<i")));
    }

    #[test]
    fn test_nesting_and_void() {
        let out = beautify_html("<div><p>Hi<br>there</p><img src=\"a.png\"/></div>", 0);
        assert_eq!(
            out,
            "\n<div>\n\t<p>\n\t\tHi\n\t\t<br>\n\t\tthere\n\t</p>\n\t<img src=\"a.png\"/>\n</div>"
        );
    }

    #[test]
    fn test_base_indent() {
        assert_eq!(beautify_html("<b>x</b>", 2), "\n\t\t<b>\n\t\t\tx\n\t\t</b>");
    }

    #[test]
    fn test_void_is_case_insensitive() {
        assert_eq!(beautify_html("<BR><Hr class=x>y", 0), "\n<BR>\n<Hr class=x>\ny");
    }

    #[test]
    fn test_blank_input_unchanged() {
        assert_eq!(beautify_html("   ", 1), "   ");
    }

    #[test]
    fn test_stray_closing_tag() {
        assert_eq!(beautify_html("</p>x", 1), "\n\t</p>\n\tx");
    }
}
