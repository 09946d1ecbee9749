//! JSON re-indentation
//!
//! Single forward scan over the raw text. It does not parse: the only state
//! is whether we are inside a string, whether the previous character was a
//! backslash, and the current depth. Formatting inside strings is copied
//! verbatim.

use tracing::debug;

use crate::clipboard::error::{InspectError, InspectResult};

const INDENT: &str = "  ";

/// Re-indent JSON text
///
/// Returns the input unchanged if the scan fails (a closing bracket with no
/// matching opener).
pub fn pretty_print(json: &str) -> String {
    match try_pretty_print(json) {
        Ok(pretty) => pretty,
        Err(e) => {
            debug!("JSON pretty-print skipped: {}", e);
            json.to_string()
        }
    }
}

fn try_pretty_print(json: &str) -> InspectResult<String> {
    let mut out = String::with_capacity(json.len() * 2);
    let mut in_quotes = false;
    let mut escaped = false;
    let mut depth: usize = 0;

    for (pos, ch) in json.char_indices() {
        if in_quotes {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quotes = false;
            }
            continue;
        }

        match ch {
            c if c.is_whitespace() => {}
            '"' => {
                in_quotes = true;
                out.push(ch);
            }
            '{' | '[' => {
                out.push(ch);
                out.push('\n');
                depth += 1;
                push_indent(&mut out, depth);
            }
            '}' | ']' => {
                out.push('\n');
                depth = depth.checked_sub(1).ok_or_else(|| {
                    InspectError::Unbalanced(format!("'{}' at byte {} has no opener", ch, pos))
                })?;
                push_indent(&mut out, depth);
                out.push(ch);
            }
            ',' => {
                out.push(ch);
                out.push('\n');
                push_indent(&mut out, depth);
            }
            ':' => {
                out.push(ch);
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_object() {
        assert_eq!(
            pretty_print(r#"{"a":1,"b":[true,null]}"#),
            "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn test_drops_whitespace_outside_strings() {
        assert_eq!(pretty_print("{ \"a\" :\n 1 }"), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_strings_copied_verbatim() {
        let input = r#"{"k":"a, {b}: [c] \"q\" \\"}"#;
        assert_eq!(
            pretty_print(input),
            "{\n  \"k\": \"a, {b}: [c] \\\"q\\\" \\\\\"\n}"
        );
    }

    #[test]
    fn test_unbalanced_returns_original() {
        let input = "{\"a\":1}}";
        assert_eq!(pretty_print(input), input);
        assert!(try_pretty_print("]").is_err());
    }
}
