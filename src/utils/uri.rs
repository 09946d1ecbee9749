//! Absolute URI checks
//!
//! Link and JSON decoding only need to know whether a string is an absolute
//! URI and what its scheme is, so this is a syntactic check (RFC 3986
//! scheme, then a non-empty, whitespace-free remainder), not a full parser.

/// Scheme of `text` if it is an absolute URI
///
/// Single-letter schemes are rejected so Windows drive paths (`C:\x`) do
/// not pass. Schemes followed by `//` must name an authority.
pub fn absolute_uri_scheme(text: &str) -> Option<&str> {
    let text = text.trim();
    let colon = text.find(':')?;
    let (scheme, rest) = (&text[..colon], &text[colon + 1..]);

    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic()
        || scheme.len() < 2
        || !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return None;
    }

    if rest.is_empty() || rest.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }

    if let Some(hier) = rest.strip_prefix("//") {
        let authority = hier.split(['/', '?', '#']).next().unwrap_or("");
        if authority.is_empty() && !scheme.eq_ignore_ascii_case("file") {
            return None;
        }
    } else if is_web_scheme(scheme) {
        return None;
    }

    Some(scheme)
}

/// Whether `text` parses as an absolute URI of any scheme
pub fn is_absolute_uri(text: &str) -> bool {
    absolute_uri_scheme(text).is_some()
}

/// Whether `text` is an absolute `http` or `https` URI
pub fn is_web_url(text: &str) -> bool {
    absolute_uri_scheme(text).is_some_and(is_web_scheme)
}

fn is_web_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_urls() {
        assert!(is_web_url("https://example.com/x"));
        assert!(is_web_url("HTTP://example.com"));
        assert!(is_web_url("https://example.com:8080/a?b=c#d"));
        assert!(!is_web_url("https://"));
        assert!(!is_web_url("https:example.com"));
        assert!(!is_web_url("ftp://example.com"));
        assert!(!is_web_url("hello"));
        assert!(!is_web_url("https://exa mple.com"));
    }

    #[test]
    fn test_other_absolute_uris() {
        assert_eq!(absolute_uri_scheme("mailto:someone@example.com"), Some("mailto"));
        assert_eq!(absolute_uri_scheme("file:///C:/temp/a.txt"), Some("file"));
        assert!(is_absolute_uri("urn:isbn:0451450523"));
        assert!(!is_absolute_uri("C:\\Windows"));
        assert!(!is_absolute_uri("/relative/path"));
        assert!(!is_absolute_uri("1abc:def"));
        assert!(!is_absolute_uri("name: value"));
    }
}
