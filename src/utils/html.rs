//! HTML helpers for rendering head tags.

use std::borrow::Cow;

/// Characters that require escaping inside a quoted attribute value.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape an attribute value for use inside double quotes.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape_attr("a\"b"), "a&quot;b");
/// assert_eq!(escape_attr("stylesheet"), "stylesheet"); // No allocation
/// ```
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Make raw text safe to place inside `<style>` or `<script>`.
///
/// Raw text is not entity-decoded by browsers, so the only thing to guard
/// against is an early end tag: every `</` becomes `<\/`.
pub fn escape_raw_text(s: &str) -> Cow<'_, str> {
    if s.contains("</") {
        Cow::Owned(s.replace("</", "<\\/"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Check if `name` can be written as an HTML attribute name.
pub fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '<' | '/' | '=')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("stylesheet"), "stylesheet");
        assert!(matches!(escape_attr("stylesheet"), Cow::Borrowed(_)));
        assert_eq!(
            escape_attr(r#"a"b<c>&'d"#),
            "a&quot;b&lt;c&gt;&amp;&#39;d"
        );
    }

    #[test]
    fn test_escape_attr_keeps_query_strings_readable() {
        assert_eq!(
            escape_attr("https://fonts.googleapis.com/css?family=A:300|B&display=swap"),
            "https://fonts.googleapis.com/css?family=A:300|B&amp;display=swap"
        );
    }

    #[test]
    fn test_escape_raw_text() {
        assert_eq!(escape_raw_text("body { color: red; }"), "body { color: red; }");
        assert_eq!(
            escape_raw_text("a</style><script>"),
            "a<\\/style><script>"
        );
    }

    #[test]
    fn test_attr_names() {
        assert!(is_valid_attr_name("rel"));
        assert!(is_valid_attr_name("data-theme"));
        assert!(is_valid_attr_name("crossorigin"));
        assert!(!is_valid_attr_name(""));
        assert!(!is_valid_attr_name("on click"));
        assert!(!is_valid_attr_name("a=b"));
        assert!(!is_valid_attr_name("\"x"));
    }
}
