//! Config field paths.

use owo_colors::OwoColorize;
use std::fmt;

/// Path to a config field, as the user wrote it.
///
/// Segments are joined with `.`, list positions with `[n]`:
///
/// ```ignore
/// let path = FieldPath::new("themeConfig").key("nav").index(1).key("text");
/// assert_eq!(path.as_str(), "themeConfig.nav[1].text");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of a named child field.
    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    /// Path of a list element.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format!("`{}`", self.0).bright_blue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_path() {
        let path = FieldPath::new("themeConfig")
            .key("nav")
            .index(1)
            .key("items")
            .index(0);
        assert_eq!(path.as_str(), "themeConfig.nav[1].items[0]");
    }

    #[test]
    fn test_display_quotes_path() {
        let shown = FieldPath::new("themeConfig.docsRepo").to_string();
        assert!(shown.contains("`themeConfig.docsRepo`"));
    }

    #[test]
    fn test_key_on_empty_root() {
        assert_eq!(FieldPath::default().key("title").as_str(), "title");
        assert_eq!(FieldPath::new("head").index(2).as_str(), "head[2]");
    }
}
