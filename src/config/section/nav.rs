//! `themeConfig.nav`: the top navigation menu.
//!
//! # Example
//!
//! ```toml
//! [themeConfig]
//! nav = [
//!   { text = "Guide", link = "/guide/" },
//!   { text = "Docs", items = [{ text = "Jangle API", link = "/docs/api/" }] },
//! ]
//! ```

use rustc_hash::FxHashSet;
use serde::Serialize;
use serde_json::{Map, Value};

use super::head::describe;
use crate::config::{ConfigDiagnostic, ConfigDiagnostics, FieldPath};

/// A direct link: label plus URL or site path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub text: String,
    pub link: String,
}

/// A dropdown: label plus its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    pub text: String,
    pub items: Vec<NavLink>,
}

/// One top-level menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavEntry {
    Link(NavLink),
    Group(NavGroup),
}

impl NavEntry {
    pub fn text(&self) -> &str {
        match self {
            Self::Link(link) => &link.text,
            Self::Group(group) => &group.text,
        }
    }

    /// Link target, `None` for groups.
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Link(link) => Some(&link.link),
            Self::Group(_) => None,
        }
    }

    /// Child links, empty for direct links.
    pub fn items(&self) -> &[NavLink] {
        match self {
            Self::Link(_) => &[],
            Self::Group(group) => &group.items,
        }
    }
}

impl NavLink {
    fn from_value(
        value: &Value,
        field: &FieldPath,
        diag: &mut ConfigDiagnostics,
    ) -> Result<Self, String> {
        let table = as_table(value)?;
        if table.contains_key("items") {
            return Err("nested groups are not supported, group items must be links".into());
        }
        warn_unknown_keys(table, field, &["text", "link"], diag);
        Ok(Self {
            text: required_str(table, "text")?,
            link: required_str(table, "link")?,
        })
    }
}

/// Parse a raw nav list, reporting every malformed or duplicated entry.
///
/// Only well-formed entries are returned.
pub fn parse_nav(values: &[Value], field: &FieldPath, diag: &mut ConfigDiagnostics) -> Vec<NavEntry> {
    let entries: Vec<_> = values
        .iter()
        .enumerate()
        .filter_map(|(i, value)| Some((i, parse_entry(value, &field.index(i), diag)?)))
        .collect();
    check_duplicates(
        entries.iter().map(|(i, entry)| (*i, entry.text())),
        field,
        diag,
    );
    entries.into_iter().map(|(_, entry)| entry).collect()
}

/// Raw entry shape, before group items are parsed.
enum Shape<'a> {
    Link(NavLink),
    Group(String, &'a [Value]),
}

fn parse_entry(value: &Value, field: &FieldPath, diag: &mut ConfigDiagnostics) -> Option<NavEntry> {
    let (text, values) = match entry_shape(value, field, diag) {
        Ok(Shape::Link(link)) => return Some(NavEntry::Link(link)),
        Ok(Shape::Group(text, values)) => (text, values),
        Err(reason) => {
            malformed(diag, field.clone(), reason);
            return None;
        }
    };

    // Item problems are reported at the item, not at the group.
    let items_field = field.key("items");
    let mut items = Vec::with_capacity(values.len());
    let mut positions = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        let item_field = items_field.index(i);
        match NavLink::from_value(value, &item_field, diag) {
            Ok(link) => {
                items.push(link);
                positions.push(i);
            }
            Err(reason) => malformed(diag, item_field, reason),
        }
    }
    check_duplicates(
        positions.iter().zip(&items).map(|(i, link)| (*i, link.text.as_str())),
        &items_field,
        diag,
    );

    if items.len() != values.len() {
        return None;
    }
    Some(NavEntry::Group(NavGroup { text, items }))
}

fn entry_shape<'a>(
    value: &'a Value,
    field: &FieldPath,
    diag: &mut ConfigDiagnostics,
) -> Result<Shape<'a>, String> {
    let table = as_table(value)?;
    warn_unknown_keys(table, field, &["text", "link", "items"], diag);
    let text = required_str(table, "text")?;

    match (table.get("link"), table.get("items")) {
        (Some(_), Some(_)) => Err("has both `link` and `items`".into()),
        (None, None) => Err(format!("\"{text}\" needs either `link` or `items`")),
        (Some(_), None) => Ok(Shape::Link(NavLink {
            text,
            link: required_str(table, "link")?,
        })),
        (None, Some(Value::Array(items))) if items.is_empty() => {
            Err(format!("group \"{text}\" has no items"))
        }
        (None, Some(Value::Array(items))) => Ok(Shape::Group(text, items)),
        (None, Some(other)) => Err(format!("`items` must be a list, found {}", describe(other))),
    }
}

fn malformed(diag: &mut ConfigDiagnostics, field: FieldPath, reason: String) {
    diag.error(ConfigDiagnostic::MalformedNavEntry { field, reason });
}

/// Report labels that repeat among siblings.
///
/// `labels` pairs each label with its position in the sibling list at
/// `field`; each repeat is reported at its own `text` field.
fn check_duplicates<'a>(
    labels: impl IntoIterator<Item = (usize, &'a str)>,
    field: &FieldPath,
    diag: &mut ConfigDiagnostics,
) {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for (i, text) in labels {
        if !seen.insert(text) {
            diag.error(ConfigDiagnostic::DuplicateNavLabel {
                field: field.index(i).key("text"),
                label: text.to_string(),
            });
        }
    }
}

fn as_table(value: &Value) -> Result<&Map<String, Value>, String> {
    value.as_object().ok_or_else(|| {
        format!(
            "expected a table with `text` and `link` or `items`, found {}",
            describe(value)
        )
    })
}

/// A trimmed, non-blank string field.
fn required_str(table: &Map<String, Value>, key: &str) -> Result<String, String> {
    match table.get(key) {
        None => Err(format!("missing `{key}`")),
        Some(Value::String(s)) if s.trim().is_empty() => Err(format!("`{key}` is empty")),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(format!("`{key}` must be a string, found {}", describe(other))),
    }
}

fn warn_unknown_keys(
    table: &Map<String, Value>,
    field: &FieldPath,
    known: &[&str],
    diag: &mut ConfigDiagnostics,
) {
    for key in table.keys().filter(|key| !known.contains(&key.as_str())) {
        diag.warn(field.key(key), "unknown nav key, ignored");
    }
}
