//! `head` directives: tags injected into every page's `<head>`.
//!
//! # Example
//!
//! ```toml
//! head = [
//!   ["link", { rel = "stylesheet", href = "https://fonts.googleapis.com/css" }],
//!   ["link", { rel = "icon", href = "/favicon.png" }],
//!   ["style", { type = "text/css" }, "body { font-family: sans-serif; }"],
//!   # table form is accepted too
//!   { tag = "link", attrs = { rel = "preconnect", href = "https://fonts.gstatic.com" } },
//! ]
//! ```

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::config::{ConfigDiagnostic, ConfigDiagnostics, FieldPath};
use crate::utils::html::{escape_attr, escape_raw_text, is_valid_attr_name};

/// Attribute list in declaration order.
pub type Attributes = Vec<(String, String)>;

/// A tag to inject into the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadDirective {
    /// `<link ...>`, e.g. a stylesheet or a favicon.
    Link { attrs: Attributes },
    /// `<style ...>body</style>`, an inline style block.
    Style { attrs: Attributes, body: String },
}

impl HeadDirective {
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Link { .. } => "link",
            Self::Style { .. } => "style",
        }
    }

    pub fn attrs(&self) -> &[(String, String)] {
        match self {
            Self::Link { attrs } | Self::Style { attrs, .. } => attrs,
        }
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs()
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Link { .. } => None,
            Self::Style { body, .. } => Some(body),
        }
    }

    /// Render as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut html = format!("<{}", self.tag());
        for (name, value) in self.attrs() {
            html.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
        }
        html.push('>');

        if let Self::Style { body, .. } = self {
            html.push_str(&escape_raw_text(body));
            html.push_str("</style>");
        }
        html
    }

    /// Parse one raw `head` entry.
    ///
    /// Accepts `[tag, attrs]`, `[tag, attrs, body]` or
    /// `{ tag, attrs, body }`. Errors are human-readable reasons.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let (tag, attrs, body) = match value {
            Value::Array(parts) => split_tuple(parts)?,
            Value::Object(table) => {
                if let Some(key) = table
                    .keys()
                    .find(|key| !matches!(key.as_str(), "tag" | "attrs" | "body"))
                {
                    return Err(format!("unknown key `{key}`"));
                }
                let tag = table.get("tag").ok_or("missing `tag`")?;
                (tag, table.get("attrs"), table.get("body"))
            }
            other => {
                return Err(format!(
                    "expected [tag, attributes, body?], found {}",
                    describe(other)
                ));
            }
        };

        let tag = tag
            .as_str()
            .ok_or_else(|| format!("tag must be a string, found {}", describe(tag)))?;
        let attrs = parse_attrs(attrs)?;
        let body = match body {
            None | Some(Value::Null) => None,
            Some(Value::String(body)) => Some(body.clone()),
            Some(other) => {
                return Err(format!("body must be a string, found {}", describe(other)));
            }
        };

        match tag {
            "link" => {
                if body.is_some() {
                    return Err("`link` tags cannot have a body".into());
                }
                if !attrs.iter().any(|(name, _)| name == "href") {
                    return Err("`link` tags need an `href` attribute".into());
                }
                Ok(Self::Link { attrs })
            }
            "style" => Ok(Self::Style {
                attrs,
                body: body.unwrap_or_default(),
            }),
            other => Err(format!(
                "unsupported tag \"{other}\", expected \"link\" or \"style\""
            )),
        }
    }
}

/// Parse the raw `head` list, reporting every malformed directive.
///
/// Only well-formed directives are returned, in declaration order.
pub fn parse_head(
    value: &Value,
    field: &FieldPath,
    diag: &mut ConfigDiagnostics,
) -> Vec<HeadDirective> {
    let Some(values) = value.as_array() else {
        diag.error(ConfigDiagnostic::MalformedHeadDirective {
            field: field.clone(),
            reason: format!("expected a list of directives, found {}", describe(value)),
        });
        return Vec::new();
    };

    values
        .iter()
        .enumerate()
        .filter_map(|(i, value)| match HeadDirective::from_value(value) {
            Ok(directive) => Some(directive),
            Err(reason) => {
                diag.error(ConfigDiagnostic::MalformedHeadDirective {
                    field: field.index(i),
                    reason,
                });
                None
            }
        })
        .collect()
}

type TupleParts<'a> = (&'a Value, Option<&'a Value>, Option<&'a Value>);

fn split_tuple(parts: &[Value]) -> Result<TupleParts<'_>, String> {
    match parts {
        [tag] => Ok((tag, None, None)),
        [tag, attrs] => Ok((tag, Some(attrs), None)),
        [tag, attrs, body] => Ok((tag, Some(attrs), Some(body))),
        [] => Err("empty directive".into()),
        _ => Err(format!(
            "expected at most 3 elements [tag, attributes, body], found {}",
            parts.len()
        )),
    }
}

fn parse_attrs(value: Option<&Value>) -> Result<Attributes, String> {
    let table = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(table)) => table,
        Some(other) => {
            return Err(format!(
                "attributes must be a table, found {}",
                describe(other)
            ));
        }
    };

    table
        .iter()
        .map(|(name, value)| {
            if !is_valid_attr_name(name) {
                return Err(format!("invalid attribute name \"{name}\""));
            }
            match value {
                Value::String(value) => Ok((name.clone(), value.clone())),
                other => Err(format!(
                    "attribute `{name}` must be a string, found {}",
                    describe(other)
                )),
            }
        })
        .collect()
}

/// Short name of a JSON value kind, for error messages.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}

/// Serialized in the tuple form, `[tag, attrs]` or `[tag, attrs, body]`.
impl Serialize for HeadDirective {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = self.body();
        let mut seq = serializer.serialize_seq(Some(if body.is_some() { 3 } else { 2 }))?;
        seq.serialize_element(self.tag())?;
        seq.serialize_element(&AttrMap(self.attrs()))?;
        if let Some(body) = body {
            seq.serialize_element(body)?;
        }
        seq.end()
    }
}

struct AttrMap<'a>(&'a [(String, String)]);

impl Serialize for AttrMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FONTS: &str = "https://fonts.googleapis.com/css?family=Source+Code+Pro:300,600|Source+Sans+Pro:300,300i,600,600i";

    #[test]
    fn test_link_tuple() {
        let directive =
            HeadDirective::from_value(&json!(["link", { "rel": "stylesheet", "href": FONTS }]))
                .unwrap();
        assert_eq!(directive.tag(), "link");
        assert_eq!(directive.attr("rel"), Some("stylesheet"));
        assert_eq!(directive.attr("href"), Some(FONTS));
        assert_eq!(directive.body(), None);
    }

    #[test]
    fn test_style_tuple_with_body() {
        let directive = HeadDirective::from_value(&json!([
            "style",
            { "type": "text/css" },
            "\n  body { font-family: \"Source Sans Pro\", sans-serif !important; }\n"
        ]))
        .unwrap();
        assert_eq!(directive.tag(), "style");
        assert!(directive.body().unwrap().contains("Source Sans Pro"));
    }

    #[test]
    fn test_style_without_body() {
        let directive = HeadDirective::from_value(&json!(["style", {}])).unwrap();
        assert_eq!(
            directive,
            HeadDirective::Style {
                attrs: Vec::new(),
                body: String::new()
            }
        );
    }

    #[test]
    fn test_table_form() {
        let directive = HeadDirective::from_value(&json!({
            "tag": "link",
            "attrs": { "rel": "icon", "href": "/favicon.png" }
        }))
        .unwrap();
        assert_eq!(directive.attr("rel"), Some("icon"));
    }

    #[test]
    fn test_attribute_order_preserved() {
        let directive = HeadDirective::from_value(&json!([
            "link",
            { "rel": "preload", "href": "/font.woff2", "as": "font", "crossorigin": "" }
        ]))
        .unwrap();
        let names: Vec<_> = directive.attrs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["rel", "href", "as", "crossorigin"]);
    }

    #[test]
    fn test_rejected_shapes() {
        let cases = [
            (json!("link"), "expected [tag, attributes, body?]"),
            (json!([]), "empty directive"),
            (json!([42, {}]), "tag must be a string"),
            (json!(["script", { "src": "/a.js" }]), "unsupported tag \"script\""),
            (json!(["link", "rel=icon"]), "attributes must be a table"),
            (json!(["link", { "rel": "icon" }]), "need an `href`"),
            (json!(["link", { "href": "/a.css" }, "body"]), "cannot have a body"),
            (json!(["style", {}, "a", "b"]), "at most 3 elements"),
            (json!(["style", {}, 1]), "body must be a string"),
            (json!(["link", { "href": "/a", "async": true }]), "`async` must be a string"),
            (json!(["link", { "href": "/a", "on click": "x" }]), "invalid attribute name"),
            (json!({ "tag": "link", "href": "/a" }), "unknown key `href`"),
            (json!({ "attrs": {} }), "missing `tag`"),
        ];

        for (value, expected) in cases {
            let err = HeadDirective::from_value(&value).unwrap_err();
            assert!(
                err.contains(expected),
                "{value}: expected {expected:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_head_reports_each_bad_entry() {
        let mut diag = ConfigDiagnostics::new();
        let head = parse_head(
            &json!([
                ["link", { "rel": "icon", "href": "/favicon.png" }],
                ["meta", { "name": "x" }],
                ["style", {}, "a {}"],
                "oops"
            ]),
            &FieldPath::new("head"),
            &mut diag,
        );

        assert_eq!(head.len(), 2);
        assert_eq!(head[0].tag(), "link");
        assert_eq!(head[1].tag(), "style");
        let fields: Vec<_> = diag.errors().iter().map(|d| d.field().as_str()).collect();
        assert_eq!(fields, ["head[1]", "head[3]"]);
    }

    #[test]
    fn test_parse_head_not_a_list() {
        let mut diag = ConfigDiagnostics::new();
        let head = parse_head(&json!({ "link": {} }), &FieldPath::new("head"), &mut diag);
        assert!(head.is_empty());
        assert!(matches!(
            &diag.errors()[0],
            ConfigDiagnostic::MalformedHeadDirective { field, .. } if field.as_str() == "head"
        ));
    }

    #[test]
    fn test_to_html() {
        let link = HeadDirective::Link {
            attrs: vec![
                ("rel".into(), "stylesheet".into()),
                ("href".into(), "/a.css?x=1&y=2".into()),
            ],
        };
        assert_eq!(
            link.to_html(),
            r#"<link rel="stylesheet" href="/a.css?x=1&amp;y=2">"#
        );

        let style = HeadDirective::Style {
            attrs: vec![("type".into(), "text/css".into())],
            body: "body { color: red; }".into(),
        };
        assert_eq!(
            style.to_html(),
            r#"<style type="text/css">body { color: red; }</style>"#
        );
    }

    #[test]
    fn test_serialize_tuple_form() {
        let style = HeadDirective::Style {
            attrs: vec![("type".into(), "text/css".into())],
            body: "b {}".into(),
        };
        assert_eq!(
            serde_json::to_value(&style).unwrap(),
            json!(["style", { "type": "text/css" }, "b {}"])
        );

        let link = HeadDirective::Link {
            attrs: vec![("href".into(), "/x".into())],
        };
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value, json!(["link", { "href": "/x" }]));
        assert_eq!(HeadDirective::from_value(&value).unwrap(), link);
    }
}
