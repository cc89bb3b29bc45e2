//! Attribute serialization.

use std::borrow::Cow;

use crate::node::{PropValue, Props};
use crate::schema::{Schema, attribute_name};
use crate::style::style_value;

/// Props consumed by the renderer and never written as attributes.
const IGNORED_PROPS: [&str; 2] = ["key", "children"];

/// Serialize props into an attribute string using the default schema.
///
/// Each emitted attribute is preceded by a single space; the result is empty
/// when nothing is emitted.
///
/// ```
/// use elmark_render::{Props, PropValue, render_attrs};
///
/// let mut props = Props::new();
/// props.insert("className".to_owned(), PropValue::from("x"));
/// props.insert("disabled".to_owned(), PropValue::from(true));
/// assert_eq!(render_attrs(&props), r#" class="x" disabled"#);
/// ```
#[must_use]
pub fn render_attrs(props: &Props) -> String {
    render_attrs_with(props, Schema::default_ref())
}

/// Serialize props into an attribute string using `schema`.
#[must_use]
pub fn render_attrs_with(props: &Props, schema: &Schema) -> String {
    let mut out = String::new();
    write_attrs(props, schema, &mut out);
    out
}

/// Append the attribute string for `props` to `out`.
pub(crate) fn write_attrs(props: &Props, schema: &Schema, out: &mut String) {
    for (key, value) in props {
        if IGNORED_PROPS.contains(&key.as_str()) {
            continue;
        }

        let value: Cow<'_, PropValue> = if key == "style" {
            Cow::Owned(style_value(value))
        } else {
            Cow::Borrowed(value)
        };

        let class = schema.classify(key, matches!(*value, PropValue::Bool(_)));

        if (value.is_falsy() && !class.renders_as_is()) || !value.is_primitive() {
            continue;
        }

        let with_value = match *value {
            // Presence semantics: `true` is the bare name, `false` is absent.
            PropValue::Bool(b) if class.boolean && !class.prefixed_boolean => {
                if !b {
                    continue;
                }
                false
            }
            PropValue::Bool(_) => class.prefixed_boolean || class.enumerated,
            _ => true,
        };

        out.push(' ');
        out.push_str(attribute_name(key));

        if with_value {
            out.push_str("=\"");
            match &*value {
                PropValue::Str(s) => out.push_str(&escape_attr(s)),
                other => {
                    if let Some(text) = other.as_text() {
                        out.push_str(&text);
                    }
                }
            }
            out.push('"');
        }
    }
}

/// Escape an attribute value for a double-quoted attribute.
///
/// Only `&` and `"` are replaced.
///
/// ```
/// use elmark_render::escape_attr;
///
/// assert_eq!(escape_attr(r#"a "b" & c"#), "a &quot;b&quot; &amp; c");
/// ```
#[must_use]
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
