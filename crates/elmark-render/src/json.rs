//! Node trees from JSON.
//!
//! Lets trees be produced outside Rust. The mapping follows the element
//! object convention of the UI layer:
//!
//! - `null`, `true`, `false` → [`Node::Empty`]
//! - strings and numbers → text and number nodes
//! - arrays → [`Node::List`]
//! - `{"tag": ..., "props": {...}, "children": ...}` → [`Node::Element`]
//! - any other object → [`Node::Empty`]
//!
//! Prop values map to [`PropValue`]; an object holding only a string `__html`
//! key is raw markup, other objects are style maps and arrays are opaque.
//! Key order is preserved.
//!
//! Components cannot be expressed in JSON.

use serde_json::{Map, Value};

use crate::node::{Element, Node, PropValue, Props};

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(_) => Self::Empty,
            Value::String(s) => Self::Text(s),
            Value::Number(n) => n.as_f64().map_or(Self::Empty, Self::Number),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => element_from_object(map).map_or(Self::Empty, Self::Element),
        }
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Other, Self::Num),
            Value::String(s) => Self::Str(s),
            Value::Array(_) => Self::Other,
            Value::Object(map) => {
                if map.len() == 1
                    && let Some(Value::String(html)) = map.get("__html")
                {
                    return Self::RawHtml(html.clone());
                }
                Self::Style(props_from_object(map))
            }
        }
    }
}

/// Parse a JSON document into a node tree.
///
/// # Errors
///
/// Returns an error if `json` is not valid JSON.
///
/// # Example
///
/// ```
/// use elmark_render::{node_from_json, render};
///
/// let node = node_from_json(r#"{"tag": "p", "props": {"className": "lead"}, "children": ["Hi"]}"#).unwrap();
/// assert_eq!(render(&node).unwrap(), r#"<p class="lead">Hi</p>"#);
/// ```
pub fn node_from_json(json: &str) -> Result<Node, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    Ok(Node::from(value))
}

fn element_from_object(mut map: Map<String, Value>) -> Option<Element> {
    let Some(Value::String(tag)) = map.remove("tag") else {
        return None;
    };

    let mut raw_props = match map.remove("props") {
        Some(Value::Object(props)) => props,
        _ => Map::new(),
    };
    let prop_children = raw_props.shift_remove("children");
    let props = props_from_object(raw_props);

    let children = map
        .remove("children")
        .or(prop_children)
        .map(children_from_value)
        .unwrap_or_default();

    Some(Element {
        tag,
        props,
        children,
    })
}

fn children_from_value(value: Value) -> Vec<Node> {
    match value {
        Value::Array(items) => items.into_iter().map(Node::from).collect(),
        other => vec![Node::from(other)],
    }
}

fn props_from_object(map: Map<String, Value>) -> Props {
    map.into_iter()
        .map(|(key, value)| (key, PropValue::from(value)))
        .collect()
}
