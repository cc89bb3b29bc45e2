//! Renderable tree model.
//!
//! A [`Node`] is one position in the tree handed to the renderer. Trees are
//! built by the caller, borrowed by the renderer, and never mutated.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::component::ComponentType;

/// Property mapping of an element or component, in insertion order.
pub type Props = IndexMap<String, PropValue>;

/// Style property mapping (`camelCase` property name to value).
pub type StyleMap = IndexMap<String, PropValue>;

/// A node of the renderable tree.
#[derive(Clone, Debug, Default)]
pub enum Node {
    /// Renders to nothing (null, undefined, `false` and `true`).
    #[default]
    Empty,
    /// Text rendered verbatim, without entity escaping.
    Text(String),
    /// Number rendered in canonical base-10 form.
    Number(f64),
    /// Nodes rendered one after another without separators.
    List(Vec<Node>),
    /// Native markup element.
    Element(Element),
    /// Composite node resolved to exactly one further node.
    Component(ComponentNode),
}

/// A native markup element.
#[derive(Clone, Debug, Default)]
pub struct Element {
    /// Tag name, emitted as given.
    pub tag: String,
    /// Properties serialized as attributes.
    pub props: Props,
    /// Child nodes.
    pub children: Vec<Node>,
}

/// A component occurrence: a component type plus the props it is built with.
#[derive(Clone, Debug)]
pub struct ComponentNode {
    /// Factory and display name.
    pub component: ComponentType,
    /// Props passed to the factory.
    pub props: Props,
}

/// Value of a single property.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PropValue {
    /// Explicit null or undefined.
    #[default]
    Null,
    /// String value.
    Str(String),
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Num(f64),
    /// Inline style mapping, only meaningful under the `style` key.
    Style(StyleMap),
    /// Pre-rendered markup, only meaningful under `dangerouslySetInnerHTML`.
    RawHtml(String),
    /// Anything else (callbacks, arrays, arbitrary objects). Never serialized.
    Other,
}

impl PropValue {
    /// Whether the value is falsy under HTML-attribute rules.
    ///
    /// `""`, `false`, `0`, `NaN` and `Null` are falsy. Maps, raw markup and
    /// opaque values are truthy.
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => s.is_empty(),
            Self::Bool(b) => !b,
            Self::Num(n) => *n == 0.0 || n.is_nan(),
            Self::Style(_) | Self::RawHtml(_) | Self::Other => false,
        }
    }

    /// Whether the value is a primitive (string, boolean or number).
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Str(_) | Self::Bool(_) | Self::Num(_))
    }

    /// String form of a primitive value, `None` for everything else.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Str(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Num(n) => Some(Cow::Owned(format_number(*n))),
            Self::Null | Self::Style(_) | Self::RawHtml(_) | Self::Other => None,
        }
    }
}

/// Format a number the way the markup consumers expect it.
///
/// Integral values have no decimal point, negative zero is `0`, and the
/// non-finite values are spelled `NaN`, `Infinity` and `-Infinity`.
///
/// ```
/// use elmark_render::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(3.5), "3.5");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        n.to_string()
    }
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create a list node.
    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Node>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Create a component node.
    #[must_use]
    pub fn component(component: ComponentType, props: Props) -> Self {
        Self::Component(ComponentNode { component, props })
    }
}

impl Node {
    /// Detach the direct children of a list or element.
    pub(crate) fn take_children(&mut self) -> Vec<Node> {
        match self {
            Self::List(items) => std::mem::take(items),
            Self::Element(element) => std::mem::take(&mut element.children),
            _ => Vec::new(),
        }
    }
}

// Deep trees are torn down through a heap stack instead of the call stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = self.take_children();
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.take_children());
        }
    }
}

impl Element {
    /// Create an element without props or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// Append a property. A repeated key replaces the earlier value in place.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several child nodes.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for Node {
    fn from(_: bool) -> Self {
        Self::Empty
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::List(items)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        Self::Num(f64::from(n))
    }
}

impl From<StyleMap> for PropValue {
    fn from(style: StyleMap) -> Self {
        Self::Style(style)
    }
}
