//! Tree renderer.

use std::borrow::Cow;

use crate::attrs::write_attrs;
use crate::error::RenderError;
use crate::node::{Element, Node, PropValue, format_number};
use crate::schema::{RAW_HTML_PROP, Schema, TEXTAREA_TAG};

/// Pending work on the traversal stack.
enum Task<'a> {
    /// Render a node. Component output is owned; everything else is borrowed.
    Visit(Cow<'a, Node>),
    /// Write a closing tag.
    Close(Cow<'a, str>),
}

/// Renders node trees to HTML fragments.
///
/// The walk keeps its own work stack, so arbitrarily deep trees do not grow
/// the call stack. Text content is written without escaping; callers must
/// not pass untrusted text.
///
/// # Example
///
/// ```
/// use elmark_render::{Element, Renderer, Schema};
///
/// let schema = Schema::new().with_boolean_attributes(["inert"]);
/// let renderer = Renderer::with_schema(&schema);
/// let node = Element::new("div").prop("inert", true).child("x").into();
/// assert_eq!(renderer.render(&node).unwrap(), "<div inert>x</div>");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Renderer<'s> {
    schema: &'s Schema,
}

impl Default for Renderer<'static> {
    fn default() -> Self {
        Self {
            schema: Schema::default_ref(),
        }
    }
}

impl<'s> Renderer<'s> {
    /// Create a renderer using `schema` for classification.
    #[must_use]
    pub fn with_schema(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Classification tables in use.
    #[must_use]
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Render `node` to a string.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Component`] if a component fails. No partial
    /// output is returned.
    pub fn render(&self, node: &Node) -> Result<String, RenderError> {
        let mut out = String::new();
        self.render_to(node, &mut out)?;
        Ok(out)
    }

    /// Render `node`, appending to `out`.
    ///
    /// On error `out` is left as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Component`] if a component fails.
    pub fn render_to(&self, node: &Node, out: &mut String) -> Result<(), RenderError> {
        let start = out.len();
        let result = self.walk(node, out);
        if result.is_err() {
            out.truncate(start);
        }
        result
    }

    fn walk(&self, root: &Node, out: &mut String) -> Result<(), RenderError> {
        let mut stack = vec![Task::Visit(Cow::Borrowed(root))];

        while let Some(task) = stack.pop() {
            let node = match task {
                Task::Close(tag) => {
                    close_tag(&tag, out);
                    continue;
                }
                Task::Visit(node) => node,
            };

            match &*node {
                Node::Empty => {}
                Node::Text(text) => out.push_str(text),
                Node::Number(n) => out.push_str(&format_number(*n)),
                Node::List(_) => push_children(&mut stack, node),
                Node::Element(element) => {
                    let closing = self.open_element(element, out);
                    if let Some(content) = fixed_content(element) {
                        out.push_str(&content);
                        if closing {
                            close_tag(&element.tag, out);
                        }
                    } else {
                        if closing {
                            stack.push(Task::Close(closing_tag(&node)));
                        }
                        push_children(&mut stack, node);
                    }
                }
                Node::Component(component) => {
                    let output = component.component.resolve(&component.props)?;
                    stack.push(Task::Visit(Cow::Owned(output)));
                }
            }
        }

        Ok(())
    }

    /// Write the opening tag. Returns whether a closing tag is needed.
    fn open_element(&self, element: &Element, out: &mut String) -> bool {
        out.push('<');
        out.push_str(&element.tag);
        write_attrs(&element.props, self.schema, out);
        if self.schema.is_self_closing(&element.tag) {
            out.push_str("/>");
            false
        } else {
            out.push('>');
            true
        }
    }
}

/// Render `node` with the default schema.
///
/// # Errors
///
/// Returns [`RenderError::Component`] if a component fails.
///
/// # Example
///
/// ```
/// use elmark_render::{Element, Node, render};
///
/// let node: Node = Element::new("div").prop("className", "x").child("hi").into();
/// assert_eq!(render(&node).unwrap(), r#"<div class="x">hi</div>"#);
/// ```
pub fn render(node: &Node) -> Result<String, RenderError> {
    Renderer::default().render(node)
}

/// Content that replaces the children: textarea value or raw markup.
fn fixed_content(element: &Element) -> Option<Cow<'_, str>> {
    if element.tag == TEXTAREA_TAG {
        return Some(match element.props.get("value") {
            Some(PropValue::Str(s)) => Cow::Borrowed(s.as_str()),
            Some(PropValue::Num(n)) => Cow::Owned(format_number(*n)),
            _ => Cow::Borrowed(""),
        });
    }
    match element.props.get(RAW_HTML_PROP) {
        Some(PropValue::RawHtml(html)) => Some(Cow::Borrowed(html.as_str())),
        _ => None,
    }
}

/// Tag name for a pending close, borrowed from the tree when possible.
fn closing_tag<'a>(node: &Cow<'a, Node>) -> Cow<'a, str> {
    match *node {
        Cow::Borrowed(Node::Element(el)) => Cow::Borrowed(el.tag.as_str()),
        Cow::Owned(Node::Element(ref el)) => Cow::Owned(el.tag.clone()),
        _ => Cow::Borrowed(""),
    }
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Push the children of a list or element in reverse so they pop in order.
fn push_children<'a>(stack: &mut Vec<Task<'a>>, node: Cow<'a, Node>) {
    match node {
        Cow::Borrowed(Node::List(items)) => {
            stack.extend(items.iter().rev().map(|n| Task::Visit(Cow::Borrowed(n))));
        }
        Cow::Borrowed(Node::Element(el)) => {
            stack.extend(el.children.iter().rev().map(|n| Task::Visit(Cow::Borrowed(n))));
        }
        Cow::Owned(mut node) => {
            let children = node.take_children();
            stack.extend(children.into_iter().rev().map(|n| Task::Visit(Cow::Owned(n))));
        }
        Cow::Borrowed(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::component::{Component, ComponentError, ComponentType};
    use crate::node::{Props, StyleMap};
    use crate::schema::SELF_CLOSING_TAGS;

    fn r(node: &Node) -> String {
        render(node).unwrap()
    }

    #[test]
    fn test_empty() {
        assert_eq!(r(&Node::Empty), "");
        assert_eq!(r(&Node::from(false)), "");
        assert_eq!(r(&Node::from(None::<String>)), "");
    }

    #[test]
    fn test_text_is_not_escaped() {
        assert_eq!(r(&Node::text("<b>a & b</b>")), "<b>a & b</b>");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(r(&Node::from(3)), "3");
        assert_eq!(r(&Node::from(3.5)), "3.5");
        assert_eq!(r(&Node::from(-0.25)), "-0.25");
    }

    #[test]
    fn test_list_flattening() {
        let a = Node::text("a");
        let b: Node = Element::new("b").child("x").into();
        let list = Node::list([a.clone(), b.clone()]);
        assert_eq!(r(&list), r(&a) + &r(&b));

        let nested = Node::list([
            Node::list([Node::text("1"), Node::list([Node::from(2)])]),
            Node::Empty,
            Node::text("3"),
        ]);
        assert_eq!(r(&nested), "123");
    }

    #[test]
    fn test_self_closing_tags() {
        for tag in SELF_CLOSING_TAGS {
            let html = r(&Element::new(*tag).into());
            assert_eq!(html, format!("<{tag}/>"));
            assert!(!html.contains(&format!("</{tag}>")));
        }
    }

    #[test]
    fn test_self_closing_appends_content() {
        let node = Element::new("br").child("tail").into();
        assert_eq!(r(&node), "<br/>tail");
    }

    #[test]
    fn test_img_scenario() {
        let node = Element::new("img").prop("src", "a.png").prop("alt", "").into();
        assert_eq!(r(&node), r#"<img src="a.png"/>"#);
    }

    #[test]
    fn test_div_scenario() {
        let node = Element::new("div")
            .prop("className", "x")
            .children([Node::text("hi")])
            .into();
        assert_eq!(r(&node), r#"<div class="x">hi</div>"#);
    }

    #[test]
    fn test_nested_elements() {
        let node = Element::new("ul")
            .child(Element::new("li").child("one"))
            .child(Element::new("li").prop("className", "last").child(2))
            .into();
        assert_eq!(r(&node), r#"<ul><li>one</li><li class="last">2</li></ul>"#);
    }

    #[test]
    fn test_textarea_uses_value() {
        let node = Element::new("textarea")
            .prop("value", "a < b")
            .prop("rows", 3)
            .child("ignored")
            .into();
        assert_eq!(r(&node), r#"<textarea value="a < b" rows="3">a < b</textarea>"#);
    }

    #[test]
    fn test_textarea_without_value() {
        let node = Element::new("textarea").child("ignored").into();
        assert_eq!(r(&node), "<textarea></textarea>");
        let node = Element::new("textarea").prop("value", 7).into();
        assert_eq!(r(&node), r#"<textarea value="7">7</textarea>"#);
    }

    #[test]
    fn test_raw_html() {
        let node = Element::new("div")
            .prop(
                "dangerouslySetInnerHTML",
                PropValue::RawHtml("<p>raw</p>".to_owned()),
            )
            .child("ignored")
            .into();
        assert_eq!(r(&node), "<div><p>raw</p></div>");
    }

    #[test]
    fn test_empty_raw_html_still_replaces_children() {
        let node = Element::new("div")
            .prop("dangerouslySetInnerHTML", PropValue::RawHtml(String::new()))
            .child("kids")
            .into();
        assert_eq!(r(&node), "<div></div>");
    }

    #[test]
    fn test_raw_html_prop_of_other_kind_is_ignored() {
        let node = Element::new("div")
            .prop("dangerouslySetInnerHTML", PropValue::Other)
            .child("kids")
            .into();
        assert_eq!(r(&node), "<div>kids</div>");
    }

    #[test]
    fn test_style_attribute() {
        let mut style = StyleMap::new();
        style.insert("marginTop".to_owned(), PropValue::from("4px"));
        style.insert("zIndex".to_owned(), PropValue::from(2));
        let node = Element::new("span").prop("style", style).into();
        assert_eq!(r(&node), r#"<span style="margin-top:4px;z-index:2"></span>"#);
    }

    #[test]
    fn test_component_scenario() {
        struct Fixed;
        impl Component for Fixed {
            fn render(&mut self) -> Result<Node, ComponentError> {
                Ok(Element::new("span").child("ok").into())
            }
        }
        let ok = ComponentType::new("Fixed", |_: &Props| Ok(Fixed));
        let mut props = Props::new();
        props.insert("anything".to_owned(), PropValue::from(1));
        assert_eq!(r(&Node::component(ok.clone(), props)), "<span>ok</span>");
        assert_eq!(r(&Node::component(ok, Props::new())), "<span>ok</span>");
    }

    #[test]
    fn test_component_returning_component() {
        let inner = ComponentType::function("Inner", |_: &Props| {
            Ok(Element::new("em").child("deep").into())
        });
        let outer = ComponentType::function("Outer", move |_: &Props| {
            Ok(Element::new("p")
                .child(Node::component(inner.clone(), Props::new()))
                .into())
        });
        assert_eq!(
            r(&Node::component(outer, Props::new())),
            "<p><em>deep</em></p>"
        );
    }

    #[test]
    fn test_components_are_not_memoized() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let counted = ComponentType::function("Counted", move |_: &Props| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Node::text(n.to_string()))
        });
        let node = Node::list([
            Node::component(counted.clone(), Props::new()),
            Node::component(counted, Props::new()),
        ]);
        assert_eq!(r(&node), "12");
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_component_failure_aborts_without_output() {
        let failing = ComponentType::function("Failing", |_: &Props| Err("boom".into()));
        let node = Element::new("div")
            .child("before")
            .child(Node::component(failing, Props::new()))
            .into();
        let mut out = String::from("prefix");
        let result = Renderer::default().render_to(&node, &mut out);
        assert!(matches!(result, Err(RenderError::Component { ref name, .. }) if name == "Failing"));
        assert_eq!(out, "prefix");
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut node: Node = Node::text("leaf");
        for _ in 0..100_000 {
            node = Element::new("b").child(node).into();
        }
        let html = r(&node);
        assert!(html.starts_with("<b><b>"));
        assert!(html.ends_with("</b></b>"));
        assert_eq!(html.len(), 100_000 * "<b></b>".len() + "leaf".len());
        drop(node);
    }

    #[test]
    fn test_deterministic_output() {
        let node: Node = Element::new("a")
            .prop("href", "/x?a=1&b=2")
            .prop("data-on", true)
            .child("link")
            .into();
        assert_eq!(r(&node), r(&node));
        assert_eq!(r(&node), r#"<a href="/x?a=1&amp;b=2" data-on="true">link</a>"#);
    }

    #[test]
    fn test_custom_schema_self_closing() {
        let schema = Schema::new().with_self_closing_tags(["frame"]);
        let node = Element::new("frame").prop("src", "f.html").into();
        assert_eq!(
            Renderer::with_schema(&schema).render(&node).unwrap(),
            r#"<frame src="f.html"/>"#
        );
        assert_eq!(r(&node), r#"<frame src="f.html"></frame>"#);
    }
}
