//! Component instantiation.
//!
//! A component is resolved in a single pass: one instance is built from its
//! props, the optional [`Component::pre_render`] hook runs once, and
//! [`Component::render`] is called once to obtain the output node. No other
//! lifecycle exists.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{LifecycleStage, RenderError};
use crate::node::{Node, Props};

/// Error returned by component code.
pub type ComponentError = Box<dyn std::error::Error + Send + Sync>;

/// A stateful component instance.
///
/// # Example
///
/// ```
/// use elmark_render::{Component, ComponentError, ComponentType, Element, Node, Props, render};
///
/// struct Greeting {
///     name: String,
/// }
///
/// impl Component for Greeting {
///     fn render(&mut self) -> Result<Node, ComponentError> {
///         Ok(Element::new("p").child(format!("Hello, {}", self.name)).into())
///     }
/// }
///
/// let greeting = ComponentType::new("Greeting", |props: &Props| {
///     let name = props.get("name").and_then(|v| v.as_text()).unwrap_or_default();
///     Ok(Greeting { name: name.into_owned() })
/// });
///
/// let mut props = Props::new();
/// props.insert("name".to_owned(), "Ada".into());
/// let html = render(&Node::component(greeting, props)).unwrap();
/// assert_eq!(html, "<p>Hello, Ada</p>");
/// ```
pub trait Component {
    /// Hook invoked once before [`render`](Self::render).
    fn pre_render(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Produce the output node.
    fn render(&mut self) -> Result<Node, ComponentError>;
}

type Factory = dyn Fn(&Props) -> Result<Box<dyn Component>, ComponentError> + Send + Sync;
type RenderFn = dyn Fn(&Props) -> Result<Node, ComponentError> + Send + Sync;

#[derive(Clone)]
enum Kind {
    Instance(Arc<Factory>),
    Function(Arc<RenderFn>),
}

/// A component type: a display name plus the code that builds its output.
#[derive(Clone)]
pub struct ComponentType {
    name: Cow<'static, str>,
    kind: Kind,
}

impl ComponentType {
    /// Create a component type from a constructor.
    pub fn new<F, C>(name: impl Into<Cow<'static, str>>, make: F) -> Self
    where
        F: Fn(&Props) -> Result<C, ComponentError> + Send + Sync + 'static,
        C: Component + 'static,
    {
        let factory = move |props: &Props| -> Result<Box<dyn Component>, ComponentError> {
            Ok(Box::new(make(props)?))
        };
        Self {
            name: name.into(),
            kind: Kind::Instance(Arc::new(factory)),
        }
    }

    /// Create a function component, called once per occurrence with no hook.
    pub fn function<F>(name: impl Into<Cow<'static, str>>, render: F) -> Self
    where
        F: Fn(&Props) -> Result<Node, ComponentError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: Kind::Function(Arc::new(render)),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build one instance for `props` and return its output node.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Component`] when construction, the pre-render
    /// hook or the render call fails.
    pub fn resolve(&self, props: &Props) -> Result<Node, RenderError> {
        tracing::trace!(component = %self.name, "Resolving component");

        match &self.kind {
            Kind::Instance(make) => {
                let mut instance = make(props).map_err(|e| self.fail(LifecycleStage::Construct, e))?;
                instance
                    .pre_render()
                    .map_err(|e| self.fail(LifecycleStage::PreRender, e))?;
                instance
                    .render()
                    .map_err(|e| self.fail(LifecycleStage::Render, e))
            }
            Kind::Function(render) => {
                render(props).map_err(|e| self.fail(LifecycleStage::Render, e))
            }
        }
    }

    fn fail(&self, stage: LifecycleStage, source: ComponentError) -> RenderError {
        tracing::debug!(component = %self.name, %stage, error = %source, "Component failed");
        RenderError::Component {
            name: self.name.to_string(),
            stage,
            source,
        }
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            Kind::Instance(_) => "instance",
            Kind::Function(_) => "function",
        };
        f.debug_struct("ComponentType")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::node::{Element, PropValue};

    struct Recorder {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Component for Recorder {
        fn pre_render(&mut self) -> Result<(), ComponentError> {
            self.log.lock().unwrap().push("pre_render");
            Ok(())
        }

        fn render(&mut self) -> Result<Node, ComponentError> {
            self.log.lock().unwrap().push("render");
            Ok(Element::new("span").child("ok").into())
        }
    }

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>) -> ComponentType {
        let log = Arc::clone(log);
        ComponentType::new("Recorder", move |_: &Props| {
            log.lock().unwrap().push("construct");
            Ok(Recorder {
                log: Arc::clone(&log),
            })
        })
    }

    #[test]
    fn test_lifecycle_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let node = recorder(&log).resolve(&Props::new()).unwrap();
        assert!(matches!(node, Node::Element(ref el) if el.tag == "span"));
        assert_eq!(*log.lock().unwrap(), ["construct", "pre_render", "render"]);
    }

    #[test]
    fn test_function_component_receives_props() {
        let echo = ComponentType::function("Echo", |props: &Props| {
            Ok(props
                .get("text")
                .and_then(PropValue::as_text)
                .map_or(Node::Empty, |t| Node::text(t)))
        });
        let mut props = Props::new();
        props.insert("text".to_owned(), PropValue::from("hi"));
        assert!(matches!(echo.resolve(&props).unwrap(), Node::Text(ref t) if t == "hi"));
    }

    #[test]
    fn test_constructor_failure() {
        struct Never;
        impl Component for Never {
            fn render(&mut self) -> Result<Node, ComponentError> {
                Ok(Node::Empty)
            }
        }
        let broken = ComponentType::new("Broken", |_: &Props| -> Result<Never, ComponentError> {
            Err("missing prop".into())
        });
        let err = broken.resolve(&Props::new()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Component {
                stage: LifecycleStage::Construct,
                ..
            }
        ));
        assert_eq!(err.to_string(), "component `Broken` failed during construction");
    }

    #[test]
    fn test_pre_render_failure_skips_render() {
        struct Failing {
            rendered: Arc<Mutex<bool>>,
        }
        impl Component for Failing {
            fn pre_render(&mut self) -> Result<(), ComponentError> {
                Err("not ready".into())
            }
            fn render(&mut self) -> Result<Node, ComponentError> {
                *self.rendered.lock().unwrap() = true;
                Ok(Node::Empty)
            }
        }
        let rendered = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&rendered);
        let failing = ComponentType::new("Failing", move |_: &Props| {
            Ok(Failing {
                rendered: Arc::clone(&flag),
            })
        });
        let err = failing.resolve(&Props::new()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Component {
                stage: LifecycleStage::PreRender,
                ..
            }
        ));
        assert!(!*rendered.lock().unwrap());
    }

    #[test]
    fn test_debug_output() {
        let c = ComponentType::function("Label", |_: &Props| Ok(Node::Empty));
        assert_eq!(
            format!("{c:?}"),
            r#"ComponentType { name: "Label", kind: "function" }"#
        );
    }
}
