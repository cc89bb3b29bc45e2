//! Element tree to HTML renderer.
//!
//! This crate turns an immutable UI element tree ([`Node`]) into an HTML
//! fragment. Output is fully determined by the tree and the classification
//! tables in [`Schema`], so equal trees always render to identical strings.
//!
//! # Architecture
//!
//! - [`Renderer`] walks the tree with an explicit work stack
//! - [`render_attrs`] classifies and serializes element props
//! - [`render_style`] flattens style maps into inline style values
//! - [`ComponentType`] resolves composite nodes in a single pass
//!
//! # Escaping
//!
//! Attribute values have `&` and `"` escaped. Text content and raw markup
//! are written verbatim; sanitizing untrusted text is the caller's job.
//!
//! # Example
//!
//! ```
//! use elmark_render::{Element, Node, render};
//!
//! let node: Node = Element::new("label")
//!     .prop("htmlFor", "name")
//!     .child("Name")
//!     .child(Element::new("input").prop("id", "name").prop("required", true))
//!     .into();
//!
//! assert_eq!(
//!     render(&node).unwrap(),
//!     r#"<label for="name">Name<input id="name" required/></label>"#
//! );
//! ```

mod attrs;
mod component;
mod error;
#[cfg(feature = "json")]
mod json;
mod node;
mod renderer;
mod schema;
mod style;

pub use attrs::{escape_attr, render_attrs, render_attrs_with};
pub use component::{Component, ComponentError, ComponentType};
pub use error::{LifecycleStage, RenderError};
#[cfg(feature = "json")]
pub use json::node_from_json;
pub use node::{ComponentNode, Element, Node, PropValue, Props, StyleMap, format_number};
pub use renderer::{Renderer, render};
pub use schema::{
    AttrClass, BOOLEAN_ATTRIBUTES, ENUMERATED_ATTRIBUTES, PASS_THROUGH_ATTRIBUTES,
    SELF_CLOSING_TAGS, Schema,
};
pub use style::{kebab_case, render_style};
