//! Tag and attribute classification tables.
//!
//! The default tables are part of the rendered output contract and must not
//! change. Callers that need extra entries build an extended [`Schema`] from
//! the default one.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Tags rendered as `<tag/>` without a closing tag.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Attributes whose presence alone is meaningful.
///
/// See <https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#boolean-attributes>.
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "allowpaymentrequest",
    "allowusermedia",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
    "typemustmatch",
];

/// Attributes restricted to a fixed set of keywords, always emitted with a value.
///
/// See <https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#enumerated-attribute>.
pub const ENUMERATED_ATTRIBUTES: &[&str] = &[
    "autocomplete",
    "contenteditable",
    "crossorigin",
    "dir",
    "draggable",
    "enctype",
    "formenctype",
    "formmethod",
    "inputmode",
    "kind",
    "method",
    "preload",
    "sandbox",
    "scope",
    "shape",
    "spellcheck",
    "step",
    "translate",
    "type",
    "workertype",
    "wrap",
];

/// Attributes emitted even when their value is falsy.
pub const PASS_THROUGH_ATTRIBUTES: &[&str] = &["src"];

/// Prefixes under which a boolean value makes the attribute boolean-classified.
const BOOLEAN_PREFIXES: [&str; 2] = ["data-", "aria-"];

/// Element whose content comes from its `value` property.
pub(crate) const TEXTAREA_TAG: &str = "textarea";

/// Property carrying pre-rendered markup.
pub(crate) const RAW_HTML_PROP: &str = "dangerouslySetInnerHTML";

static DEFAULT_SCHEMA: LazyLock<Schema> = LazyLock::new(Schema::new);

/// Classification of a single attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttrClass {
    /// Key is in the boolean-attribute table.
    pub boolean: bool,
    /// Boolean value under a `data-` or `aria-` key.
    pub prefixed_boolean: bool,
    /// Key is in the enumerated-attribute table.
    pub enumerated: bool,
    /// Key is a pass-through attribute.
    pub pass_through: bool,
}

impl AttrClass {
    /// Boolean-classified in either way.
    #[must_use]
    pub fn is_boolean(self) -> bool {
        self.boolean || self.prefixed_boolean
    }

    /// Exempt from the falsy-value gate.
    #[must_use]
    pub fn renders_as_is(self) -> bool {
        self.is_boolean() || self.enumerated || self.pass_through
    }
}

/// Tag and attribute classification tables.
#[derive(Clone, Debug)]
pub struct Schema {
    self_closing: HashSet<String>,
    boolean: HashSet<String>,
    enumerated: HashSet<String>,
    pass_through: HashSet<String>,
}

impl Schema {
    /// Create a schema holding the default tables.
    #[must_use]
    pub fn new() -> Self {
        let set = |items: &[&str]| -> HashSet<String> {
            items.iter().map(|&s| s.to_owned()).collect()
        };
        Self {
            self_closing: set(SELF_CLOSING_TAGS),
            boolean: set(BOOLEAN_ATTRIBUTES),
            enumerated: set(ENUMERATED_ATTRIBUTES),
            pass_through: set(PASS_THROUGH_ATTRIBUTES),
        }
    }

    /// Shared default schema.
    #[must_use]
    pub fn default_ref() -> &'static Self {
        &DEFAULT_SCHEMA
    }

    /// Add tags rendered without a closing tag.
    #[must_use]
    pub fn with_self_closing_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.self_closing.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add boolean attributes.
    #[must_use]
    pub fn with_boolean_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boolean.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add enumerated attributes.
    #[must_use]
    pub fn with_enumerated_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enumerated.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add pass-through attributes.
    #[must_use]
    pub fn with_pass_through_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pass_through.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether `tag` renders without a closing tag.
    #[must_use]
    pub fn is_self_closing(&self, tag: &str) -> bool {
        self.self_closing.contains(tag)
    }

    /// Classify attribute `key`; `bool_value` tells whether its value is a boolean.
    #[must_use]
    pub fn classify(&self, key: &str, bool_value: bool) -> AttrClass {
        AttrClass {
            boolean: self.boolean.contains(key),
            prefixed_boolean: bool_value && BOOLEAN_PREFIXES.iter().any(|p| key.starts_with(p)),
            enumerated: self.enumerated.contains(key),
            pass_through: self.pass_through.contains(key),
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a property name to the attribute name written to markup.
pub(crate) fn attribute_name(key: &str) -> &str {
    match key {
        "htmlFor" => "for",
        "className" => "class",
        _ => key,
    }
}
