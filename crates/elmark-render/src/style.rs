//! Inline style serialization.

use crate::node::{PropValue, StyleMap};

/// Serialize a style mapping into an inline `style` attribute value.
///
/// Entries keep insertion order. Property names are converted to kebab-case;
/// entries whose value is not a string, number or boolean are skipped.
///
/// ```
/// use elmark_render::{PropValue, StyleMap, render_style};
///
/// let mut style = StyleMap::new();
/// style.insert("color".to_owned(), PropValue::from("red"));
/// style.insert("backgroundColor".to_owned(), PropValue::from("blue"));
/// assert_eq!(render_style(&style), "color:red;background-color:blue");
/// ```
#[must_use]
pub fn render_style(style: &StyleMap) -> String {
    let mut out = String::new();
    for (property, value) in style {
        let Some(value) = value.as_text() else {
            continue;
        };
        if !out.is_empty() {
            out.push(';');
        }
        out.push_str(&kebab_case(property));
        out.push(':');
        out.push_str(&value);
    }
    out
}

/// Value of the `style` prop after serialization.
///
/// Maps are serialized, strings pass through, anything else becomes empty.
pub(crate) fn style_value(value: &PropValue) -> PropValue {
    match value {
        PropValue::Style(style) => PropValue::Str(render_style(style)),
        PropValue::Str(s) => PropValue::Str(s.clone()),
        _ => PropValue::Str(String::new()),
    }
}

/// Convert a property name to kebab-case.
///
/// Words break at non-alphanumeric characters, at lower-to-upper case
/// transitions, before the last capital of an acronym and between letters
/// and digits.
#[must_use]
pub fn kebab_case(name: &str) -> String {
    words(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().next_back() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_numeric() != c.is_numeric())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
