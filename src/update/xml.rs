//! Low-level XML emission helpers for the update wire format.

use std::borrow::Cow;
use std::fmt::Display;

/// Render an optional attribute as ` name="value"`, or nothing when unset.
///
/// Values on this path are always literal numbers or booleans, never free
/// text, so they are inserted without escaping. Callers must not route
/// user-supplied strings through here.
pub(crate) fn attrib<T: Display>(name: &str, value: Option<T>) -> String {
    match value {
        Some(v) => format!(" {name}=\"{v}\""),
        None => String::new(),
    }
}

/// Boolean specialization of [`attrib`]: emits the literal `true`/`false`
/// (never `1`/`0`), or nothing when unset.
pub(crate) fn bool_attrib(name: &str, value: Option<bool>) -> String {
    attrib(name, value)
}

/// Escape a field value for XML text content.
///
/// Only `&`, `<` and `>` are replaced. Double quotes pass through untouched:
/// the engine accepts them in text content and the existing wire corpus
/// relies on them staying literal.
pub(crate) fn escape_text(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
