//! Placeholder substitution and leftover detection.

use crate::catalog::{FragmentKey, TYPE_TOKEN};
use crate::error::{StronglyError, StronglyResult};

/// Substitute the type name into `text` and reject any placeholder left
/// behind, attributing it to `key`.
pub(super) fn render(type_name: &str, key: FragmentKey, text: &str) -> StronglyResult<String> {
    let rendered = text.replace(TYPE_TOKEN, type_name);
    match first_unresolved(&rendered) {
        Some(token) => Err(defect(type_name, key, token)),
        None => Ok(rendered),
    }
}

/// Build an internal composition error and log it.
pub(super) fn defect(type_name: &str, key: FragmentKey, token: &str) -> StronglyError {
    tracing::error!(type_name, fragment = %key, token, "malformed catalog fragment");
    StronglyError::internal_composition(type_name, key, token)
}

/// First `{{UPPER_CASE}}` token in `text`, braces included.
///
/// C# brace escapes such as `{{0}}` are not placeholders and are skipped.
pub(super) fn first_unresolved(text: &str) -> Option<&str> {
    let mut offset = 0;
    while let Some(found) = text.get(offset..)?.find("{{") {
        let start = offset + found;
        let inner_start = start + 2;
        let rest = text.get(inner_start..)?;
        if let Some(len) = rest.find("}}") {
            let inner = rest.get(..len).unwrap_or_default();
            if is_placeholder_name(inner) {
                return text.get(start..inner_start + len + 2);
            }
        }
        offset = start + 1;
    }
    None
}

fn is_placeholder_name(inner: &str) -> bool {
    inner.starts_with(|c: char| c.is_ascii_uppercase())
        && inner
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
