//! Backing-specific authoring tokens.
//!
//! Catalog templates are written once per storage shape and specialised per
//! backing by filling these tokens while the catalog is populated. None of
//! them survives into a populated catalog.

use crate::kinds::BackingKind;

/// Storage shape shared by several backings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Shape {
    /// A C# value type with a `TryParse(string, IFormatProvider, out T)`.
    Struct,
    /// A non-null `string`.
    Text,
    /// A `string?` whose absence is meaningful.
    OptionalText,
}

pub(super) const fn shape(backing: BackingKind) -> Shape {
    match backing {
        BackingKind::Guid
        | BackingKind::Int
        | BackingKind::Long
        | BackingKind::Decimal
        | BackingKind::MaskedGuid => Shape::Struct,
        BackingKind::String => Shape::Text,
        BackingKind::NullableString => Shape::OptionalText,
    }
}

/// Authoring tokens and their values for `backing`.
pub(super) fn tokens(backing: BackingKind) -> Vec<(&'static str, &'static str)> {
    vec![
        ("{{PRIMITIVE}}", backing.primitive()),
        ("{{ZERO}}", zero(backing)),
        ("{{STJ_READ}}", stj_read(backing)),
        ("{{STJ_WRITE}}", stj_write(backing)),
    ]
}

/// Substitute every authoring token of `backing` into `template`.
pub(super) fn fill(template: &str, backing: BackingKind) -> String {
    tokens(backing)
        .into_iter()
        .fold(template.to_owned(), |text, (token, value)| {
            text.replace(token, value)
        })
}

const fn zero(backing: BackingKind) -> &'static str {
    match backing {
        BackingKind::Int | BackingKind::Long => "0",
        BackingKind::Decimal => "0m",
        BackingKind::Guid | BackingKind::MaskedGuid => "System.Guid.Empty",
        BackingKind::String => "string.Empty",
        BackingKind::NullableString => "null",
    }
}

const fn stj_read(backing: BackingKind) -> &'static str {
    match backing {
        BackingKind::Int => "reader.GetInt32()",
        BackingKind::Long => "reader.GetInt64()",
        BackingKind::Decimal => "reader.GetDecimal()",
        BackingKind::Guid | BackingKind::MaskedGuid => "reader.GetGuid()",
        BackingKind::String => "reader.GetString()!",
        BackingKind::NullableString => {
            "reader.TokenType == System.Text.Json.JsonTokenType.Null ? null : reader.GetString()"
        }
    }
}

const fn stj_write(backing: BackingKind) -> &'static str {
    match backing {
        BackingKind::Int | BackingKind::Long | BackingKind::Decimal => {
            "        writer.WriteNumberValue(value.Value);"
        }
        BackingKind::Guid | BackingKind::MaskedGuid | BackingKind::String => {
            "        writer.WriteStringValue(value.Value);"
        }
        BackingKind::NullableString => {
            "        if (value.Value is null)
        {
            writer.WriteNullValue();
        }
        else
        {
            writer.WriteStringValue(value.Value);
        }"
        }
    }
}
