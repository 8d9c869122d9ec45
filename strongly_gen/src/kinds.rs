//! Closed enumerations naming backing primitives and emitted capabilities.
//!
//! Declaration order of every enum is its canonical order: composition
//! iterates variants in this order, so reordering them changes output.
//! Raw values mirror the attribute enums hosts read from user code.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Primitive used to store a strongly-typed identifier's value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BackingKind {
    /// `System.Guid`.
    Guid,
    /// `int`.
    Int,
    /// `long`.
    Long,
    /// `decimal`.
    Decimal,
    /// Non-null `string`.
    String,
    /// `string?`; the stored value may be absent.
    NullableString,
    /// `System.Guid` rendered with all but the last four digits hidden.
    MaskedGuid,
}

impl BackingKind {
    /// Decode the raw attribute value. `0` is the `Default` sentinel and
    /// decodes to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the raw value back when it names no known backing.
    pub const fn from_raw(raw: i32) -> Result<Option<Self>, i32> {
        Ok(Some(match raw {
            0 => return Ok(None),
            1 => Self::Guid,
            2 => Self::Int,
            3 => Self::Long,
            4 => Self::Decimal,
            5 => Self::String,
            6 => Self::NullableString,
            7 => Self::MaskedGuid,
            other => return Err(other),
        }))
    }

    /// C# spelling of the stored primitive.
    #[must_use]
    pub const fn primitive(self) -> &'static str {
        match self {
            Self::Guid | Self::MaskedGuid => "System.Guid",
            Self::Int => "int",
            Self::Long => "long",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::NullableString => "string?",
        }
    }
}

/// Raw bit reserved for the `Default` sentinel in flag fields.
pub const DEFAULT_BIT: u32 = 1;

/// A capability family that can be stored in a [`crate::FlagSet`].
pub trait FlagKind: Copy + Ord + std::fmt::Debug + strum::IntoEnumIterator + 'static {
    /// Field name used in diagnostics and errors.
    const FIELD: &'static str;

    /// Raw attribute bit for this variant.
    fn bit(self) -> u32;
}

/// Serialization adapter emitted alongside the identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConverterKind {
    /// `Newtonsoft.Json` converter.
    NewtonsoftJson,
    /// `System.Text.Json` converter.
    SystemTextJson,
    /// `System.ComponentModel.TypeConverter`.
    TypeConverter,
    /// Entity Framework Core value converter.
    EfCoreValueConverter,
    /// Dapper type handler.
    DapperTypeHandler,
}

impl ConverterKind {
    /// Suffix used for the emitted adapter class name.
    #[must_use]
    pub const fn class_suffix(self) -> &'static str {
        match self {
            Self::NewtonsoftJson => "NewtonsoftJsonConverter",
            Self::SystemTextJson => "SystemTextJsonConverter",
            Self::TypeConverter => "TypeConverter",
            Self::EfCoreValueConverter => "EfCoreValueConverter",
            Self::DapperTypeHandler => "DapperTypeHandler",
        }
    }
}

impl FlagKind for ConverterKind {
    const FIELD: &'static str = "converters";

    fn bit(self) -> u32 {
        match self {
            Self::NewtonsoftJson => 2,
            Self::SystemTextJson => 4,
            Self::TypeConverter => 8,
            Self::EfCoreValueConverter => 16,
            Self::DapperTypeHandler => 32,
        }
    }
}

/// Behavioural contract emitted on the identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ImplementationKind {
    /// `IEquatable<T>` plus `==`/`!=`.
    Equatable,
    /// `IComparable<T>`.
    Comparable,
    /// `IParsable<T>`.
    Parsable,
    /// `IFormattable`.
    Formattable,
    /// `<`, `<=`, `>`, `>=` on the stored value.
    ComparisonOperators,
    /// Concrete body for the validation hook.
    Validation,
}

impl ImplementationKind {
    /// Interface contracts this capability adds to the struct header.
    ///
    /// The type-name placeholder is substituted by the composer.
    #[must_use]
    pub const fn interfaces(self) -> &'static [&'static str] {
        match self {
            Self::Equatable => &[
                "System.IEquatable<{{TYPE}}>",
                "System.Numerics.IEqualityOperators<{{TYPE}}, {{TYPE}}, bool>",
            ],
            Self::Comparable => &["System.IComparable<{{TYPE}}>"],
            Self::Parsable => &["System.IParsable<{{TYPE}}>"],
            Self::Formattable => &["System.IFormattable"],
            Self::ComparisonOperators => &[
                "System.Numerics.IComparisonOperators<{{TYPE}}, {{TYPE}}, bool>",
                "System.Numerics.IEqualityOperators<{{TYPE}}, {{TYPE}}, bool>",
            ],
            Self::Validation => &[],
        }
    }

    /// Capability that must also be selected for this one to compose.
    #[must_use]
    pub const fn prerequisite(self) -> Option<Self> {
        match self {
            Self::ComparisonOperators => Some(Self::Equatable),
            _ => None,
        }
    }
}

impl FlagKind for ImplementationKind {
    const FIELD: &'static str = "implementations";

    fn bit(self) -> u32 {
        match self {
            Self::Equatable => 2,
            Self::Comparable => 4,
            Self::Parsable => 8,
            Self::Formattable => 16,
            Self::ComparisonOperators => 32,
            Self::Validation => 64,
        }
    }
}
