//! Per-type generation requests.

use crate::error::{StronglyError, StronglyResult};
use crate::flags::{ConverterSet, ImplementationSet, Setting};
use crate::kinds::{BackingKind, ConverterKind, FlagKind, ImplementationKind};

/// Configuration attached to one user-declared type, as supplied by the
/// discovery host. Any field may carry the `Default` sentinel.
///
/// # Examples
///
/// ```
/// use strongly_gen::{BackingKind, Setting, TypeSpec};
///
/// let spec = TypeSpec::new("OrderId").with_backing(BackingKind::Int);
/// assert_eq!(spec.backing, Setting::Explicit(BackingKind::Int));
/// assert!(spec.converters.is_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSpec {
    /// Declared type name.
    pub name: String,
    /// Dotted namespace of the declaration, if any.
    pub namespace: Option<String>,
    /// Backing primitive.
    pub backing: Setting<BackingKind>,
    /// Converters to emit.
    pub converters: Setting<ConverterSet>,
    /// Implementations to emit.
    pub implementations: Setting<ImplementationSet>,
}

impl TypeSpec {
    /// A spec for `name` with every field left at the `Default` sentinel.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            backing: Setting::Default,
            converters: Setting::Default,
            implementations: Setting::Default,
        }
    }

    /// Decode a spec from raw attribute values.
    ///
    /// # Errors
    ///
    /// Returns [`StronglyError::Configuration`] for an unknown backing value
    /// and [`StronglyError::UnknownBits`] for unknown or illegally combined
    /// flag bits.
    pub fn from_raw(
        name: impl Into<String>,
        backing: i32,
        converters: u32,
        implementations: u32,
    ) -> StronglyResult<Self> {
        let name = name.into();
        let backing_kind = BackingKind::from_raw(backing).map_err(|raw| {
            StronglyError::configuration(&name, format!("unknown backing type value {raw}"))
        })?;
        let converter_setting = ConverterSet::from_bits(converters)
            .map_err(|bits| StronglyError::unknown_bits(&name, ConverterKind::FIELD, bits))?;
        let implementation_setting = ImplementationSet::from_bits(implementations)
            .map_err(|bits| StronglyError::unknown_bits(&name, ImplementationKind::FIELD, bits))?;
        Ok(Self {
            name,
            namespace: None,
            backing: backing_kind.map_or(Setting::Default, Setting::Explicit),
            converters: converter_setting,
            implementations: implementation_setting,
        })
    }

    /// Set the namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set an explicit backing.
    #[must_use]
    pub fn with_backing(mut self, backing: BackingKind) -> Self {
        self.backing = Setting::Explicit(backing);
        self
    }

    /// Set explicit converters.
    #[must_use]
    pub fn with_converters(mut self, converters: impl IntoIterator<Item = ConverterKind>) -> Self {
        self.converters = Setting::Explicit(converters.into_iter().collect());
        self
    }

    /// Set explicit implementations.
    #[must_use]
    pub fn with_implementations(
        mut self,
        implementations: impl IntoIterator<Item = ImplementationKind>,
    ) -> Self {
        self.implementations = Setting::Explicit(implementations.into_iter().collect());
        self
    }

    /// Whether no field carries the sentinel.
    #[must_use]
    pub const fn is_concrete(&self) -> bool {
        !self.backing.is_default()
            && !self.converters.is_default()
            && !self.implementations.is_default()
    }
}

/// A fully concrete spec produced by [`crate::resolve()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedSpec {
    /// Declared type name, validated as a C# identifier.
    pub name: String,
    /// Validated dotted namespace, if any.
    pub namespace: Option<String>,
    /// Backing primitive.
    pub backing: BackingKind,
    /// Converters to emit.
    pub converters: ConverterSet,
    /// Implementations to emit.
    pub implementations: ImplementationSet,
}

impl ResolvedSpec {
    /// Stable file-identifying key for the emitted unit.
    #[must_use]
    pub fn hint_name(&self) -> String {
        self.namespace.as_deref().map_or_else(
            || format!("{}.g.cs", self.name),
            |ns| format!("{ns}.{}.g.cs", self.name),
        )
    }
}

impl From<ResolvedSpec> for TypeSpec {
    fn from(spec: ResolvedSpec) -> Self {
        Self {
            name: spec.name,
            namespace: spec.namespace,
            backing: Setting::Explicit(spec.backing),
            converters: Setting::Explicit(spec.converters),
            implementations: Setting::Explicit(spec.implementations),
        }
    }
}

/// Returns `true` when `candidate` is a plain C# identifier.
pub(crate) fn is_identifier(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn raw_zero_and_default_bits_decode_to_sentinels() {
        let spec = TypeSpec::from_raw("OrderId", 0, 1, 1).expect("decode");
        assert_eq!(spec, TypeSpec::new("OrderId"));
        assert!(!spec.is_concrete());
    }

    #[rstest]
    fn raw_values_decode_to_explicit_settings() {
        let spec = TypeSpec::from_raw("Email", 6, 2, 2).expect("decode");
        assert_eq!(spec.backing, Setting::Explicit(BackingKind::NullableString));
        assert_eq!(
            spec.converters,
            Setting::Explicit(ConverterSet::from_iter([ConverterKind::NewtonsoftJson]))
        );
        assert_eq!(
            spec.implementations,
            Setting::Explicit(ImplementationSet::from_iter([ImplementationKind::Equatable]))
        );
    }

    #[rstest]
    fn unknown_backing_is_a_configuration_error() {
        let err = TypeSpec::from_raw("OrderId", 42, 1, 1).expect_err("unknown backing");
        assert!(matches!(err, StronglyError::Configuration { .. }));
    }

    #[rstest]
    #[case(1 << 10, 1, "converters")]
    #[case(1, 1 << 10, "implementations")]
    fn unknown_bits_name_the_field(#[case] converters: u32, #[case] implementations: u32, #[case] field: &str) {
        let err = TypeSpec::from_raw("OrderId", 2, converters, implementations)
            .expect_err("unknown bits");
        assert!(
            matches!(err, StronglyError::UnknownBits { field: f, .. } if f == field),
            "unexpected error {err:?}"
        );
    }

    #[rstest]
    fn default_bit_mixed_with_known_bits_is_invalid_not_unknown() {
        let err = TypeSpec::from_raw("OrderId", 2, 1 | 2, 1).expect_err("mixed default bit");
        assert_eq!(err.to_string(), "invalid converters bits 0x3 on 'OrderId'");
    }

    #[rstest]
    #[case("OrderId", true)]
    #[case("_id2", true)]
    #[case("2Fast", false)]
    #[case("", false)]
    #[case("Order Id", false)]
    #[case("Id{}", false)]
    fn identifier_rules(#[case] candidate: &str, #[case] valid: bool) {
        assert_eq!(is_identifier(candidate), valid);
    }

    #[rstest]
    fn hint_name_includes_namespace() {
        let spec = ResolvedSpec {
            name: "OrderId".into(),
            namespace: Some("Shop.Orders".into()),
            backing: BackingKind::Int,
            converters: ConverterSet::empty(),
            implementations: ImplementationSet::empty(),
        };
        assert_eq!(spec.hint_name(), "Shop.Orders.OrderId.g.cs");
    }
}
