//! Constructors and classification helpers for `StronglyError`.

use figment::Error as FigmentError;

use super::StronglyError;
use crate::catalog::FragmentKey;

impl StronglyError {
    /// Construct a configuration error for `type_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strongly_gen::StronglyError;
    /// let e = StronglyError::configuration("OrderId", "name is empty");
    /// assert!(matches!(e, StronglyError::Configuration { .. }));
    /// ```
    #[must_use]
    pub fn configuration(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Construct an unknown-bits error for `field` on `type_name`.
    #[must_use]
    pub fn unknown_bits(type_name: impl Into<String>, field: &'static str, bits: u32) -> Self {
        Self::UnknownBits {
            type_name: type_name.into(),
            field,
            bits,
        }
    }

    /// Construct an internal composition error for a malformed fragment.
    #[must_use]
    pub fn internal_composition(
        type_name: impl Into<String>,
        fragment: FragmentKey,
        token: impl Into<String>,
    ) -> Self {
        Self::InternalComposition {
            type_name: type_name.into(),
            fragment,
            token: token.into(),
        }
    }

    /// Construct a missing-fragment error for a catalog without `fragment`.
    #[must_use]
    pub fn missing_fragment(type_name: impl Into<String>, fragment: FragmentKey) -> Self {
        Self::MissingFragment {
            type_name: type_name.into(),
            fragment,
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Returns `true` when the error stems from a catalog authoring bug
    /// rather than from user input.
    #[must_use]
    pub const fn is_defect(&self) -> bool {
        matches!(
            self,
            Self::InternalComposition { .. } | Self::MissingFragment { .. }
        )
    }

    /// Returns `true` when the error is scoped to a single type and must not
    /// abort the rest of a batch.
    #[must_use]
    pub const fn is_unit_scoped(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::UnknownBits { .. }
                | Self::InternalComposition { .. }
                | Self::MissingFragment { .. }
        )
    }

    /// Name of the type the error is attached to, when it has one.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Configuration { type_name, .. }
            | Self::UnknownBits { type_name, .. }
            | Self::InternalComposition { type_name, .. }
            | Self::MissingFragment { type_name, .. } => Some(type_name.as_str()),
            Self::Gathering(_) | Self::Io { .. } => None,
        }
    }
}
