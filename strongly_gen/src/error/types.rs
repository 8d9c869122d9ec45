//! Primary error enum for generation flows.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use crate::catalog::FragmentKey;

/// Convenience alias for results carrying a [`StronglyError`].
pub type StronglyResult<T> = Result<T, StronglyError>;

/// Errors that can occur while generating a strongly-typed identifier.
///
/// Every variant except [`StronglyError::Gathering`] and
/// [`StronglyError::Io`] is scoped to a single type: it aborts generation for
/// that type only and leaves the rest of a batch untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StronglyError {
    /// A configuration value could not be turned into a concrete setting.
    #[error("invalid configuration for '{type_name}': {message}")]
    Configuration {
        /// Type whose configuration was rejected. Empty for process-wide defaults.
        type_name: String,
        /// Human-readable explanation of the rejection.
        message: String,
    },

    /// A raw flag field carried unknown bits, or the `Default` bit mixed
    /// with others.
    #[error("invalid {field} bits {bits:#x} on '{type_name}'")]
    UnknownBits {
        /// Type whose configuration carried the bits.
        type_name: String,
        /// Name of the configuration field.
        field: &'static str,
        /// Unknown bits only, or the whole raw value when the `Default` bit
        /// was combined with others.
        bits: u32,
    },

    /// The catalog lacks a fragment that selection or composition relies on.
    #[error("catalog has no fragment {fragment} needed to compose '{type_name}'")]
    MissingFragment {
        /// Type being generated when the gap surfaced.
        type_name: String,
        /// Key the catalog could not resolve.
        fragment: FragmentKey,
    },

    /// A catalog fragment left a placeholder unresolved after composition.
    #[error("fragment {fragment} left placeholder '{token}' unresolved while composing '{type_name}'")]
    InternalComposition {
        /// Type being composed when the defect surfaced.
        type_name: String,
        /// Catalog key of the malformed fragment.
        fragment: FragmentKey,
        /// Placeholder token that failed to resolve.
        token: String,
    },

    /// Error while gathering process-wide defaults from providers.
    #[error("failed to gather generator defaults: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// Filesystem failure while writing an emission unit.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
