//! Trait-based conversions between external error types and `StronglyError`.

use figment::Error as FigmentError;

use super::StronglyError;

impl From<FigmentError> for StronglyError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(e.into())
    }
}

impl From<StronglyError> for FigmentError {
    /// Allow using `?` inside `figment::Jail` closures.
    fn from(e: StronglyError) -> Self {
        match e {
            StronglyError::Gathering(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
