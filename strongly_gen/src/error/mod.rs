//! Error types produced while resolving, selecting, and composing
//! strongly-typed identifier declarations.

mod constructors;
mod conversions;
mod types;

pub use types::{StronglyError, StronglyResult};

#[cfg(test)]
mod tests;
