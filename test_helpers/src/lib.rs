//! Test helpers shared across the workspace.
//!
//! [`figment`] wraps `figment::Jail` for defaults-loading tests and [`text`]
//! inspects generated C# source without a C# parser.

pub mod figment;
pub mod text;
