//! Template composition engine for strongly-typed identifiers.
//!
//! Given a per-type configuration ([`TypeSpec`]), the engine resolves
//! defaulted settings, checks each requested capability against the chosen
//! backing primitive, and stitches parameterised fragments from a
//! [`TemplateCatalog`] into one C# source unit per type.
//!
//! The pipeline has four stages, each usable on its own:
//!
//! 1. [`resolve()`] replaces `Default` sentinels with [`GeneratorDefaults`].
//! 2. [`select`] picks catalog fragments and reports dropped capabilities as
//!    [`Diagnostic`]s.
//! 3. [`compose()`] merges the fragments into an [`EmissionUnit`].
//! 4. [`DirectorySink`] optionally writes units to disk.
//!
//! [`Generator`] runs the first three for one spec or, in parallel, for a
//! batch.
//!
//! ```
//! use strongly_gen::{
//!     BackingKind, ConverterKind, Generator, GeneratorDefaults, ImplementationKind, TypeSpec,
//! };
//!
//! let spec = TypeSpec::new("OrderId")
//!     .in_namespace("Shop.Orders")
//!     .with_backing(BackingKind::Int)
//!     .with_converters([ConverterKind::SystemTextJson])
//!     .with_implementations([ImplementationKind::Equatable]);
//! let unit = Generator::new(GeneratorDefaults::default()).generate(&spec)?;
//! assert_eq!(unit.hint_name, "Shop.Orders.OrderId.g.cs");
//! assert!(unit.diagnostics.is_empty());
//! # Ok::<_, strongly_gen::StronglyError>(())
//! ```

mod catalog;
mod compat;
mod compose;
mod defaults;
mod diagnostics;
mod emit;
mod error;
mod flags;
mod generator;
mod kinds;
mod resolve;
mod sink;
mod spec;

pub use catalog::{
    CatalogBuilder, Fragment, FragmentKey, INTERFACES_TOKEN, TYPE_TOKEN, TemplateCatalog,
    VALIDATE_TOKEN,
};
pub use compat::{Selection, select};
pub use compose::compose;
pub use defaults::{DEFAULTS_FILE, ENV_PREFIX, GeneratorDefaults, load_defaults};
pub use diagnostics::{Capability, Diagnostic, DropReason, Severity};
pub use emit::{Declaration, DeclarationKind, EmissionUnit};
pub use error::{StronglyError, StronglyResult};
pub use flags::{ConverterSet, FlagSet, ImplementationSet, Setting};
pub use generator::Generator;
pub use kinds::{BackingKind, ConverterKind, DEFAULT_BIT, FlagKind, ImplementationKind};
pub use resolve::resolve;
pub use sink::{DirectorySink, WriteOutcome};
pub use spec::{ResolvedSpec, TypeSpec};
