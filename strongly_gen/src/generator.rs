//! End-to-end generation: resolve, select, compose.

use rayon::prelude::*;

use crate::catalog::TemplateCatalog;
use crate::compat::select;
use crate::compose::compose;
use crate::defaults::GeneratorDefaults;
use crate::emit::EmissionUnit;
use crate::error::StronglyResult;
use crate::resolve::resolve;
use crate::spec::TypeSpec;

/// Drives generation for one pass of a compilation.
///
/// A generator borrows its catalog and owns its defaults; both are read-only,
/// so one generator may serve many threads.
///
/// # Examples
///
/// ```
/// use strongly_gen::{BackingKind, Generator, GeneratorDefaults, TypeSpec};
///
/// let generator = Generator::new(GeneratorDefaults::default());
/// let unit = generator.generate(&TypeSpec::new("OrderId").with_backing(BackingKind::Int))?;
/// assert_eq!(unit.hint_name, "OrderId.g.cs");
/// assert!(unit.source().contains("readonly partial struct OrderId"));
/// # Ok::<_, strongly_gen::StronglyError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Generator<'c> {
    defaults: GeneratorDefaults,
    catalog: &'c TemplateCatalog,
}

impl Generator<'static> {
    /// A generator over the built-in catalog.
    #[must_use]
    pub fn new(defaults: GeneratorDefaults) -> Self {
        Self {
            defaults,
            catalog: TemplateCatalog::builtin(),
        }
    }
}

impl<'c> Generator<'c> {
    /// Replace the catalog.
    #[must_use]
    pub const fn with_catalog<'n>(self, catalog: &'n TemplateCatalog) -> Generator<'n> {
        Generator {
            defaults: self.defaults,
            catalog,
        }
    }

    /// Defaults applied to sentinel fields.
    #[must_use]
    pub const fn defaults(&self) -> &GeneratorDefaults {
        &self.defaults
    }

    /// Catalog fragments are drawn from.
    #[must_use]
    pub const fn catalog(&self) -> &'c TemplateCatalog {
        self.catalog
    }

    /// Generate the emission unit for one spec.
    ///
    /// # Errors
    ///
    /// Propagates configuration and internal composition errors for `spec`.
    pub fn generate(&self, spec: &TypeSpec) -> StronglyResult<EmissionUnit> {
        let span = tracing::debug_span!("generate", type_name = %spec.name);
        let _entered = span.enter();
        let resolved = resolve(spec, &self.defaults)?;
        tracing::debug!(
            backing = %resolved.backing,
            converters = ?resolved.converters,
            implementations = ?resolved.implementations,
            "resolved spec"
        );
        let selection = select(&resolved, self.catalog)?;
        compose(&resolved, &selection, self.catalog)
    }

    /// Generate every spec in parallel.
    ///
    /// Results are returned in input order, one per spec. A failure for one
    /// spec has no effect on the others.
    #[must_use]
    pub fn generate_batch(&self, specs: &[TypeSpec]) -> Vec<StronglyResult<EmissionUnit>> {
        let results: Vec<_> = specs.par_iter().map(|spec| self.generate(spec)).collect();
        let failed = results.iter().filter(|result| result.is_err()).count();
        tracing::debug!(total = specs.len(), failed, "generated batch");
        results
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::catalog::{Fragment, FragmentKey};
    use crate::error::StronglyError;
    use crate::kinds::BackingKind;

    #[rstest]
    fn accessors_expose_what_the_generator_was_built_with() {
        let defaults = GeneratorDefaults {
            backing_type: BackingKind::Long,
            ..GeneratorDefaults::default()
        };
        let catalog = TemplateCatalog::builder().build();
        let builtin = Generator::new(defaults);
        assert!(std::ptr::eq(builtin.catalog(), TemplateCatalog::builtin()));

        let custom = builtin.with_catalog(&catalog);
        assert_eq!(custom.defaults(), &defaults);
        assert!(std::ptr::eq(custom.catalog(), &catalog));
    }

    #[rstest]
    fn custom_catalog_is_used() {
        let catalog = TemplateCatalog::builder()
            .with(
                FragmentKey::Base(BackingKind::Int),
                Fragment::new()
                    .with_header("readonly partial struct {{TYPE}}{{INTERFACES}}")
                    .with_members("{{VALIDATE}}"),
            )
            .build();
        let generator = Generator::new(GeneratorDefaults::default()).with_catalog(&catalog);
        let spec = TypeSpec::new("Tiny")
            .with_backing(BackingKind::Int)
            .with_converters([])
            .with_implementations([]);
        let unit = generator.generate(&spec).expect("generate");
        assert!(unit.source().ends_with("readonly partial struct Tiny\n{\n}\n"));
    }

    #[rstest]
    fn batch_keeps_order_and_isolates_failures() {
        let generator = Generator::new(GeneratorDefaults::default());
        let specs = [
            TypeSpec::new("First"),
            TypeSpec::new("not valid"),
            TypeSpec::new("Third").with_backing(BackingKind::String),
        ];
        let results = generator.generate_batch(&specs);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results.first().and_then(|r| r.as_ref().ok()).map(|u| u.type_name.as_str()),
            Some("First")
        );
        assert!(matches!(
            results.get(1),
            Some(Err(StronglyError::Configuration { .. }))
        ));
        assert_eq!(
            results.get(2).and_then(|r| r.as_ref().ok()).map(|u| u.type_name.as_str()),
            Some("Third")
        );
    }
}
