//! Compatibility validation: decides which fragments a resolved spec uses.
//!
//! Requested capabilities the catalog cannot satisfy for the chosen backing,
//! or whose prerequisite is missing, are dropped with a [`Diagnostic`]. The
//! rest of the spec is still generated.

use crate::catalog::{FragmentKey, TemplateCatalog};
use crate::diagnostics::{Capability, Diagnostic, DropReason};
use crate::error::{StronglyError, StronglyResult};
use crate::kinds::{ConverterKind, ImplementationKind};
use crate::spec::ResolvedSpec;

/// Fragments chosen for one type, plus the findings produced on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Base key first, then converters and implementations in canonical order.
    pub keys: Vec<FragmentKey>,
    /// One entry per dropped capability, in the order requested.
    pub diagnostics: Vec<Diagnostic>,
}

impl Selection {
    /// Converters that survived selection.
    pub fn converters(&self) -> impl Iterator<Item = ConverterKind> + '_ {
        self.keys.iter().filter_map(|key| match key {
            FragmentKey::Converter(_, kind) => Some(*kind),
            _ => None,
        })
    }

    /// Implementations that survived selection.
    pub fn implementations(&self) -> impl Iterator<Item = ImplementationKind> + '_ {
        self.keys.iter().filter_map(|key| match key {
            FragmentKey::Implementation(_, kind) => Some(*kind),
            _ => None,
        })
    }

    fn drop_capability(&mut self, spec: &ResolvedSpec, capability: Capability, reason: DropReason) {
        let diagnostic = Diagnostic {
            type_name: spec.name.clone(),
            capability,
            reason,
        };
        tracing::warn!(id = diagnostic.id(), "{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// Select the fragment keys for `spec` against `catalog`.
///
/// The result always holds exactly one Base key, listed first. Every key in
/// it resolves to a fragment in `catalog`.
///
/// # Errors
///
/// Returns [`StronglyError::MissingFragment`] when the catalog has no Base
/// fragment for the backing.
pub fn select(spec: &ResolvedSpec, catalog: &TemplateCatalog) -> StronglyResult<Selection> {
    let base = FragmentKey::Base(spec.backing);
    if catalog.lookup(base).is_none() {
        return Err(StronglyError::missing_fragment(&spec.name, base));
    }

    let mut selection = Selection {
        keys: vec![base],
        diagnostics: Vec::new(),
    };

    for kind in spec.converters.iter() {
        let key = FragmentKey::Converter(spec.backing, kind);
        if catalog.lookup(key).is_some() {
            selection.keys.push(key);
        } else {
            selection.drop_capability(
                spec,
                Capability::Converter(kind),
                DropReason::NotApplicable(spec.backing),
            );
        }
    }

    for kind in spec.implementations.iter() {
        let key = FragmentKey::Implementation(spec.backing, kind);
        if catalog.lookup(key).is_none() {
            selection.drop_capability(
                spec,
                Capability::Implementation(kind),
                DropReason::NotApplicable(spec.backing),
            );
            continue;
        }
        // Prerequisites precede their dependants in canonical order, so the
        // keys accepted so far are enough to decide.
        let missing = kind
            .prerequisite()
            .filter(|required| !selection.implementations().any(|kept| kept == *required));
        if let Some(required) = missing {
            selection.drop_capability(
                spec,
                Capability::Implementation(kind),
                DropReason::MissingPrerequisite(required),
            );
            continue;
        }
        selection.keys.push(key);
    }

    Ok(selection)
}
