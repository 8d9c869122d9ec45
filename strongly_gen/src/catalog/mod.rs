//! Read-only catalog of template fragments.
//!
//! Fragments are keyed by backing and capability. A missing entry is not an
//! error: it means the capability is not meaningful for that backing, and the
//! selector drops it with a diagnostic.
//!
//! Fragments carry three composition placeholders: [`TYPE_TOKEN`] (the
//! declared type name, valid in every section), [`INTERFACES_TOKEN`] (the
//! interface list, Base header only) and [`VALIDATE_TOKEN`] (the validation
//! hook slot, Base members only).

mod backing;
mod base;
mod converters;
mod implementations;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use strum::IntoEnumIterator;

use crate::kinds::{BackingKind, ConverterKind, ImplementationKind};

/// Type-name placeholder.
pub const TYPE_TOKEN: &str = "{{TYPE}}";
/// Interface-list placeholder.
pub const INTERFACES_TOKEN: &str = "{{INTERFACES}}";
/// Validation hook placeholder.
pub const VALIDATE_TOKEN: &str = "{{VALIDATE}}";

static BUILTIN: LazyLock<TemplateCatalog> = LazyLock::new(TemplateCatalog::populate_builtin);

/// Identifies one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FragmentKey {
    /// The struct body for a backing.
    Base(BackingKind),
    /// A serialization adapter for a backing.
    Converter(BackingKind, ConverterKind),
    /// A behavioural capability for a backing.
    Implementation(BackingKind, ImplementationKind),
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(backing) => write!(f, "base/{backing}"),
            Self::Converter(backing, kind) => write!(f, "converter/{backing}/{kind}"),
            Self::Implementation(backing, kind) => write!(f, "implementation/{backing}/{kind}"),
        }
    }
}

/// One parameterised piece of generated declaration text.
///
/// Each section is optional; the composer places them as follows:
/// `attribute` above the struct header, `header` as the struct header (Base
/// only), `members` inside the struct body, `hook` into the validation slot,
/// and `sibling` as a top-level declaration after the struct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    attribute: Option<String>,
    header: Option<String>,
    members: Option<String>,
    hook: Option<String>,
    sibling: Option<String>,
}

impl Fragment {
    /// An empty fragment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attribute: None,
            header: None,
            members: None,
            hook: None,
            sibling: None,
        }
    }

    /// Attach an attribute line.
    #[must_use]
    pub fn with_attribute(mut self, text: impl Into<String>) -> Self {
        self.attribute = Some(text.into());
        self
    }

    /// Attach the struct header.
    #[must_use]
    pub fn with_header(mut self, text: impl Into<String>) -> Self {
        self.header = Some(text.into());
        self
    }

    /// Attach struct members.
    #[must_use]
    pub fn with_members(mut self, text: impl Into<String>) -> Self {
        self.members = Some(text.into());
        self
    }

    /// Attach a validation hook body.
    #[must_use]
    pub fn with_hook(mut self, text: impl Into<String>) -> Self {
        self.hook = Some(text.into());
        self
    }

    /// Attach a sibling top-level declaration.
    #[must_use]
    pub fn with_sibling(mut self, text: impl Into<String>) -> Self {
        self.sibling = Some(text.into());
        self
    }

    /// Attribute line, if any.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Struct header, if any.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Struct members, if any.
    #[must_use]
    pub fn members(&self) -> Option<&str> {
        self.members.as_deref()
    }

    /// Validation hook body, if any.
    #[must_use]
    pub fn hook(&self) -> Option<&str> {
        self.hook.as_deref()
    }

    /// Sibling declaration, if any.
    #[must_use]
    pub fn sibling(&self) -> Option<&str> {
        self.sibling.as_deref()
    }

    /// Iterate the populated sections.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        [
            &self.attribute,
            &self.header,
            &self.members,
            &self.hook,
            &self.sibling,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
    }
}

/// Mapping from [`FragmentKey`] to [`Fragment`].
///
/// The catalog never changes once built, so it can be shared by reference
/// across any number of concurrent compositions.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    fragments: BTreeMap<FragmentKey, Fragment>,
}

impl TemplateCatalog {
    /// The built-in catalog, populated on first use.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Start an empty catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Fragment for `key`, or `None` when the pair is inapplicable.
    #[must_use]
    pub fn lookup(&self, key: FragmentKey) -> Option<&Fragment> {
        self.fragments.get(&key)
    }

    /// Number of authored fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the catalog holds no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = FragmentKey> + '_ {
        self.fragments.keys().copied()
    }

    fn populate_builtin() -> Self {
        let mut builder = Self::builder();
        for backing_kind in BackingKind::iter() {
            builder.insert(FragmentKey::Base(backing_kind), base::fragment(backing_kind));
            for kind in ConverterKind::iter() {
                if let Some(fragment) = converters::fragment(backing_kind, kind) {
                    builder.insert(FragmentKey::Converter(backing_kind, kind), fragment);
                }
            }
            for kind in ImplementationKind::iter() {
                if let Some(fragment) = implementations::fragment(backing_kind, kind) {
                    builder.insert(FragmentKey::Implementation(backing_kind, kind), fragment);
                }
            }
        }
        let catalog = builder.build();
        tracing::debug!(fragments = catalog.len(), "populated built-in template catalog");
        catalog
    }
}

/// Accumulates fragments for a [`TemplateCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    fragments: BTreeMap<FragmentKey, Fragment>,
}

impl CatalogBuilder {
    /// Insert or replace the fragment for `key`.
    pub fn insert(&mut self, key: FragmentKey, fragment: Fragment) -> &mut Self {
        self.fragments.insert(key, fragment);
        self
    }

    /// Chaining form of [`CatalogBuilder::insert`].
    #[must_use]
    pub fn with(mut self, key: FragmentKey, fragment: Fragment) -> Self {
        self.insert(key, fragment);
        self
    }

    /// Copy every fragment of `catalog` into the builder.
    #[must_use]
    pub fn extend_from(mut self, catalog: &TemplateCatalog) -> Self {
        self.fragments.extend(
            catalog
                .fragments
                .iter()
                .map(|(key, fragment)| (*key, fragment.clone())),
        );
        self
    }

    /// Remove the fragment for `key`.
    #[must_use]
    pub fn without(mut self, key: FragmentKey) -> Self {
        self.fragments.remove(&key);
        self
    }

    /// Freeze the catalog.
    #[must_use]
    pub fn build(self) -> TemplateCatalog {
        TemplateCatalog {
            fragments: self.fragments,
        }
    }
}
