//! Ordered capability sets and the `Default` sentinel.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::kinds::{DEFAULT_BIT, FlagKind};

/// A configuration field that may defer to the process-wide default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Setting<T> {
    /// Use the process-wide default for this field.
    #[default]
    Default,
    /// Use this value.
    Explicit(T),
}

impl<T: Copy> Setting<T> {
    /// Returns the explicit value, or `fallback` for the sentinel.
    #[must_use]
    pub fn or(self, fallback: T) -> T {
        match self {
            Self::Default => fallback,
            Self::Explicit(value) => value,
        }
    }

    /// Returns `true` for the sentinel.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl<T> From<T> for Setting<T> {
    fn from(value: T) -> Self {
        Self::Explicit(value)
    }
}

/// Set of capability variants iterated in canonical order.
///
/// # Examples
///
/// ```
/// use strongly_gen::{ConverterKind, FlagSet};
///
/// let set = FlagSet::from_iter([ConverterKind::TypeConverter, ConverterKind::NewtonsoftJson]);
/// let order: Vec<_> = set.iter().collect();
/// assert_eq!(order, [ConverterKind::NewtonsoftJson, ConverterKind::TypeConverter]);
/// ```
pub struct FlagSet<K> {
    bits: u32,
    kind: PhantomData<K>,
}

impl<K: FlagKind> FlagSet<K> {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            kind: PhantomData,
        }
    }

    /// Every known variant.
    #[must_use]
    pub fn all() -> Self {
        K::iter().collect()
    }

    /// Decode a raw flag field. The `Default` bit on its own decodes to
    /// [`Setting::Default`]; `0` decodes to an explicit empty set.
    ///
    /// # Errors
    ///
    /// Returns the offending bits when unknown bits are present or when the
    /// `Default` bit is combined with other bits.
    pub fn from_bits(raw: u32) -> Result<Setting<Self>, u32> {
        if raw == DEFAULT_BIT {
            return Ok(Setting::Default);
        }
        if raw & DEFAULT_BIT != 0 {
            return Err(raw);
        }
        let known = Self::all().bits;
        let unknown = raw & !known;
        if unknown != 0 {
            return Err(unknown);
        }
        Ok(Setting::Explicit(Self {
            bits: raw,
            kind: PhantomData,
        }))
    }

    /// Raw attribute bits for the set.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Whether `kind` is present.
    #[must_use]
    pub fn contains(&self, kind: K) -> bool {
        self.bits & kind.bit() != 0
    }

    /// Add `kind` to the set.
    pub fn insert(&mut self, kind: K) {
        self.bits |= kind.bit();
    }

    /// Returns a copy of the set with `kind` added.
    #[must_use]
    pub fn with(mut self, kind: K) -> Self {
        self.insert(kind);
        self
    }

    /// Set union.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
            kind: PhantomData,
        }
    }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        K::iter().filter(|kind| self.contains(*kind))
    }
}

impl<K> Clone for FlagSet<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for FlagSet<K> {}

impl<K> PartialEq for FlagSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<K> Eq for FlagSet<K> {}

impl<K> std::hash::Hash for FlagSet<K> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<K: FlagKind> Default for FlagSet<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: FlagKind> fmt::Debug for FlagSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: FlagKind> FromIterator<K> for FlagSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl<K: FlagKind + Serialize> Serialize for FlagSet<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for kind in self.iter() {
            seq.serialize_element(&kind)?;
        }
        seq.end()
    }
}

impl<'de, K> Deserialize<'de> for FlagSet<K>
where
    K: FlagKind + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor<K>(PhantomData<K>);

        impl<'de, K> Visitor<'de> for SetVisitor<K>
        where
            K: FlagKind + Deserialize<'de>,
        {
            type Value = FlagSet<K>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a list of {} names", K::FIELD)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut set = FlagSet::empty();
                while let Some(kind) = seq.next_element::<K>()? {
                    set.insert(kind);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SetVisitor(PhantomData))
    }
}

/// Converter selection.
pub type ConverterSet = FlagSet<crate::kinds::ConverterKind>;

/// Implementation selection.
pub type ImplementationSet = FlagSet<crate::kinds::ImplementationKind>;
