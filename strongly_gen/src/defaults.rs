//! Process-wide fallback configuration.
//!
//! [`GeneratorDefaults`] has the same shape as [`crate::TypeSpec`] but cannot
//! hold the `Default` sentinel. It is resolved once per generation pass and
//! threaded explicitly into [`crate::resolve()`]; nothing here is global state.
//!
//! Defaults are layered with Figment: built-in values, then an optional TOML
//! file, then `STRONGLY_`-prefixed environment variables.
//!
//! ```toml
//! backing_type = "int"
//! converters = ["system_text_json"]
//! implementations = ["equatable", "comparable", "parsable"]
//! ```

use std::str::FromStr;

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{StronglyError, StronglyResult};
use crate::flags::{ConverterSet, FlagSet, ImplementationSet};
use crate::kinds::{BackingKind, ConverterKind, FlagKind, ImplementationKind};

/// File consulted by [`load_defaults`] when no explicit path is given.
pub const DEFAULTS_FILE: &str = "strongly.toml";

/// Environment prefix consulted by [`load_defaults`].
pub const ENV_PREFIX: &str = "STRONGLY_";

const SENTINEL: &str = "default";

/// Concrete fallback values for fields left at the `Default` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratorDefaults {
    /// Backing used when a spec does not name one.
    pub backing_type: BackingKind,
    /// Converters used when a spec does not name any.
    pub converters: ConverterSet,
    /// Implementations used when a spec does not name any.
    pub implementations: ImplementationSet,
}

impl Default for GeneratorDefaults {
    /// Guid backing, Newtonsoft.Json plus `TypeConverter`, equality plus
    /// comparison.
    fn default() -> Self {
        Self {
            backing_type: BackingKind::Guid,
            converters: ConverterSet::from_iter([
                ConverterKind::NewtonsoftJson,
                ConverterKind::TypeConverter,
            ]),
            implementations: ImplementationSet::from_iter([
                ImplementationKind::Equatable,
                ImplementationKind::Comparable,
            ]),
        }
    }
}

impl GeneratorDefaults {
    /// Extract defaults from a caller-assembled Figment.
    ///
    /// Absent keys keep their built-in values.
    ///
    /// # Errors
    ///
    /// Returns [`StronglyError::Gathering`] when extraction fails and
    /// [`StronglyError::Configuration`] when a value is unknown or names the
    /// `default` sentinel.
    pub fn from_figment(figment: &Figment) -> StronglyResult<Self> {
        let layered = Figment::from(Serialized::defaults(DefaultsLayer::from(Self::default())))
            .merge(figment.clone());
        let layer: DefaultsLayer = layered.extract().map_err(StronglyError::gathering)?;
        Self::try_from(layer)
    }
}

/// Load defaults from `path` (or [`DEFAULTS_FILE`] when absent) and the
/// environment.
///
/// A missing [`DEFAULTS_FILE`] is not an error; a missing explicit `path` is.
///
/// # Errors
///
/// Returns [`StronglyError::Configuration`] for a missing explicit file or an
/// invalid value and [`StronglyError::Gathering`] for malformed input.
pub fn load_defaults(path: Option<&Utf8Path>) -> StronglyResult<GeneratorDefaults> {
    let file = match path {
        Some(explicit) if !explicit.is_file() => {
            return Err(StronglyError::configuration(
                "",
                format!("defaults file '{explicit}' does not exist"),
            ));
        }
        Some(explicit) => explicit,
        None => Utf8Path::new(DEFAULTS_FILE),
    };
    let figment = Figment::new()
        .merge(Toml::file(file.as_std_path()))
        .merge(Env::prefixed(ENV_PREFIX));
    let defaults = GeneratorDefaults::from_figment(&figment)?;
    tracing::debug!(file = %file, ?defaults, "resolved generator defaults");
    Ok(defaults)
}

/// Untyped defaults layer as read from files and the environment.
///
/// Values are kept as names so the `default` sentinel can be rejected with a
/// precise message rather than a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DefaultsLayer {
    backing_type: String,
    converters: Vec<String>,
    implementations: Vec<String>,
}

impl From<GeneratorDefaults> for DefaultsLayer {
    fn from(defaults: GeneratorDefaults) -> Self {
        Self {
            backing_type: defaults.backing_type.to_string(),
            converters: names(defaults.converters),
            implementations: names(defaults.implementations),
        }
    }
}

impl TryFrom<DefaultsLayer> for GeneratorDefaults {
    type Error = StronglyError;

    fn try_from(layer: DefaultsLayer) -> StronglyResult<Self> {
        Ok(Self {
            backing_type: parse_name::<BackingKind>("backing_type", &layer.backing_type)?,
            converters: parse_set::<ConverterKind>(&layer.converters)?,
            implementations: parse_set::<ImplementationKind>(&layer.implementations)?,
        })
    }
}

fn names<K: FlagKind + AsRef<str>>(set: FlagSet<K>) -> Vec<String> {
    set.iter().map(|kind| kind.as_ref().to_owned()).collect()
}

fn parse_name<T: FromStr>(field: &str, raw: &str) -> StronglyResult<T> {
    let name = raw.trim();
    if name.eq_ignore_ascii_case(SENTINEL) {
        return Err(StronglyError::configuration(
            "",
            format!("defaults must be concrete; '{field}' is set to '{SENTINEL}'"),
        ));
    }
    T::from_str(name)
        .map_err(|_| StronglyError::configuration("", format!("unknown {field} value '{name}'")))
}

fn parse_set<K: FlagKind + FromStr>(raw: &[String]) -> StronglyResult<FlagSet<K>> {
    raw.iter()
        .map(|name| parse_name::<K>(K::FIELD, name))
        .collect()
}
