//! Flag resolution: replaces `Default` sentinels with process-wide values.

use crate::defaults::GeneratorDefaults;
use crate::error::{StronglyError, StronglyResult};
use crate::spec::{ResolvedSpec, TypeSpec, is_identifier};

/// Produce a concrete spec by substituting `defaults` for every sentinel.
///
/// Pure: the result depends only on `spec` and `defaults`. Resolving a spec
/// that is already concrete returns the same values.
///
/// # Errors
///
/// Returns [`StronglyError::Configuration`] when the type name or a namespace
/// segment is not a valid C# identifier.
///
/// # Examples
///
/// ```
/// use strongly_gen::{BackingKind, GeneratorDefaults, TypeSpec, resolve};
///
/// let resolved = resolve(&TypeSpec::new("UserId"), &GeneratorDefaults::default())?;
/// assert_eq!(resolved.backing, BackingKind::Guid);
/// # Ok::<_, strongly_gen::StronglyError>(())
/// ```
pub fn resolve(spec: &TypeSpec, defaults: &GeneratorDefaults) -> StronglyResult<ResolvedSpec> {
    if !is_identifier(&spec.name) {
        return Err(StronglyError::configuration(
            &spec.name,
            "type name must be a C# identifier",
        ));
    }
    if let Some(namespace) = &spec.namespace
        && !namespace.split('.').all(is_identifier)
    {
        return Err(StronglyError::configuration(
            &spec.name,
            format!("namespace '{namespace}' must be dotted C# identifiers"),
        ));
    }
    Ok(ResolvedSpec {
        name: spec.name.clone(),
        namespace: spec.namespace.clone(),
        backing: spec.backing.or(defaults.backing_type),
        converters: spec.converters.or(defaults.converters),
        implementations: spec.implementations.or(defaults.implementations),
    })
}
