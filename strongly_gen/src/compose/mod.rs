//! Composition of selected fragments into one emission unit.
//!
//! Layout of the produced source:
//!
//! ```text
//! // <auto-generated/>
//! #nullable enable
//!
//! namespace Shop.Orders;
//!
//! [attributes]
//! readonly partial struct OrderId : <interfaces>
//! {
//!     <base, implementation and nested converter members>
//! }
//!
//! <sibling adapter classes>
//! ```
//!
//! Composition is pure: identical inputs yield byte-identical output.

mod interfaces;
mod tokens;

use crate::catalog::{Fragment, FragmentKey, INTERFACES_TOKEN, TemplateCatalog, VALIDATE_TOKEN};
use crate::compat::Selection;
use crate::emit::{Declaration, DeclarationKind, EmissionUnit};
use crate::error::{StronglyError, StronglyResult};
use crate::spec::ResolvedSpec;

const FILE_PREAMBLE: &str = "// <auto-generated/>\n#nullable enable\n";

/// Compose the fragments chosen by `selection` into an [`EmissionUnit`].
///
/// # Errors
///
/// Returns [`StronglyError::InternalComposition`] when a fragment leaves a
/// placeholder unresolved or the Base fragment lacks one of its slots, and
/// [`StronglyError::MissingFragment`] when `selection` names a key `catalog`
/// does not hold or does not start with the Base key for the backing.
pub fn compose(
    spec: &ResolvedSpec,
    selection: &Selection,
    catalog: &TemplateCatalog,
) -> StronglyResult<EmissionUnit> {
    let fragments = gather(spec, selection, catalog)?;
    let expected_base = FragmentKey::Base(spec.backing);
    let Some(&(base_key, base)) = fragments.first().filter(|(key, _)| *key == expected_base)
    else {
        return Err(StronglyError::missing_fragment(&spec.name, expected_base));
    };
    let name = spec.name.as_str();

    let header_template = base
        .header()
        .filter(|text| text.contains(INTERFACES_TOKEN))
        .ok_or_else(|| tokens::defect(name, base_key, INTERFACES_TOKEN))?;
    let base_members = base
        .members()
        .filter(|text| text.contains(VALIDATE_TOKEN))
        .ok_or_else(|| tokens::defect(name, base_key, VALIDATE_TOKEN))?;

    let mut hook = String::new();
    for (key, fragment) in &fragments {
        if let Some(text) = fragment.hook() {
            hook.push_str(&tokens::render(name, *key, text)?);
        }
    }

    let interface_clause = interfaces::clause(selection.implementations());
    let header = tokens::render(
        name,
        base_key,
        &header_template.replace(INTERFACES_TOKEN, &interface_clause),
    )?;

    let mut members = vec![tokens::render(
        name,
        base_key,
        &base_members.replace(VALIDATE_TOKEN, &hook),
    )?];
    let extras = fragments
        .iter()
        .filter(|(key, _)| matches!(key, FragmentKey::Implementation(..)))
        .chain(
            fragments
                .iter()
                .filter(|(key, _)| matches!(key, FragmentKey::Converter(..))),
        );
    for (key, fragment) in extras {
        if let Some(text) = fragment.members() {
            members.push(tokens::render(name, *key, text)?);
        }
    }

    let mut primary = String::new();
    for (key, fragment) in fragments.iter().skip(1) {
        if let Some(text) = fragment.attribute() {
            primary.push_str(&tokens::render(name, *key, text)?);
            primary.push('\n');
        }
    }
    primary.push_str(&header);
    primary.push_str("\n{\n");
    primary.push_str(&members.join("\n"));
    primary.push_str("}\n");

    let mut declarations = vec![Declaration {
        kind: DeclarationKind::Primary,
        name: spec.name.clone(),
        text: primary,
    }];
    for (key, fragment) in fragments.iter().skip(1) {
        if let Some(template) = fragment.sibling() {
            let text = tokens::render(name, *key, template)?;
            let sibling_name = declared_name(&text).unwrap_or(name).to_owned();
            declarations.push(Declaration {
                kind: DeclarationKind::Sibling,
                name: sibling_name,
                text,
            });
        }
    }

    let source = assemble(spec.namespace.as_deref(), &declarations);
    tracing::debug!(
        type_name = name,
        declarations = declarations.len(),
        bytes = source.len(),
        "composed emission unit"
    );
    Ok(EmissionUnit::new(
        spec.hint_name(),
        spec.name.clone(),
        declarations,
        selection.diagnostics.clone(),
        source,
    ))
}

fn gather<'c>(
    spec: &ResolvedSpec,
    selection: &Selection,
    catalog: &'c TemplateCatalog,
) -> StronglyResult<Vec<(FragmentKey, &'c Fragment)>> {
    selection
        .keys
        .iter()
        .map(|&key| {
            catalog
                .lookup(key)
                .map(|fragment| (key, fragment))
                .ok_or_else(|| StronglyError::missing_fragment(&spec.name, key))
        })
        .collect()
}

fn assemble(namespace: Option<&str>, declarations: &[Declaration]) -> String {
    let mut source = String::from(FILE_PREAMBLE);
    source.push('\n');
    if let Some(ns) = namespace {
        source.push_str("namespace ");
        source.push_str(ns);
        source.push_str(";\n\n");
    }
    let texts: Vec<&str> = declarations.iter().map(|decl| decl.text.as_str()).collect();
    source.push_str(&texts.join("\n"));
    source
}

/// Identifier declared by a top-level type declaration.
fn declared_name(text: &str) -> Option<&str> {
    let mut words = text.split_whitespace();
    words.find(|word| matches!(*word, "class" | "struct" | "record" | "interface"))?;
    let word = words.next()?;
    let end = word
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(word.len());
    word.get(..end).filter(|ident| !ident.is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::compat::select;
    use crate::flags::{ConverterSet, ImplementationSet};
    use crate::kinds::{BackingKind, ConverterKind, ImplementationKind};

    const fn int_base_key() -> FragmentKey {
        FragmentKey::Base(BackingKind::Int)
    }

    #[fixture]
    fn tiny_catalog() -> TemplateCatalog {
        TemplateCatalog::builder()
            .with(
                int_base_key(),
                Fragment::new()
                    .with_header("readonly partial struct {{TYPE}}{{INTERFACES}}")
                    .with_members("    void Validate()\n    {\n{{VALIDATE}}    }\n"),
            )
            .with(
                FragmentKey::Implementation(BackingKind::Int, ImplementationKind::Equatable),
                Fragment::new().with_members("    bool Equals({{TYPE}} other);\n"),
            )
            .with(
                FragmentKey::Implementation(BackingKind::Int, ImplementationKind::Validation),
                Fragment::new().with_hook("        check();\n"),
            )
            .with(
                FragmentKey::Converter(BackingKind::Int, ConverterKind::TypeConverter),
                Fragment::new()
                    .with_attribute("[Convert(typeof({{TYPE}}Converter))]")
                    .with_sibling("class {{TYPE}}Converter\n{\n}\n"),
            )
            .build()
    }

    fn resolved(
        converters: &[ConverterKind],
        implementations: &[ImplementationKind],
    ) -> ResolvedSpec {
        ResolvedSpec {
            name: "Sample".into(),
            namespace: Some("Acme.Ids".into()),
            backing: BackingKind::Int,
            converters: converters.iter().copied().collect::<ConverterSet>(),
            implementations: implementations.iter().copied().collect::<ImplementationSet>(),
        }
    }

    fn compose_with(
        catalog: &TemplateCatalog,
        spec: &ResolvedSpec,
    ) -> StronglyResult<EmissionUnit> {
        let selection = select(spec, catalog)?;
        compose(spec, &selection, catalog)
    }

    #[rstest]
    fn lays_out_the_whole_file(tiny_catalog: TemplateCatalog) {
        let spec = resolved(
            &[ConverterKind::TypeConverter],
            &[ImplementationKind::Equatable, ImplementationKind::Validation],
        );
        let unit = compose_with(&tiny_catalog, &spec).expect("compose");
        let expected = "\
// <auto-generated/>
#nullable enable

namespace Acme.Ids;

[Convert(typeof(SampleConverter))]
readonly partial struct Sample : System.IEquatable<Sample>, System.Numerics.IEqualityOperators<Sample, Sample, bool>
{
    void Validate()
    {
        check();
    }

    bool Equals(Sample other);
}

class SampleConverter
{
}
";
        assert_eq!(unit.source(), expected);
        assert_eq!(unit.hint_name, "Acme.Ids.Sample.g.cs");
        assert_eq!(
            unit.siblings().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            ["SampleConverter"]
        );
    }

    #[rstest]
    fn empty_hook_without_validation(tiny_catalog: TemplateCatalog) {
        let unit = compose_with(&tiny_catalog, &resolved(&[], &[])).expect("compose");
        assert!(unit.source().contains("    void Validate()\n    {\n    }\n"));
        assert!(unit.source().contains("readonly partial struct Sample\n{"));
    }

    #[rstest]
    fn leftover_token_is_an_internal_error(tiny_catalog: TemplateCatalog) {
        let broken_key =
            FragmentKey::Implementation(BackingKind::Int, ImplementationKind::Equatable);
        let catalog = TemplateCatalog::builder()
            .extend_from(&tiny_catalog)
            .with(
                broken_key,
                Fragment::new().with_members("    {{PRIMITIVE}} Raw => Value;\n"),
            )
            .build();
        let err = compose_with(&catalog, &resolved(&[], &[ImplementationKind::Equatable]))
            .expect_err("leftover");
        assert!(err.is_defect());
        assert!(matches!(
            err,
            StronglyError::InternalComposition { fragment, .. } if fragment == broken_key
        ));
    }

    #[rstest]
    #[case(
        Fragment::new()
            .with_header("readonly partial struct {{TYPE}}")
            .with_members("{{VALIDATE}}"),
        INTERFACES_TOKEN
    )]
    #[case(
        Fragment::new()
            .with_header("readonly partial struct {{TYPE}}{{INTERFACES}}")
            .with_members("    int Value;\n"),
        VALIDATE_TOKEN
    )]
    fn base_without_a_slot_is_an_internal_error(
        #[case] base: Fragment,
        #[case] missing: &str,
    ) {
        let catalog = TemplateCatalog::builder().with(int_base_key(), base).build();
        let err = compose_with(&catalog, &resolved(&[], &[])).expect_err("missing slot");
        assert!(matches!(
            err,
            StronglyError::InternalComposition { ref token, .. } if token == missing
        ));
    }

    #[rstest]
    fn selection_from_another_catalog_is_rejected(tiny_catalog: TemplateCatalog) {
        let spec = resolved(&[ConverterKind::TypeConverter], &[]);
        let selection = select(&spec, &tiny_catalog).expect("select");
        let other = TemplateCatalog::builder()
            .extend_from(&tiny_catalog)
            .without(FragmentKey::Converter(
                BackingKind::Int,
                ConverterKind::TypeConverter,
            ))
            .build();
        let err = compose(&spec, &selection, &other).expect_err("mismatch");
        assert!(err.is_defect());
        assert!(matches!(
            err,
            StronglyError::MissingFragment {
                fragment: FragmentKey::Converter(BackingKind::Int, ConverterKind::TypeConverter),
                ..
            }
        ));
    }

    #[rstest]
    fn selection_for_another_backing_is_rejected(tiny_catalog: TemplateCatalog) {
        let spec = resolved(&[], &[]);
        let selection = Selection {
            keys: vec![FragmentKey::Implementation(
                BackingKind::Int,
                ImplementationKind::Equatable,
            )],
            diagnostics: Vec::new(),
        };
        let err = compose(&spec, &selection, &tiny_catalog).expect_err("no base first");
        assert!(matches!(
            err,
            StronglyError::MissingFragment { fragment, .. } if fragment == int_base_key()
        ));
    }

    #[rstest]
    #[case("class OrderIdTypeConverter : Base\n{", Some("OrderIdTypeConverter"))]
    #[case("public sealed class Handler<T>", Some("Handler"))]
    #[case("// nothing here", None)]
    fn reads_declared_names(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(declared_name(text), expected);
    }
}
