//! Parallel batch generation keeps failures local to their own spec.

use rstest::rstest;
use strongly_gen::{
    BackingKind, Fragment, FragmentKey, Generator, GeneratorDefaults, StronglyError,
    TemplateCatalog, TypeSpec,
};

#[rstest]
fn defects_and_bad_input_do_not_spread() {
    let broken = FragmentKey::Base(BackingKind::Long);
    let catalog = TemplateCatalog::builder()
        .extend_from(TemplateCatalog::builtin())
        .with(
            broken,
            Fragment::new()
                .with_header("readonly partial struct {{TYPE}}{{INTERFACES}}")
                .with_members("    public {{PRIMITIVE}} Value { get; }\n{{VALIDATE}}"),
        )
        .build();
    let generator = Generator::new(GeneratorDefaults::default()).with_catalog(&catalog);

    let specs = vec![
        TypeSpec::new("Alpha").with_backing(BackingKind::Int),
        TypeSpec::new("Beta").with_backing(BackingKind::Long),
        TypeSpec::new("Gamma").with_backing(BackingKind::String),
        TypeSpec::new("9Delta"),
        TypeSpec::new("Epsilon"),
    ];
    let results = generator.generate_batch(&specs);

    let outcome: Vec<&str> = results
        .iter()
        .map(|result| match result {
            Ok(_) => "ok",
            Err(err) if err.is_defect() => "defect",
            Err(StronglyError::Configuration { .. }) => "configuration",
            Err(_) => "other",
        })
        .collect();
    assert_eq!(outcome, ["ok", "defect", "ok", "configuration", "ok"]);

    for (spec, result) in specs.iter().zip(&results) {
        if let Ok(unit) = result {
            assert_eq!(unit.type_name, spec.name);
        }
    }
    assert!(matches!(
        results.get(1),
        Some(Err(StronglyError::InternalComposition { fragment, token, .. }))
            if *fragment == broken && token == "{{PRIMITIVE}}"
    ));
}

#[rstest]
fn catalog_gap_is_a_defect_for_that_type_only() {
    let gap = FragmentKey::Base(BackingKind::Decimal);
    let catalog = TemplateCatalog::builder()
        .extend_from(TemplateCatalog::builtin())
        .without(gap)
        .build();
    let generator = Generator::new(GeneratorDefaults::default()).with_catalog(&catalog);
    let results = generator.generate_batch(&[
        TypeSpec::new("Amount").with_backing(BackingKind::Decimal),
        TypeSpec::new("OrderId").with_backing(BackingKind::Int),
    ]);

    let Some(Err(err)) = results.first() else {
        panic!("decimal backing must fail without its base fragment");
    };
    assert!(err.is_defect());
    assert_eq!(err.type_name(), Some("Amount"));
    assert!(matches!(
        err,
        StronglyError::MissingFragment { fragment, .. } if *fragment == gap
    ));
    assert!(matches!(results.get(1), Some(Ok(_))));
}

#[rstest]
fn empty_batch_yields_no_results() {
    let generator = Generator::new(GeneratorDefaults::default());
    assert!(generator.generate_batch(&[]).is_empty());
}
