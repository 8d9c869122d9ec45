//! Loading process-wide defaults from files and the environment.

use anyhow::Result;
use camino::Utf8Path;
use rstest::rstest;
use strongly_gen::{
    BackingKind, ConverterKind, ConverterSet, Generator, GeneratorDefaults, ImplementationKind,
    StronglyError, TypeSpec, load_defaults,
};
use test_helpers::figment::{figment_error, with_jail};

#[rstest]
fn built_in_values_apply_without_sources() -> Result<()> {
    let defaults = with_jail(|_| load_defaults(None).map_err(figment_error))?;
    assert_eq!(defaults, GeneratorDefaults::default());
    Ok(())
}

#[rstest]
fn file_values_replace_built_ins() -> Result<()> {
    let defaults = with_jail(|jail| {
        jail.create_file(
            "strongly.toml",
            r#"
backing_type = "long"
converters = ["system_text_json", "ef_core_value_converter"]
"#,
        )?;
        load_defaults(None).map_err(figment_error)
    })?;
    assert_eq!(defaults.backing_type, BackingKind::Long);
    assert_eq!(
        defaults.converters,
        ConverterSet::from_iter([
            ConverterKind::SystemTextJson,
            ConverterKind::EfCoreValueConverter,
        ])
    );
    assert_eq!(
        defaults.implementations,
        GeneratorDefaults::default().implementations
    );
    Ok(())
}

#[rstest]
fn environment_overrides_the_file() -> Result<()> {
    let defaults = with_jail(|jail| {
        jail.create_file("custom.toml", r#"backing_type = "long""#)?;
        jail.set_env("STRONGLY_BACKING_TYPE", "string");
        load_defaults(Some(Utf8Path::new("custom.toml"))).map_err(figment_error)
    })?;
    assert_eq!(defaults.backing_type, BackingKind::String);
    Ok(())
}

#[rstest]
#[case(
    "[system_text_json, dapper_type_handler]",
    &[ConverterKind::SystemTextJson, ConverterKind::DapperTypeHandler]
)]
#[case("[type_converter]", &[ConverterKind::TypeConverter])]
#[case("[]", &[])]
fn environment_lists_replace_flag_sets(
    #[case] value: &str,
    #[case] expected: &[ConverterKind],
) -> Result<()> {
    let defaults = with_jail(|jail| {
        jail.create_file("strongly.toml", r#"converters = ["newtonsoft_json"]"#)?;
        jail.set_env("STRONGLY_CONVERTERS", value);
        jail.set_env("STRONGLY_IMPLEMENTATIONS", "[]");
        load_defaults(None).map_err(figment_error)
    })?;
    assert_eq!(
        defaults.converters,
        expected.iter().copied().collect::<ConverterSet>()
    );
    assert!(defaults.implementations.is_empty());
    Ok(())
}

#[rstest]
#[case("[default]")]
#[case("[system_text_json, default]")]
fn sentinel_inside_an_environment_list_is_rejected(#[case] value: &str) -> Result<()> {
    let outcome = with_jail(|jail| {
        jail.set_env("STRONGLY_CONVERTERS", value);
        Ok(load_defaults(None))
    })?;
    let message = outcome.err().map(|err| err.to_string()).unwrap_or_default();
    assert!(
        message.contains("'converters' is set to 'default'"),
        "{message}"
    );
    Ok(())
}

#[rstest]
fn missing_explicit_file_is_rejected() -> Result<()> {
    let outcome = with_jail(|_| Ok(load_defaults(Some(Utf8Path::new("absent.toml")))))?;
    assert!(matches!(outcome, Err(StronglyError::Configuration { .. })));
    Ok(())
}

#[rstest]
#[case(r#"backing_type = "default""#, "must be concrete")]
#[case(r#"implementations = ["equatable", "sortable"]"#, "unknown implementations value 'sortable'")]
fn invalid_file_values_are_reported(#[case] contents: &str, #[case] expected: &str) -> Result<()> {
    let outcome = with_jail(|jail| {
        jail.create_file("strongly.toml", contents)?;
        Ok(load_defaults(None))
    })?;
    let message = outcome.err().map(|err| err.to_string()).unwrap_or_default();
    assert!(message.contains(expected), "{message}");
    Ok(())
}

#[rstest]
fn loaded_defaults_drive_generation() -> Result<()> {
    let defaults = with_jail(|jail| {
        jail.create_file(
            "strongly.toml",
            r#"
backing_type = "decimal"
converters = []
implementations = ["equatable", "comparison_operators"]
"#,
        )?;
        load_defaults(None).map_err(figment_error)
    })?;
    let unit = Generator::new(defaults).generate(&TypeSpec::new("Amount"))?;
    assert!(unit.source().contains("public decimal Value { get; }"));
    assert!(unit.source().contains("operator >=(Amount a, Amount b)"));
    assert!(unit.siblings().next().is_none());
    assert_eq!(
        defaults.implementations.iter().collect::<Vec<_>>(),
        [
            ImplementationKind::Equatable,
            ImplementationKind::ComparisonOperators
        ]
    );
    Ok(())
}
