//! Unit tests for error classification and rendering.

use rstest::rstest;

use super::StronglyError;
use crate::catalog::FragmentKey;
use crate::kinds::{BackingKind, ImplementationKind};

#[rstest]
fn configuration_errors_name_the_type() {
    let err = StronglyError::configuration("OrderId", "bad name");
    assert_eq!(err.type_name(), Some("OrderId"));
    assert_eq!(
        err.to_string(),
        "invalid configuration for 'OrderId': bad name"
    );
}

#[rstest]
#[case(0x80)]
#[case(0x3)]
fn invalid_bits_render_as_hex(#[case] bits: u32) {
    let err = StronglyError::unknown_bits("OrderId", "converters", bits);
    assert_eq!(
        err.to_string(),
        format!("invalid converters bits {bits:#x} on 'OrderId'")
    );
}

#[rstest]
fn only_composition_failures_are_defects() {
    let defect = StronglyError::internal_composition(
        "OrderId",
        FragmentKey::Implementation(BackingKind::Int, ImplementationKind::Comparable),
        "{{OOPS}}",
    );
    assert!(defect.is_defect());
    assert!(!StronglyError::configuration("OrderId", "x").is_defect());
}

#[rstest]
fn missing_fragments_are_defects_scoped_to_one_type() {
    let err = StronglyError::missing_fragment("Amount", FragmentKey::Base(BackingKind::Decimal));
    assert!(err.is_defect());
    assert!(err.is_unit_scoped());
    assert_eq!(err.type_name(), Some("Amount"));
    assert_eq!(
        err.to_string(),
        "catalog has no fragment base/decimal needed to compose 'Amount'"
    );
}

#[rstest]
#[case(StronglyError::configuration("A", "m"), true)]
#[case(StronglyError::unknown_bits("A", "implementations", 1 << 9), true)]
#[case(StronglyError::gathering(figment::Error::from("boom")), false)]
fn unit_scope_classification(#[case] err: StronglyError, #[case] scoped: bool) {
    assert_eq!(err.is_unit_scoped(), scoped);
}

#[rstest]
fn gathering_round_trips_through_figment() {
    let err = StronglyError::gathering(figment::Error::from("boom"));
    let back: figment::Error = err.into();
    assert!(back.to_string().contains("boom"));
}
