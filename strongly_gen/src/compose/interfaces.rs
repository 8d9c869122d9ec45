//! Interface clause for the struct header.

use crate::kinds::ImplementationKind;

/// Interface clause for `implementations`, such as `" : A, B"`.
///
/// Contracts keep the order of first appearance and repeats are dropped.
/// The result still carries the type-name placeholder and is empty when no
/// implementation contributes a contract.
pub(super) fn clause(implementations: impl IntoIterator<Item = ImplementationKind>) -> String {
    let mut contracts: Vec<&'static str> = Vec::new();
    for contract in implementations
        .into_iter()
        .flat_map(|kind| kind.interfaces().iter().copied())
    {
        if !contracts.contains(&contract) {
            contracts.push(contract);
        }
    }
    if contracts.is_empty() {
        String::new()
    } else {
        format!(" : {}", contracts.join(", "))
    }
}
