//! Non-fatal findings reported alongside an emission unit.

use std::fmt;

use crate::kinds::{BackingKind, ConverterKind, ImplementationKind};

/// A requested capability, either a converter or an implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// A serialization adapter.
    Converter(ConverterKind),
    /// A behavioural contract.
    Implementation(ImplementationKind),
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converter(kind) => write!(f, "converter '{kind}'"),
            Self::Implementation(kind) => write!(f, "implementation '{kind}'"),
        }
    }
}

/// Why a requested capability was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The catalog has no fragment for the capability on this backing.
    NotApplicable(BackingKind),
    /// The capability depends on another one that was not selected.
    MissingPrerequisite(ImplementationKind),
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Generation continued; output lacks the named capability.
    Warning,
}

/// A recoverable finding: composition went ahead without `capability`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// Type the finding belongs to.
    pub type_name: String,
    /// Dropped capability.
    pub capability: Capability,
    /// Why it was dropped.
    pub reason: DropReason,
}

impl Diagnostic {
    /// Stable identifier hosts can use to filter or suppress findings.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self.reason {
            DropReason::NotApplicable(_) => "SG0001",
            DropReason::MissingPrerequisite(_) => "SG0002",
        }
    }

    /// Severity of the finding.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            DropReason::NotApplicable(backing) => write!(
                f,
                "{}: {} is not available for {backing} backing on '{}' and was omitted",
                self.id(),
                self.capability,
                self.type_name
            ),
            DropReason::MissingPrerequisite(required) => write!(
                f,
                "{}: {} on '{}' requires implementation '{required}' and was omitted",
                self.id(),
                self.capability,
                self.type_name
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn not_applicable_names_backing_and_capability() {
        let diagnostic = Diagnostic {
            type_name: "Token".into(),
            capability: Capability::Implementation(ImplementationKind::Comparable),
            reason: DropReason::NotApplicable(BackingKind::MaskedGuid),
        };
        assert_eq!(diagnostic.id(), "SG0001");
        assert_eq!(
            diagnostic.to_string(),
            "SG0001: implementation 'comparable' is not available for masked_guid backing on 'Token' and was omitted"
        );
    }

    #[rstest]
    fn missing_prerequisite_uses_its_own_id() {
        let diagnostic = Diagnostic {
            type_name: "OrderId".into(),
            capability: Capability::Implementation(ImplementationKind::ComparisonOperators),
            reason: DropReason::MissingPrerequisite(ImplementationKind::Equatable),
        };
        assert_eq!(diagnostic.id(), "SG0002");
        assert!(diagnostic.to_string().contains("requires implementation 'equatable'"));
    }

    #[rstest]
    #[case(DropReason::NotApplicable(BackingKind::String))]
    #[case(DropReason::MissingPrerequisite(ImplementationKind::Equatable))]
    fn every_finding_is_a_warning(#[case] reason: DropReason) {
        let diagnostic = Diagnostic {
            type_name: "OrderId".into(),
            capability: Capability::Converter(ConverterKind::DapperTypeHandler),
            reason,
        };
        assert_eq!(diagnostic.severity(), Severity::Warning);
    }
}
