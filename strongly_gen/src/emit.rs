//! The composed output for one type.

use sha2::{Digest, Sha256};

use crate::diagnostics::Diagnostic;

/// Role of a top-level declaration inside an [`EmissionUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DeclarationKind {
    /// The partial struct that completes the user's declaration.
    Primary,
    /// An adapter class emitted next to the struct.
    Sibling,
}

/// One top-level declaration of generated text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// Role of the declaration.
    pub kind: DeclarationKind,
    /// Declared identifier.
    pub name: String,
    /// Complete declaration text, ending with a newline.
    pub text: String,
}

/// Generated source for one type: exactly one primary declaration, any
/// number of siblings, and the diagnostics raised while composing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionUnit {
    /// File-identifying key, unique per type within a compilation.
    pub hint_name: String,
    /// Declared type name.
    pub type_name: String,
    /// Primary declaration first, then siblings in canonical converter order.
    pub declarations: Vec<Declaration>,
    /// Non-fatal findings.
    pub diagnostics: Vec<Diagnostic>,
    source: String,
}

impl EmissionUnit {
    pub(crate) const fn new(
        hint_name: String,
        type_name: String,
        declarations: Vec<Declaration>,
        diagnostics: Vec<Diagnostic>,
        source: String,
    ) -> Self {
        Self {
            hint_name,
            type_name,
            declarations,
            diagnostics,
            source,
        }
    }

    /// The full source file text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The primary struct declaration.
    #[must_use]
    pub fn primary(&self) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|decl| decl.kind == DeclarationKind::Primary)
    }

    /// Sibling declarations in emission order.
    pub fn siblings(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(|decl| decl.kind == DeclarationKind::Sibling)
    }

    /// Lowercase hex SHA-256 digest of [`EmissionUnit::source`].
    ///
    /// Equal specs produce equal fingerprints, which lets sinks skip
    /// rewriting unchanged files.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.source.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
