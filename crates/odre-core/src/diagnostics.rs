//! Per-line issues and batch statistics collected during reconstruction.
//!
//! Nothing recorded here aborts a batch. Issues carry the affected line (or
//! substation) id as their entity so a caller can report exactly what was dropped.
//!
//! # Example
//!
//! ```
//! use odre_core::diagnostics::{Diagnostics, IssueCategory};
//!
//! let mut diag = Diagnostics::new();
//! diag.add_warning(IssueCategory::MissingSubstation, "no substation found", "CAIN  L1RAMBO");
//! diag.add_error(IssueCategory::MalformedComponent, "3 endpoints", "ABCDEL31FGHIJ");
//!
//! assert_eq!(diag.warning_count(), 1);
//! assert_eq!(diag.error_count(), 1);
//! ```

use serde::Serialize;

/// Severity level for diagnostic issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The line was kept but something about it is incomplete
    Warning,
    /// The line was discarded or its association dropped
    Error,
}

/// What went wrong for a line or substation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    /// A component whose endpoint count is not exactly two
    MalformedComponent,
    /// Both candidate substations are nearest to the same end
    AmbiguousAssociation,
    /// A candidate substation id is absent from the lookup
    MissingSubstation,
    /// The identifier cannot be sliced into substation codes
    ShortIdentifier,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::MalformedComponent => "malformed-component",
            IssueCategory::AmbiguousAssociation => "ambiguous-association",
            IssueCategory::MissingSubstation => "missing-substation",
            IssueCategory::ShortIdentifier => "short-identifier",
        }
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single issue encountered while reconstructing a batch
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    /// Line or substation id the issue refers to
    pub entity: String,
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(
            f,
            "[{}:{}] {} ({})",
            severity, self.category, self.message, self.entity
        )
    }
}

/// Collection of diagnostic issues for one batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, category: IssueCategory, message: &str, entity: &str) {
        self.push(Severity::Warning, category, message, entity);
    }

    pub fn add_error(&mut self, category: IssueCategory, message: &str, entity: &str) {
        self.push(Severity::Error, category, message, entity);
    }

    fn push(&mut self, severity: Severity, category: IssueCategory, message: &str, entity: &str) {
        self.issues.push(DiagnosticIssue {
            severity,
            category,
            message: message.to_string(),
            entity: entity.to_string(),
        });
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Issues of one category, in recording order
    pub fn by_category(&self, category: IssueCategory) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(move |i| i.category == category)
    }

    /// Whether any issue was recorded for `entity`
    pub fn mentions(&self, entity: &str) -> bool {
        self.issues.iter().any(|i| i.entity == entity)
    }
}

/// Counters describing what happened to every line id of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconstructionStats {
    /// Distinct line ids seen in the segment rows
    pub total_lines: usize,
    /// Lines present in the result map
    pub reconstructed: usize,
    /// Lines whose graph is one connected component
    pub single_component: usize,
    pub single_component_discarded: usize,
    /// Lines whose graph splits into two or more components
    pub multi_component: usize,
    pub multi_component_discarded: usize,
    pub short_identifier_discarded: usize,
    pub ambiguous_associations: usize,
    /// Reconstructed lines with at least one candidate substation unknown
    pub missing_substations: usize,
}

impl ReconstructionStats {
    /// Lines that did not make it into the result map
    pub fn discarded(&self) -> usize {
        self.total_lines - self.reconstructed
    }
}
