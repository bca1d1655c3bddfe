//! Diagnostic issues and the append-only log they are written to.
//!
//! The checker never prints anything. It converts each [`crate::CheckError`]
//! into an [`Issue`] and pushes it into a [`DiagnosticSink`] supplied by the
//! caller. [`Diagnostics`] is the collecting sink used by default.
//!
//! # Example
//!
//! ```
//! use papyrus_core::{CheckError, DiagnosticSink, Diagnostics, Issue, Span};
//!
//! let mut log = Diagnostics::new();
//! let error = CheckError::UnresolvedType {
//!     name: "Actr".into(),
//!     span: Span::new(3, 1, 4),
//! };
//! log.push(Issue::from_error("quest.psc", &error));
//!
//! assert!(log.has_errors());
//! assert_eq!(
//!     log.iter().next().unwrap().to_string(),
//!     "quest.psc:3:1: error[SEMA1005]: unknown type 'Actr'"
//! );
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::{CheckError, Span};

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// The checker broke one of its own invariants. A bug report, not a
    /// problem with the input.
    Internal,
    /// The input is invalid.
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Internal => f.write_str("internal"),
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
            Severity::Info => f.write_str("info"),
        }
    }
}

/// A secondary location attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedLocation {
    pub file: String,
    pub span: Span,
}

/// A single structured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Stable identifier such as `SEMA1001`.
    pub id: &'static str,
    pub severity: Severity,
    /// The script source the span refers to.
    pub file: String,
    pub span: Span,
    /// Free-text detail.
    pub detail: Option<String>,
    pub related: Vec<RelatedLocation>,
}

impl Issue {
    /// Build an issue for `error`, located in `file`.
    ///
    /// Related spans are assumed to lie in the same file.
    pub fn from_error(file: impl Into<String>, error: &CheckError) -> Self {
        let file = file.into();
        let related = error
            .related()
            .into_iter()
            .map(|span| RelatedLocation {
                file: file.clone(),
                span,
            })
            .collect();
        Self {
            id: error.id(),
            severity: error.severity(),
            file,
            span: error.span(),
            detail: Some(error.to_string()),
            related,
        }
    }

    /// Internal and Error issues fail a run.
    pub fn is_failure(&self) -> bool {
        matches!(self.severity, Severity::Internal | Severity::Error)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}[{}]",
            self.file, self.span, self.severity, self.id
        )?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

/// Anything that accepts issues. Implementations must preserve push order.
pub trait DiagnosticSink {
    fn push(&mut self, issue: Issue);
}

impl DiagnosticSink for Vec<Issue> {
    fn push(&mut self, issue: Issue) {
        Vec::push(self, issue);
    }
}

/// An ordered, append-only collection of issues.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    issues: VecDeque<Issue>,
    failures: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if any Error or Internal issue was pushed.
    pub fn has_errors(&self) -> bool {
        self.failures > 0
    }

    pub fn has_internal(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == Severity::Internal)
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn error_count(&self) -> usize {
        self.failures
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// Issues carrying the given identifier, in push order.
    pub fn with_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues.iter().filter(move |issue| issue.id == id)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_failure())
    }

    pub fn clear(&mut self) {
        self.issues.clear();
        self.failures = 0;
    }
}

impl DiagnosticSink for Diagnostics {
    fn push(&mut self, issue: Issue) {
        if issue.is_failure() {
            self.failures += 1;
        }
        self.issues.push_back(issue);
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Issue;
    type IntoIter = std::collections::vec_deque::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
