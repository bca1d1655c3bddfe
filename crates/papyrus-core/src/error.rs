//! Error types for semantic analysis.
//!
//! ```text
//! CheckError
//! ├── Internal            - an invariant the checker guarantees was broken
//! ├── declaration errors  - collisions, inheritance, scopes, types
//! ├── expression errors   - resolution, member access, casts, operators
//! └── Literal(LiteralError)
//! ```
//!
//! Every variant carries the [`Span`] of the offending node and maps to a
//! stable issue identifier through [`CheckError::id`].

use thiserror::Error;

use crate::{Severity, Span};

// ============================================================================
// Literal Errors
// ============================================================================

/// A literal's source text could not be parsed into a value of its kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("'{text}' is not a valid Bool literal")]
    Bool { text: String, span: Span },

    #[error("'{text}' is not a valid Int literal")]
    Int { text: String, span: Span },

    #[error("'{text}' is not a valid Float literal")]
    Float { text: String, span: Span },

    #[error("{text} is not a valid String literal")]
    String { text: String, span: Span },
}

impl LiteralError {
    pub fn span(&self) -> Span {
        match self {
            LiteralError::Bool { span, .. }
            | LiteralError::Int { span, .. }
            | LiteralError::Float { span, .. }
            | LiteralError::String { span, .. } => *span,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            LiteralError::Bool { .. } => "SEMA3001",
            LiteralError::Int { .. } => "SEMA3002",
            LiteralError::Float { .. } => "SEMA3003",
            LiteralError::String { .. } => "SEMA3004",
        }
    }
}

// ============================================================================
// Check Errors
// ============================================================================

/// Everything the checker can report about its input, plus internal faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The checker's own bookkeeping is inconsistent.
    #[error("internal error: {message}")]
    Internal { message: String, span: Span },

    // ------------------------------------------------------------------------
    // Declarations and ordering
    // ------------------------------------------------------------------------
    #[error("'{name}' is already declared as a {existing} in this scope")]
    NameCollision {
        name: String,
        /// Kind of the symbol already holding the name.
        existing: &'static str,
        span: Span,
        /// Where the existing symbol was declared, when known.
        previous: Option<Span>,
    },

    #[error("script '{script}' extends unknown script '{parent}'")]
    UnknownParent {
        script: String,
        parent: String,
        span: Span,
    },

    #[error("script '{script}' is part of an inheritance cycle through '{parent}'")]
    InheritanceCycle {
        script: String,
        parent: String,
        span: Span,
    },

    #[error("a {declaration} cannot be declared in a {scope} scope")]
    UnsupportedInScope {
        declaration: &'static str,
        scope: &'static str,
        span: Span,
    },

    #[error("unknown type '{name}'")]
    UnresolvedType { name: String, span: Span },

    #[error("array length '{length}' must be an Int between 1 and {max}")]
    ArrayLength { length: String, max: u32, span: Span },

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------
    #[error("unknown identifier '{name}'")]
    UnresolvedIdentifier { name: String, span: Span },

    #[error("unknown function '{name}'")]
    UnresolvedFunction { name: String, span: Span },

    #[error("cannot access members of non-object type '{found}'")]
    NotAnObject { found: String, span: Span },

    #[error("'{name}' is an event and cannot be called directly")]
    EventNotCallable { name: String, span: Span },

    #[error("variable '{name}' is private to script '{owner}'")]
    PrivateVariable {
        name: String,
        owner: String,
        span: Span,
    },

    #[error("cannot index non-array type '{found}'")]
    TargetNotArray { found: String, span: Span },

    #[error("array index must be Int, found '{found}'")]
    IndexNotInt { found: String, span: Span },

    #[error("cannot cast '{from}' to '{to}'")]
    NotConvertible { from: String, to: String, span: Span },

    #[error("operator '{op}' requires Int or Float, found '{found}'")]
    NotNumeric {
        op: &'static str,
        found: String,
        span: Span,
    },

    #[error("no operator '{op}' for types '{left}' and '{right}'")]
    OperatorMismatch {
        op: &'static str,
        left: String,
        right: String,
        span: Span,
    },

    #[error("'{name}' expects {min} to {max} argument(s), got {got}")]
    ArgumentCount {
        name: String,
        min: usize,
        max: usize,
        got: usize,
        span: Span,
    },

    #[error("argument {index} of '{name}' expects '{expected}', found '{found}'")]
    ArgumentMismatch {
        name: String,
        index: usize,
        expected: String,
        found: String,
        span: Span,
    },

    #[error("expected '{expected}', found '{found}'")]
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("expression cannot be assigned to")]
    NotAssignable { span: Span },

    #[error("{message}")]
    ReturnMismatch { message: String, span: Span },

    #[error("script '{script}' has no parent")]
    NoParent { script: String, span: Span },

    #[error("type '{ty}' has no member '{member}'")]
    UnknownMember {
        member: String,
        ty: String,
        span: Span,
    },

    #[error(transparent)]
    Literal(#[from] LiteralError),
}

impl CheckError {
    pub fn internal(message: impl Into<String>, span: Span) -> Self {
        CheckError::Internal {
            message: message.into(),
            span,
        }
    }

    /// Stable four-letter, four-digit identifier.
    pub fn id(&self) -> &'static str {
        match self {
            CheckError::Internal { .. } => "SEMA0001",
            CheckError::NameCollision { .. } => "SEMA1001",
            CheckError::UnknownParent { .. } => "SEMA1002",
            CheckError::InheritanceCycle { .. } => "SEMA1003",
            CheckError::UnsupportedInScope { .. } => "SEMA1004",
            CheckError::UnresolvedType { .. } => "SEMA1005",
            CheckError::ArrayLength { .. } => "SEMA1006",
            CheckError::UnresolvedIdentifier { .. } => "SEMA2001",
            CheckError::UnresolvedFunction { .. } => "SEMA2002",
            CheckError::NotAnObject { .. } => "SEMA2003",
            CheckError::EventNotCallable { .. } => "SEMA2004",
            CheckError::PrivateVariable { .. } => "SEMA2005",
            CheckError::TargetNotArray { .. } => "SEMA2006",
            CheckError::IndexNotInt { .. } => "SEMA2007",
            CheckError::NotConvertible { .. } => "SEMA2008",
            CheckError::NotNumeric { .. } => "SEMA2009",
            CheckError::OperatorMismatch { .. } => "SEMA2010",
            CheckError::ArgumentCount { .. } => "SEMA2011",
            CheckError::ArgumentMismatch { .. } => "SEMA2012",
            CheckError::TypeMismatch { .. } => "SEMA2013",
            CheckError::NotAssignable { .. } => "SEMA2014",
            CheckError::ReturnMismatch { .. } => "SEMA2015",
            CheckError::NoParent { .. } => "SEMA2016",
            CheckError::UnknownMember { .. } => "SEMA2017",
            CheckError::Literal(e) => e.id(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            CheckError::Internal { .. } => Severity::Internal,
            _ => Severity::Error,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CheckError::Internal { span, .. }
            | CheckError::NameCollision { span, .. }
            | CheckError::UnknownParent { span, .. }
            | CheckError::InheritanceCycle { span, .. }
            | CheckError::UnsupportedInScope { span, .. }
            | CheckError::UnresolvedType { span, .. }
            | CheckError::ArrayLength { span, .. }
            | CheckError::UnresolvedIdentifier { span, .. }
            | CheckError::UnresolvedFunction { span, .. }
            | CheckError::NotAnObject { span, .. }
            | CheckError::EventNotCallable { span, .. }
            | CheckError::PrivateVariable { span, .. }
            | CheckError::TargetNotArray { span, .. }
            | CheckError::IndexNotInt { span, .. }
            | CheckError::NotConvertible { span, .. }
            | CheckError::NotNumeric { span, .. }
            | CheckError::OperatorMismatch { span, .. }
            | CheckError::ArgumentCount { span, .. }
            | CheckError::ArgumentMismatch { span, .. }
            | CheckError::TypeMismatch { span, .. }
            | CheckError::NotAssignable { span }
            | CheckError::ReturnMismatch { span, .. }
            | CheckError::NoParent { span, .. }
            | CheckError::UnknownMember { span, .. } => *span,
            CheckError::Literal(e) => e.span(),
        }
    }

    /// Secondary locations worth showing next to the primary span.
    pub fn related(&self) -> Vec<Span> {
        match self {
            CheckError::NameCollision {
                previous: Some(previous),
                ..
            } => vec![*previous],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_well_formed() {
        let errors = [
            CheckError::internal("x", Span::default()),
            CheckError::NotAssignable { span: Span::default() },
            LiteralError::Int {
                text: "1x".into(),
                span: Span::default(),
            }
            .into(),
        ];
        for error in errors {
            let id = error.id();
            assert_eq!(id.len(), 8);
            assert!(id[..4].chars().all(|c| c.is_ascii_uppercase()));
            assert!(id[4..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn severity_and_span() {
        let span = Span::new(4, 2, 3);
        let internal = CheckError::internal("missing scope", span);
        assert_eq!(internal.severity(), Severity::Internal);
        assert_eq!(internal.span(), span);

        let literal: CheckError = LiteralError::Bool {
            text: "True1".into(),
            span,
        }
        .into();
        assert_eq!(literal.severity(), Severity::Error);
        assert_eq!(literal.id(), "SEMA3001");
        assert_eq!(literal.span(), span);
    }

    #[test]
    fn messages() {
        let err = CheckError::NotConvertible {
            from: "Quest".into(),
            to: "Actor".into(),
            span: Span::new(2, 5, 1),
        };
        assert_eq!(err.to_string(), "cannot cast 'Quest' to 'Actor'");
    }

    #[test]
    fn collision_reports_previous_declaration() {
        let err = CheckError::NameCollision {
            name: "foo".into(),
            existing: "script",
            span: Span::new(1, 1, 3),
            previous: Some(Span::new(9, 1, 3)),
        };
        assert_eq!(err.related(), vec![Span::new(9, 1, 3)]);
    }
}
