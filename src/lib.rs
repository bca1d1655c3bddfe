//! Papyrus front end: semantic analysis for Papyrus scripts.
//!
//! This crate ties together the workspace members:
//!
//! - [`core`] (`papyrus-core`): spans, names, the type lattice, literal
//!   values, errors and diagnostics
//! - [`syntax`] (`papyrus-syntax`): the arena-allocated syntax tree and its
//!   builder
//! - [`checker`] (`papyrus-checker`): scopes, symbols, script ordering and
//!   expression typing
//!
//! Most users only need [`check`] and the [`prelude`].
//!
//! ```
//! use papyrus::prelude::*;
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let base = b.script("Base.psc", "Base", None, &[]);
//! let child = b.script("Child.psc", "Child", Some("Base"), &[]);
//!
//! let mut scripts = [child, base];
//! let mut log = Diagnostics::new();
//! let (_, ok) = check(&mut log, &mut scripts);
//! assert!(ok);
//! assert_eq!(scripts[0].name.name, "Base");
//! ```

pub use papyrus_checker as checker;
pub use papyrus_core as core;
pub use papyrus_syntax as syntax;

pub use papyrus_checker::{CheckOptions, CheckResult, Checker, check};
pub use papyrus_core::{CheckError, DiagnosticSink, Diagnostics, Issue, Severity, Type};

/// Everything needed to build trees, check them and read the results.
pub mod prelude {
    pub use bumpalo::Bump;
    pub use papyrus_checker::{
        CheckOptions, CheckResult, Checker, Namespace, ScopeId, ScopeKind, Symbol, SymbolId,
        SymbolKind, check,
    };
    pub use papyrus_core::{
        CheckError, DiagnosticSink, Diagnostics, Issue, Name, ObjectType, Primitive, Severity,
        Signature, Span, Type, Value,
    };
    pub use papyrus_syntax::{
        AssignOp, AstBuilder, BinaryOp, Expr, LiteralKind, Member, NodeId, Script, Stmt, UnaryOp,
    };
}
