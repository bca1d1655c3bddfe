//! Papyrus semantic checker.
//!
//! Takes the syntax trees of a set of scripts and resolves every name,
//! computes every expression's type and reports what does not fit.
//!
//! ## Modules
//!
//! - [`scope`]: Scope tree, namespaced symbol tables, `resolve`/`lookup`
//! - [`ordering`]: Parents-first script ordering with cycle detection
//! - [`literal`]: Literal spelling to [`papyrus_core::Value`]
//! - [`result`]: Per-node symbols, scopes, types and values
//! - [`options`]: What beyond resolution gets validated
//!
//! ## Example
//!
//! ```
//! use bumpalo::Bump;
//! use papyrus_checker::check;
//! use papyrus_core::{Diagnostics, Type};
//! use papyrus_syntax::AstBuilder;
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let answer = b.int("42");
//! let run = b.function("Run", Some(b.ty("Int")), &[], &[b.ret(Some(answer))]);
//! let script = b.script("Quest.psc", "MyQuest", None, &[run.into()]);
//!
//! let mut log = Diagnostics::new();
//! let (result, ok) = check(&mut log, &mut [script]);
//! assert!(ok, "{log}");
//! assert_eq!(result.type_of(answer.id()), Some(&Type::int()));
//! ```

mod check;
pub mod literal;
pub mod options;
pub mod ordering;
pub mod result;
pub mod scope;

use papyrus_core::DiagnosticSink;
use papyrus_syntax::Script;

pub use check::{Checker, binary_result, is_acceptable};
pub use literal::parse_literal;
pub use options::CheckOptions;
pub use ordering::{Ordering, OrderingIssue, order_scripts};
pub use result::CheckResult;
pub use scope::{
    Declaration, Namespace, Scope, ScopeId, ScopeKind, ScopeTree, Symbol, SymbolId, SymbolKind,
    SymbolKinds,
};

/// Check `scripts` with the default [`CheckOptions`].
///
/// The slice is reordered so that parents precede children. Returns the
/// result table and `true` when no Error or Internal issue was logged.
pub fn check<'ast>(
    log: &mut dyn DiagnosticSink,
    scripts: &mut [&'ast Script<'ast>],
) -> (CheckResult, bool) {
    Checker::default().run(log, scripts)
}
