//! The checking driver.
//!
//! A run has four phases. Each one only starts once every script has been
//! through the previous one, so bodies can see every declaration.
//!
//! ```text
//! order_scripts     parents before children, duplicates set aside
//!      │            (unknown parent or cycle: stop here)
//!      ▼
//! script pass       one Script symbol per script in Global
//!      ▼
//! member pass       variables, properties, states, function signatures
//!      ▼
//! body pass         parameters, local scopes, statements, expression types
//! ```
//!
//! Failures are logged and the walk moves on. A failed node gets an absent
//! entry in the [`CheckResult`] so that later lookups of it fail quietly
//! instead of cascading.

mod decl;
mod expr;
mod operators;
mod stmt;

use papyrus_core::{CheckError, DiagnosticSink, Issue, Span, Type};
use papyrus_syntax::{InvokableDecl, Script};
use tracing::{debug, instrument};

use crate::ordering::order_scripts;
use crate::result::CheckResult;
use crate::scope::{ScopeId, ScopeTree, SymbolId};
use crate::CheckOptions;

pub use operators::{binary_result, is_acceptable};

/// Runs the checker with a fixed set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checker {
    options: CheckOptions,
}

impl Checker {
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Check `scripts`, reordering the slice so parents precede children.
    ///
    /// Every failure is pushed to `log`. Returns the result table and whether
    /// the run was free of Error and Internal issues.
    #[instrument(skip_all, fields(scripts = scripts.len()))]
    pub fn run<'ast>(
        &self,
        log: &mut dyn DiagnosticSink,
        scripts: &mut [&'ast Script<'ast>],
    ) -> (CheckResult, bool) {
        let mut ctx = CheckContext::new(self.options, log);

        let ordering = order_scripts(scripts);
        for issue in ordering.issues {
            ctx.file = issue.file;
            ctx.report(issue.error);
        }
        if ordering.fatal {
            debug!("ordering failed, skipping later phases");
            return ctx.finish();
        }
        let scripts = &scripts[..ordering.len];

        let mut declared = Vec::with_capacity(scripts.len());
        for script in scripts {
            if let Some(symbol) = ctx.declare_script(*script) {
                declared.push((*script, symbol));
            }
        }

        for (script, symbol) in declared {
            ctx.declare_members(script, symbol);
        }

        ctx.check_bodies();
        ctx.finish()
    }
}

/// A function or event whose body waits for the body pass.
#[derive(Debug, Clone)]
struct PendingBody<'ast> {
    decl: &'ast InvokableDecl<'ast>,
    /// Scope opened by the function, or an unowned one if it failed.
    scope: ScopeId,
    file: &'ast str,
    script: SymbolId,
    /// Parameter types resolved during the member pass, absent where
    /// resolution failed.
    params: Vec<Option<Type>>,
}

/// Mutable state shared by all passes of one run.
struct CheckContext<'log, 'ast> {
    options: CheckOptions,
    log: &'log mut dyn DiagnosticSink,
    result: CheckResult,
    failed: bool,
    issues: usize,
    /// File of the script being checked, for issue locations.
    file: &'ast str,
    /// Script being checked, for `Self` and variable privacy.
    script: Option<SymbolId>,
    pending: Vec<PendingBody<'ast>>,
}

impl<'log, 'ast> CheckContext<'log, 'ast> {
    fn new(options: CheckOptions, log: &'log mut dyn DiagnosticSink) -> Self {
        Self {
            options,
            log,
            result: CheckResult::new(),
            failed: false,
            issues: 0,
            file: "",
            script: None,
            pending: Vec::new(),
        }
    }

    fn tree(&self) -> &ScopeTree {
        self.result.scope_tree()
    }

    fn tree_mut(&mut self) -> &mut ScopeTree {
        self.result.scope_tree_mut()
    }

    fn enter_script(&mut self, file: &'ast str, script: SymbolId) {
        self.file = file;
        self.script = Some(script);
    }

    fn report(&mut self, error: CheckError) {
        let issue = Issue::from_error(self.file, &error);
        self.failed |= issue.is_failure();
        self.issues += 1;
        self.log.push(issue);
    }

    /// Report `error` and yield the absent result.
    fn fail<T>(&mut self, error: CheckError) -> Option<T> {
        self.report(error);
        None
    }

    fn internal<T>(&mut self, message: impl Into<String>, span: Span) -> Option<T> {
        self.fail(CheckError::internal(message, span))
    }

    /// Scope a symbol opened, or an internal failure.
    fn defined_scope(&mut self, symbol: SymbolId, span: Span) -> Option<ScopeId> {
        match self.tree().symbol(symbol).defines {
            Some(scope) => Some(scope),
            None => {
                let name = self.tree().symbol(symbol).name.to_string();
                self.internal(format!("'{name}' has no scope"), span)
            }
        }
    }

    fn finish(self) -> (CheckResult, bool) {
        debug!(
            issues = self.issues,
            failed = self.failed,
            scopes = self.result.scope_tree().scope_count(),
            symbols = self.result.scope_tree().symbol_count(),
            "check finished"
        );
        (self.result, !self.failed)
    }
}
