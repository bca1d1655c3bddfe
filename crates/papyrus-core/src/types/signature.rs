//! Function and event signatures.

use std::fmt;

use super::Type;
use crate::Name;

/// Whether an invokable is a callable function or an engine-raised event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvokableKind {
    Function,
    Event,
}

impl fmt::Display for InvokableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokableKind::Function => f.write_str("Function"),
            InvokableKind::Event => f.write_str("Event"),
        }
    }
}

/// The type of a function or event symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    kind: InvokableKind,
    name: Name,
    params: Vec<Type>,
    /// Leading parameters without a default value.
    required: usize,
    /// Absent for events and for functions without a return value.
    return_type: Option<Type>,
}

impl Signature {
    pub fn function(name: Name, params: Vec<Type>, return_type: Option<Type>) -> Self {
        let required = params.len();
        Self {
            kind: InvokableKind::Function,
            name,
            params,
            required,
            return_type,
        }
    }

    pub fn event(name: Name, params: Vec<Type>) -> Self {
        let required = params.len();
        Self {
            kind: InvokableKind::Event,
            name,
            params,
            required,
            return_type: None,
        }
    }

    /// Record how many leading parameters must be supplied by a caller.
    ///
    /// Clamped to the parameter count. Not part of signature identity.
    pub fn with_required(mut self, required: usize) -> Self {
        self.required = required.min(self.params.len());
        self
    }

    pub fn kind(&self) -> InvokableKind {
        self.kind
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn params(&self) -> &[Type] {
        &self.params
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn return_type(&self) -> Option<&Type> {
        self.return_type.as_ref()
    }

    /// Equal normalized names, identical return types and a pairwise
    /// identical parameter list.
    pub fn is_identical(&self, other: &Signature) -> bool {
        if self.kind != other.kind || self.name.normalized() != other.name.normalized() {
            return false;
        }
        let returns_match = match (&self.return_type, &other.return_type) {
            (None, None) => true,
            (Some(a), Some(b)) => a.is_identical(b),
            _ => false,
        };
        returns_match
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.is_identical(b))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ret) = &self.return_type {
            write!(f, "{ret} ")?;
        }
        write!(f, "{} {}(", self.kind, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}
