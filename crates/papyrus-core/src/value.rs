//! Parsed literal values.

use std::fmt;

use ordered_float::OrderedFloat;

use crate::{Primitive, Type};

/// The value of a primitive literal after parsing its source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(OrderedFloat<f32>),
    String(String),
}

impl Value {
    pub fn primitive(&self) -> Primitive {
        match self {
            Value::Bool(_) => Primitive::Bool,
            Value::Int(_) => Primitive::Int,
            Value::Float(_) => Primitive::Float,
            Value::String(_) => Primitive::String,
        }
    }

    pub fn ty(&self) -> Type {
        Type::Primitive(self.primitive())
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(v.into_inner()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{}", v.into_inner()),
            Value::String(v) => write!(f, "{v:?}"),
        }
    }
}
