//! Result types of binary operators and the implicit store rule.

use papyrus_core::{Primitive, Type};
use papyrus_syntax::BinaryOp;

/// Type produced by `left op right`, or `None` when the operator does not
/// apply to the operands.
///
/// | Operator | Operands | Result |
/// |----------|----------|--------|
/// | `+` | either String | String |
/// | `+ - * /` | both numeric | Float if either is Float, else Int |
/// | `%` | both Int | Int |
/// | `< <= > >=` | comparable | Bool |
/// | `== !=` | equatable | Bool |
/// | `&& \|\|` | any values | Bool |
pub fn binary_result(op: BinaryOp, left: &Type, right: &Type) -> Option<Type> {
    match op {
        BinaryOp::Or | BinaryOp::And => {
            (left.is_value() && right.is_value()).then(Type::bool)
        }
        BinaryOp::Equal | BinaryOp::NotEqual => left.is_equatable(right).then(Type::bool),
        BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
            left.is_comparable(right).then(Type::bool)
        }
        BinaryOp::Add
            if left.is_primitive(Primitive::String) || right.is_primitive(Primitive::String) =>
        {
            (left.is_value() && right.is_value()).then(Type::string)
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => numeric(left, right),
        BinaryOp::Mod => (left.is_primitive(Primitive::Int) && right.is_primitive(Primitive::Int))
            .then(Type::int),
    }
}

fn numeric(left: &Type, right: &Type) -> Option<Type> {
    if !(left.is_numeric() && right.is_numeric()) {
        return None;
    }
    if left.is_primitive(Primitive::Float) || right.is_primitive(Primitive::Float) {
        Some(Type::float())
    } else {
        Some(Type::int())
    }
}

/// May `value` be stored into a slot of type `target`?
///
/// Assignability, plus `none` into object slots.
pub fn is_acceptable(target: &Type, value: &Type) -> bool {
    target.is_assignable(value) || (matches!(value, Type::None) && target.as_object().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use papyrus_core::ObjectType;

    fn actor() -> Type {
        Type::object(ObjectType::new("Actor".into(), None))
    }

    #[test]
    fn arithmetic_widens_to_float() {
        assert_eq!(binary_result(BinaryOp::Add, &Type::int(), &Type::int()), Some(Type::int()));
        assert_eq!(
            binary_result(BinaryOp::Mul, &Type::int(), &Type::float()),
            Some(Type::float())
        );
        assert_eq!(binary_result(BinaryOp::Sub, &Type::bool(), &Type::int()), None);
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            binary_result(BinaryOp::Add, &Type::string(), &Type::int()),
            Some(Type::string())
        );
        assert_eq!(
            binary_result(BinaryOp::Add, &actor(), &Type::string()),
            Some(Type::string())
        );
        assert_eq!(binary_result(BinaryOp::Sub, &Type::string(), &Type::string()), None);
    }

    #[test]
    fn modulo_is_int_only() {
        assert_eq!(binary_result(BinaryOp::Mod, &Type::int(), &Type::int()), Some(Type::int()));
        assert_eq!(binary_result(BinaryOp::Mod, &Type::float(), &Type::int()), None);
    }

    #[test]
    fn comparisons() {
        assert_eq!(
            binary_result(BinaryOp::Less, &Type::int(), &Type::float()),
            Some(Type::bool())
        );
        assert_eq!(binary_result(BinaryOp::Greater, &Type::bool(), &Type::bool()), None);
        assert_eq!(
            binary_result(BinaryOp::Equal, &actor(), &Type::None),
            Some(Type::bool())
        );
        assert_eq!(binary_result(BinaryOp::NotEqual, &actor(), &Type::int()), None);
    }

    #[test]
    fn logical_operators_take_any_value() {
        assert_eq!(binary_result(BinaryOp::And, &actor(), &Type::int()), Some(Type::bool()));
        assert_eq!(binary_result(BinaryOp::Or, &Type::Void, &Type::bool()), None);
    }

    #[test]
    fn none_fills_object_slots() {
        assert!(is_acceptable(&actor(), &Type::None));
        assert!(!is_acceptable(&Type::int(), &Type::None));
        assert!(is_acceptable(&Type::float(), &Type::int()));
        assert!(!is_acceptable(&Type::int(), &Type::float()));
    }
}
