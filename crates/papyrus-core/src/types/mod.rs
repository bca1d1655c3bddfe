//! The closed set of Papyrus types and the relations between them.
//!
//! ```text
//! Type
//! ├── Primitive(Bool | Int | Float | String)
//! ├── Array(element)           element is a scalar, never another array
//! ├── Object(ObjectType)       named, optional parent Object
//! ├── None                     type of the `none` literal
//! ├── Void                     "no return value"
//! └── Invokable(Signature)     function or event
//! ```
//!
//! Five relations are defined over every pair of types. None of them fail;
//! unsupported pairs answer `false`.
//!
//! | Relation | Direction | Used for |
//! |----------|-----------|----------|
//! | [`Type::is_identical`] | symmetric | type identity |
//! | [`Type::is_assignable`] | `self <- other` | implicit stores |
//! | [`Type::is_comparable`] | symmetric | `<`, `<=`, `>`, `>=` |
//! | [`Type::is_equatable`] | symmetric | `==`, `!=` |
//! | [`Type::is_convertible`] | `self -> other` | explicit `as` casts |

mod object;
mod primitive;
mod signature;

use std::fmt;
use std::sync::Arc;

pub use object::{Ancestry, ObjectType};
pub use primitive::Primitive;
pub use signature::{InvokableKind, Signature};

/// An array of scalars.
///
/// Construction rejects array and non-value element types, so nested arrays
/// cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayType {
    element: Box<Type>,
}

impl ArrayType {
    pub fn new(element: Type) -> Option<Self> {
        element.is_scalar().then(|| Self {
            element: Box::new(element),
        })
    }

    pub fn element(&self) -> &Type {
        &self.element
    }
}

/// A Papyrus type. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(Primitive),
    Array(ArrayType),
    Object(Arc<ObjectType>),
    None,
    Void,
    Invokable(Arc<Signature>),
}

impl Type {
    pub fn bool() -> Self {
        Type::Primitive(Primitive::Bool)
    }

    pub fn int() -> Self {
        Type::Primitive(Primitive::Int)
    }

    pub fn float() -> Self {
        Type::Primitive(Primitive::Float)
    }

    pub fn string() -> Self {
        Type::Primitive(Primitive::String)
    }

    /// An array over `element`, or `None` if `element` is not a scalar.
    pub fn array_of(element: Type) -> Option<Self> {
        ArrayType::new(element).map(Type::Array)
    }

    pub fn object(object: ObjectType) -> Self {
        Type::Object(Arc::new(object))
    }

    pub fn invokable(signature: Signature) -> Self {
        Type::Invokable(Arc::new(signature))
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Type::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Type::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<ObjectType>> {
        match self {
            Type::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_signature(&self) -> Option<&Arc<Signature>> {
        match self {
            Type::Invokable(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_primitive(&self, kind: Primitive) -> bool {
        self.as_primitive() == Some(kind)
    }

    pub fn is_numeric(&self) -> bool {
        self.as_primitive().is_some_and(Primitive::is_numeric)
    }

    /// Primitive, Object or None.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Type::Primitive(_) | Type::Object(_) | Type::None)
    }

    /// Anything a variable, parameter or property can hold.
    pub fn is_value(&self) -> bool {
        self.is_scalar() || matches!(self, Type::Array(_))
    }

    // ========================================================================
    // Relations
    // ========================================================================

    pub fn is_identical(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Primitive(a), Type::Primitive(b)) => a == b,
            (Type::Array(a), Type::Array(b)) => a.element().is_identical(b.element()),
            (Type::Object(a), Type::Object(b)) => a.is_identical(b),
            (Type::Invokable(a), Type::Invokable(b)) => a.is_identical(b),
            // None is identical to nothing, Void is inert.
            _ => false,
        }
    }

    /// Can a value of type `other` be stored into a slot of this type
    /// without a cast?
    pub fn is_assignable(&self, other: &Type) -> bool {
        match self {
            // None is assignable to nothing, not even the stringifying slots.
            Type::Primitive(Primitive::Bool | Primitive::String) => {
                other.is_value() && !matches!(other, Type::None)
            }
            Type::Primitive(Primitive::Int) => other.is_primitive(Primitive::Int),
            Type::Primitive(Primitive::Float) => other.is_numeric(),
            Type::Array(a) => other
                .as_array()
                .is_some_and(|b| a.element().is_identical(b.element())),
            // child -> parent widening
            Type::Object(a) => other.as_object().is_some_and(|b| b.derives_from(a)),
            Type::None | Type::Void | Type::Invokable(_) => false,
        }
    }

    /// Can the two types be ordered with `<`, `<=`, `>`, `>=`?
    pub fn is_comparable(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Primitive(a), Type::Primitive(b)) => {
                *a != Primitive::Bool
                    && *b != Primitive::Bool
                    && (self.is_assignable(other) || other.is_assignable(self))
            }
            _ => false,
        }
    }

    /// Can the two types be tested with `==` and `!=`?
    pub fn is_equatable(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Primitive(_), Type::Primitive(_)) => {
                self.is_assignable(other) || other.is_assignable(self)
            }
            (Type::Object(a), Type::Object(b)) => a.derives_from(b) || b.derives_from(a),
            (Type::Object(_), Type::None)
            | (Type::None, Type::Object(_))
            | (Type::None, Type::None) => true,
            _ => false,
        }
    }

    /// Can a value of this type be cast to `target` with `as`?
    pub fn is_convertible(&self, target: &Type) -> bool {
        match (self, target) {
            (
                Type::Primitive(_) | Type::Object(_),
                Type::Primitive(Primitive::Bool | Primitive::String),
            ) => true,
            (Type::Primitive(_), Type::Primitive(_)) => true,
            // narrowing and widening casts
            (Type::Object(a), Type::Object(b)) => a.derives_from(b) || b.derives_from(a),
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => write!(f, "{p}"),
            Type::Array(a) => write!(f, "{}[]", a.element()),
            Type::Object(o) => write!(f, "{o}"),
            Type::None => f.write_str("None"),
            Type::Void => f.write_str("Void"),
            Type::Invokable(s) => write!(f, "{s}"),
        }
    }
}

impl From<Primitive> for Type {
    fn from(value: Primitive) -> Self {
        Type::Primitive(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objects() -> (Type, Type, Type) {
        let form = Arc::new(ObjectType::new("Form".into(), None));
        let actor = ObjectType::new("Actor".into(), Some(form.clone()));
        let quest = ObjectType::new("Quest".into(), None);
        (Type::Object(form), Type::object(actor), Type::object(quest))
    }

    fn all_primitives() -> Vec<Type> {
        Primitive::ALL.into_iter().map(Type::from).collect()
    }

    #[test]
    fn arrays_reject_non_scalars() {
        let ints = Type::array_of(Type::int()).unwrap();
        assert!(Type::array_of(ints).is_none());
        assert!(Type::array_of(Type::Void).is_none());
        assert!(Type::array_of(Type::None).is_some());
    }

    #[test]
    fn int_and_float_assignability() {
        assert!(!Type::int().is_assignable(&Type::float()));
        assert!(Type::float().is_assignable(&Type::int()));
        assert!(Type::int().is_assignable(&Type::int()));
        assert!(!Type::int().is_assignable(&Type::string()));
    }

    #[test]
    fn bool_and_string_accept_any_value() {
        let (form, actor, _) = objects();
        let mut values = all_primitives();
        values.extend([form, actor, Type::array_of(Type::int()).unwrap()]);
        for value in &values {
            assert!(Type::bool().is_assignable(value), "Bool <- {value}");
            assert!(Type::string().is_assignable(value), "String <- {value}");
        }
        assert!(!Type::bool().is_assignable(&Type::Void));
    }

    #[test]
    fn ordering_excludes_bool() {
        assert!(Type::int().is_comparable(&Type::float()));
        assert!(Type::float().is_comparable(&Type::int()));
        assert!(Type::string().is_comparable(&Type::int()));
        assert!(!Type::bool().is_comparable(&Type::int()));
        assert!(!Type::int().is_comparable(&Type::bool()));
        assert!(Type::bool().is_equatable(&Type::int()));
    }

    #[test]
    fn arrays_are_inert_apart_from_identity() {
        let ints = Type::array_of(Type::int()).unwrap();
        let floats = Type::array_of(Type::float()).unwrap();
        assert!(ints.is_identical(&Type::array_of(Type::int()).unwrap()));
        assert!(!ints.is_identical(&floats));
        assert!(!floats.is_assignable(&ints));
        assert!(!ints.is_convertible(&floats));
        assert!(!ints.is_convertible(&Type::string()));
        assert!(!ints.is_comparable(&ints));
        assert!(!ints.is_equatable(&ints));
    }

    #[test]
    fn object_widening_and_casts() {
        let (form, actor, quest) = objects();
        assert!(form.is_assignable(&actor));
        assert!(!actor.is_assignable(&form));
        assert!(actor.is_convertible(&form));
        assert!(form.is_convertible(&actor));
        assert!(!actor.is_convertible(&quest));
        assert!(actor.is_equatable(&form));
        assert!(!actor.is_equatable(&quest));
        assert!(actor.is_convertible(&Type::string()));
        assert!(!actor.is_convertible(&Type::int()));
    }

    #[test]
    fn none_only_equates() {
        let (form, _, _) = objects();
        assert!(Type::None.is_equatable(&form));
        assert!(form.is_equatable(&Type::None));
        assert!(Type::None.is_equatable(&Type::None));
        assert!(!Type::None.is_identical(&Type::None));
        assert!(!form.is_assignable(&Type::None));
        assert!(!Type::bool().is_assignable(&Type::None));
        assert!(!Type::string().is_assignable(&Type::None));
        assert!(!Type::None.is_convertible(&form));
        assert!(!Type::None.is_comparable(&Type::None));
    }

    #[test]
    fn void_is_inert() {
        for other in all_primitives().into_iter().chain([Type::Void]) {
            assert!(!Type::Void.is_identical(&other));
            assert!(!Type::Void.is_assignable(&other));
            assert!(!Type::Void.is_comparable(&other));
            assert!(!Type::Void.is_equatable(&other));
            assert!(!Type::Void.is_convertible(&other));
        }
    }

    #[test]
    fn primitives_cast_freely() {
        for from in all_primitives() {
            for to in all_primitives() {
                assert!(from.is_convertible(&to), "{from} as {to}");
            }
        }
    }

    #[test]
    fn display() {
        let (_, actor, _) = objects();
        assert_eq!(Type::array_of(actor).unwrap().to_string(), "Actor[]");
        assert_eq!(Type::float().to_string(), "Float");
    }
}
