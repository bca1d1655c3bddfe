//! Relations of the type lattice, exercised through the public API.

use std::sync::Arc;

use papyrus::checker::{binary_result, is_acceptable};
use papyrus::prelude::*;

struct Hierarchy {
    form: Type,
    reference: Type,
    actor: Type,
    quest: Type,
}

fn hierarchy() -> Hierarchy {
    let form = Arc::new(ObjectType::new("Form".into(), None));
    let reference = Arc::new(ObjectType::new("ObjectReference".into(), Some(form.clone())));
    let actor = Arc::new(ObjectType::new("Actor".into(), Some(reference.clone())));
    let quest = Arc::new(ObjectType::new("Quest".into(), Some(form.clone())));
    Hierarchy {
        form: Type::Object(form),
        reference: Type::Object(reference),
        actor: Type::Object(actor),
        quest: Type::Object(quest),
    }
}

fn int_array() -> Type {
    Type::array_of(Type::int()).unwrap()
}

#[test]
fn primitive_assignability() {
    let cases = [
        (Type::int(), Type::int(), true),
        (Type::int(), Type::float(), false),
        (Type::float(), Type::int(), true),
        (Type::float(), Type::float(), true),
        (Type::bool(), Type::int(), true),
        (Type::bool(), Type::string(), true),
        (Type::string(), Type::float(), true),
        (Type::string(), int_array(), true),
        (Type::int(), Type::bool(), false),
        (Type::int(), Type::None, false),
        (Type::float(), Type::string(), false),
        (Type::bool(), Type::None, false),
        (Type::string(), Type::None, false),
    ];
    for (target, value, expected) in cases {
        assert_eq!(
            target.is_assignable(&value),
            expected,
            "{target} <- {value}"
        );
    }
}

#[test]
fn objects_widen_towards_ancestors() {
    let h = hierarchy();
    assert!(h.form.is_assignable(&h.actor));
    assert!(h.reference.is_assignable(&h.actor));
    assert!(h.actor.is_assignable(&h.actor));
    assert!(!h.actor.is_assignable(&h.form));
    assert!(!h.quest.is_assignable(&h.actor));
    assert!(!h.actor.is_assignable(&Type::None));
}

#[test]
fn casts_go_up_or_down_but_not_across() {
    let h = hierarchy();
    assert!(h.actor.is_convertible(&h.form));
    assert!(h.form.is_convertible(&h.actor));
    assert!(!h.actor.is_convertible(&h.quest));
    assert!(!h.quest.is_convertible(&h.reference));

    assert!(h.actor.is_convertible(&Type::string()));
    assert!(h.actor.is_convertible(&Type::bool()));
    assert!(!h.actor.is_convertible(&Type::int()));
    assert!(Type::string().is_convertible(&Type::int()));
    assert!(Type::float().is_convertible(&Type::int()));
    assert!(!int_array().is_convertible(&Type::string()));
}

#[test]
fn identity_compares_names_and_chains() {
    let h = hierarchy();
    let renamed = Type::object(ObjectType::new(
        "ACTOR".into(),
        h.reference.as_object().cloned(),
    ));
    let orphan = Type::object(ObjectType::new("Actor".into(), None));

    assert!(h.actor.is_identical(&renamed));
    assert!(!h.actor.is_identical(&orphan));
    assert!(int_array().is_identical(&int_array()));
    assert!(!int_array().is_identical(&Type::array_of(Type::float()).unwrap()));
    assert!(!Type::None.is_identical(&Type::None));
    assert!(!Type::Void.is_identical(&Type::Void));
}

#[test]
fn ancestry_lists_nearest_first() {
    let h = hierarchy();
    let chain: Vec<String> = h
        .actor
        .as_object()
        .unwrap()
        .ancestry()
        .map(|object| object.name().to_string())
        .collect();
    assert_eq!(chain, ["Actor", "ObjectReference", "Form"]);
}

#[test]
fn arrays_hold_scalars_only() {
    let h = hierarchy();
    assert!(Type::array_of(h.actor.clone()).is_some());
    assert!(Type::array_of(int_array()).is_none());
    assert!(Type::array_of(Type::Void).is_none());

    let actors = Type::array_of(h.actor.clone()).unwrap();
    let forms = Type::array_of(h.form.clone()).unwrap();
    // Element types must match exactly.
    assert!(!forms.is_assignable(&actors));
    assert_eq!(actors.to_string(), "Actor[]");
}

#[test]
fn comparison_and_equality() {
    let h = hierarchy();
    assert!(Type::int().is_comparable(&Type::float()));
    assert!(Type::string().is_comparable(&Type::int()));
    assert!(!Type::bool().is_comparable(&Type::bool()));
    assert!(!h.actor.is_comparable(&h.actor));

    assert!(Type::bool().is_equatable(&Type::bool()));
    assert!(h.actor.is_equatable(&h.form));
    assert!(!h.actor.is_equatable(&h.quest));
    assert!(h.quest.is_equatable(&Type::None));
    assert!(!Type::int().is_equatable(&Type::None));
}

#[test]
fn operator_results() {
    let h = hierarchy();
    let cases = [
        (BinaryOp::Add, Type::int(), Type::int(), Some(Type::int())),
        (BinaryOp::Div, Type::int(), Type::float(), Some(Type::float())),
        (BinaryOp::Add, Type::string(), h.actor.clone(), Some(Type::string())),
        (BinaryOp::Sub, Type::string(), Type::int(), None),
        (BinaryOp::Mod, Type::int(), Type::int(), Some(Type::int())),
        (BinaryOp::Mod, Type::float(), Type::int(), None),
        (BinaryOp::Less, Type::int(), Type::float(), Some(Type::bool())),
        (BinaryOp::Equal, h.actor.clone(), Type::None, Some(Type::bool())),
        (BinaryOp::And, h.actor.clone(), Type::int(), Some(Type::bool())),
        (BinaryOp::Or, Type::Void, Type::int(), None),
    ];
    for (op, left, right, expected) in cases {
        assert_eq!(
            binary_result(op, &left, &right),
            expected,
            "{left} {} {right}",
            op.as_str()
        );
    }
}

#[test]
fn none_is_acceptable_in_object_slots_only() {
    let h = hierarchy();
    assert!(is_acceptable(&h.actor, &Type::None));
    assert!(!is_acceptable(&Type::int(), &Type::None));
    assert!(!is_acceptable(&int_array(), &Type::None));
    assert!(!is_acceptable(&Type::bool(), &Type::None));
    assert!(!is_acceptable(&Type::string(), &Type::None));
    assert!(is_acceptable(&h.form, &h.quest));
}

#[test]
fn checked_scripts_share_one_lattice() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let mut scripts = [
        b.script("Actor.psc", "Actor", Some("ObjectReference"), &[]),
        b.script("Form.psc", "Form", None, &[]),
        b.script("ObjectReference.psc", "ObjectReference", Some("Form"), &[]),
    ];

    let mut log = Diagnostics::new();
    let (result, ok) = check(&mut log, &mut scripts);
    assert!(ok, "{log}");

    let actor = result.symbol_of(scripts[2].id).and_then(|s| s.ty.clone()).unwrap();
    let form = result.symbol_of(scripts[0].id).and_then(|s| s.ty.clone()).unwrap();
    assert!(form.is_assignable(&actor));
    assert!(!actor.is_assignable(&form));
    assert!(actor.is_identical(&hierarchy().actor));
}
