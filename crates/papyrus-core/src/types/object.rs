//! Script object types and their ancestor chains.

use std::fmt;
use std::sync::Arc;

use crate::Name;

/// The type introduced by a script declaration.
///
/// Objects form a singly-linked ancestor chain through `parent`. The chain is
/// acyclic: a parent is always constructed before any script extending it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectType {
    name: Name,
    parent: Option<Arc<ObjectType>>,
}

impl ObjectType {
    pub fn new(name: Name, parent: Option<Arc<ObjectType>>) -> Self {
        Self { name, parent }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<ObjectType>> {
        self.parent.as_ref()
    }

    /// Iterate over `self` followed by every ancestor, nearest first.
    pub fn ancestry(&self) -> Ancestry<'_> {
        Ancestry { next: Some(self) }
    }

    /// Same normalized name and an identical parent chain.
    pub fn is_identical(&self, other: &ObjectType) -> bool {
        if self.name.normalized() != other.name.normalized() {
            return false;
        }
        match (&self.parent, &other.parent) {
            (None, None) => true,
            (Some(a), Some(b)) => a.is_identical(b),
            _ => false,
        }
    }

    /// Whether `other` appears in this object's ancestry (itself included).
    pub fn derives_from(&self, other: &ObjectType) -> bool {
        self.ancestry().any(|ancestor| ancestor.is_identical(other))
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Iterator returned by [`ObjectType::ancestry`].
pub struct Ancestry<'a> {
    next: Option<&'a ObjectType>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a ObjectType;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (Arc<ObjectType>, Arc<ObjectType>, Arc<ObjectType>) {
        let form = Arc::new(ObjectType::new("Form".into(), None));
        let actor = Arc::new(ObjectType::new("Actor".into(), Some(form.clone())));
        let quest = Arc::new(ObjectType::new("Quest".into(), Some(form.clone())));
        (form, actor, quest)
    }

    #[test]
    fn ancestry_walks_to_root() {
        let (_, actor, _) = chain();
        let names: Vec<_> = actor.ancestry().map(|o| o.name().as_str()).collect();
        assert_eq!(names, ["Actor", "Form"]);
    }

    #[test]
    fn identity_ignores_case_but_not_parents() {
        let (form, actor, _) = chain();
        let same = ObjectType::new("ACTOR".into(), Some(form));
        let orphan = ObjectType::new("Actor".into(), None);
        assert!(actor.is_identical(&same));
        assert!(!actor.is_identical(&orphan));
    }

    #[test]
    fn derives_from_ancestors_only() {
        let (form, actor, quest) = chain();
        assert!(actor.derives_from(&form));
        assert!(actor.derives_from(&actor));
        assert!(!form.derives_from(&actor));
        assert!(!actor.derives_from(&quest));
    }
}
