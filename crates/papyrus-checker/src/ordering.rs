//! Script ordering.
//!
//! Scripts are checked parents first. The ordering is a breadth-first walk
//! of the inheritance forest: roots in input order, then each script's
//! children in input order.
//!
//! ```text
//! input:  C extends B, A, B extends A
//! forest: A
//!         └── B
//!             └── C
//! order:  A, B, C
//! ```

use std::collections::VecDeque;

use papyrus_core::{CheckError, normalize};
use papyrus_syntax::Script;
use rustc_hash::FxHashMap;
use tracing::trace;

/// A failure found while ordering, with the file it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingIssue<'ast> {
    pub file: &'ast str,
    pub error: CheckError,
}

/// Outcome of [`order_scripts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ordering<'ast> {
    /// Number of leading scripts in the reordered slice that should be
    /// checked. Duplicates sit after them.
    pub len: usize,
    pub issues: Vec<OrderingIssue<'ast>>,
    /// An unknown parent or a cycle was found. Later phases must not run.
    pub fatal: bool,
}

impl Ordering<'_> {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Reorder `scripts` in place so that every parent precedes its children.
///
/// A repeated name keeps its first-seen script; later ones are reported and
/// moved to the tail. Every input script appears exactly once in the
/// result, including members of a cycle.
pub fn order_scripts<'ast>(scripts: &mut [&'ast Script<'ast>]) -> Ordering<'ast> {
    let count = scripts.len();
    let mut ordering = Ordering::default();

    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();
    let mut duplicate = vec![false; count];
    for (index, script) in scripts.iter().enumerate() {
        match by_name.get(&normalize(script.name.name)) {
            Some(&first) => {
                duplicate[index] = true;
                ordering.issues.push(OrderingIssue {
                    file: script.file,
                    error: CheckError::NameCollision {
                        name: script.name.name.to_owned(),
                        existing: "script",
                        span: script.name.span,
                        previous: Some(scripts[first].name.span),
                    },
                });
            }
            None => {
                by_name.insert(normalize(script.name.name), index);
            }
        }
    }

    // parent index per script, and the forest's child lists
    let mut parent_of: Vec<Option<usize>> = vec![None; count];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut roots = Vec::new();
    for (index, script) in scripts.iter().enumerate() {
        if duplicate[index] {
            continue;
        }
        let Some(parent) = script.parent else {
            roots.push(index);
            continue;
        };
        match by_name.get(&normalize(parent.name)) {
            Some(&p) => {
                parent_of[index] = Some(p);
                children[p].push(index);
            }
            None => {
                ordering.fatal = true;
                ordering.issues.push(OrderingIssue {
                    file: script.file,
                    error: CheckError::UnknownParent {
                        script: script.name.name.to_owned(),
                        parent: parent.name.to_owned(),
                        span: parent.span,
                    },
                });
                roots.push(index);
            }
        }
    }

    let mut order = Vec::with_capacity(count);
    let mut seen = vec![false; count];
    let mut queue = VecDeque::new();
    let mut walk = |starts: &[usize],
                    order: &mut Vec<usize>,
                    seen: &mut Vec<bool>,
                    ordering: &mut Ordering<'ast>| {
        for &start in starts {
            seen[start] = true;
            queue.push_back(start);
        }
        while let Some(current) = queue.pop_front() {
            order.push(current);
            for &child in &children[current] {
                if seen[child] {
                    let script = scripts[child];
                    ordering.fatal = true;
                    ordering.issues.push(OrderingIssue {
                        file: script.file,
                        error: CheckError::InheritanceCycle {
                            script: script.name.name.to_owned(),
                            parent: scripts[current].name.name.to_owned(),
                            span: script.parent.map_or(script.name.span, |p| p.span),
                        },
                    });
                    continue;
                }
                seen[child] = true;
                queue.push_back(child);
            }
        }
    };

    walk(&roots, &mut order, &mut seen, &mut ordering);

    // Anything left hangs off a cycle. Restart from a cycle member so the
    // cycle edge is the one reported.
    for index in 0..count {
        if seen[index] || duplicate[index] {
            continue;
        }
        let mut on_path = vec![false; count];
        let mut current = index;
        while !on_path[current] {
            on_path[current] = true;
            match parent_of[current] {
                Some(parent) if !seen[parent] => current = parent,
                _ => break,
            }
        }
        walk(&[current], &mut order, &mut seen, &mut ordering);
        if !seen[index] {
            walk(&[index], &mut order, &mut seen, &mut ordering);
        }
    }

    ordering.len = order.len();
    order.extend((0..count).filter(|&i| duplicate[i]));

    let reordered: Vec<&'ast Script<'ast>> = order.iter().map(|&i| scripts[i]).collect();
    scripts.copy_from_slice(&reordered);

    trace!(
        order = ?scripts[..ordering.len].iter().map(|s| s.name.name).collect::<Vec<_>>(),
        duplicates = count - ordering.len,
        "scripts ordered"
    );
    ordering
}
