//! Checker throughput over generated script forests.
//!
//! Trees are built once per benchmark; each iteration reorders and checks a
//! fresh copy of the script list.
//!
//! ```bash
//! cargo bench --bench check_benchmarks
//! cargo bench --features profiling -- "deep"
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use papyrus::prelude::*;
use std::hint::black_box;

/// A function that mixes locals, arithmetic, branches and inherited calls.
fn worker<'a>(b: &AstBuilder<'a>, index: usize, inherited: Option<&str>) -> Member<'a> {
    let mut body = vec![
        b.local(
            b.ty("Float"),
            "total",
            Some(b.binary(b.name("count"), BinaryOp::Mul, b.float("1.5"))),
        ),
        b.if_stmt(
            b.binary(b.name("count"), BinaryOp::Greater, b.int("10")),
            &[b.compound_assign(b.name("total"), AssignOp::SubAssign, b.int("1"))],
            &[],
            Some(b.else_block(&[b.local(b.ty("String"), "label", Some(b.string("\"low\"")))])),
        ),
        b.while_stmt(
            b.binary(b.name("count"), BinaryOp::Less, b.int("100")),
            &[b.compound_assign(b.name("count"), AssignOp::AddAssign, b.int("0x10"))],
        ),
    ];
    if let Some(parent_fn) = inherited {
        body.push(b.expr_stmt(b.call_named(parent_fn, &[b.int("1")])));
    }
    body.push(b.ret(Some(b.name("total"))));

    b.function(
        &format!("Work{index}"),
        Some(b.ty("Float")),
        &[b.param(b.ty("Int"), "count")],
        &body,
    )
    .into()
}

fn script<'a>(
    b: &AstBuilder<'a>,
    name: &str,
    parent: Option<&str>,
    functions: usize,
) -> &'a Script<'a> {
    // Properties are visible to children, so each script names its own.
    let scale = format!("{name}Scale");
    let mut members: Vec<Member<'a>> = vec![
        b.variable(b.ty("Int"), "hits", Some(b.int("0"))).into(),
        b.property(b.ty("Float"), &scale, Some(b.float_lit("2.0"))).into(),
    ];
    let inherited = parent.map(|_| "Work0");
    members.extend((0..functions).map(|i| worker(b, i, inherited)));
    let file = format!("{name}.psc");
    b.script(&file, name, parent, &members)
}

/// `count` roots, each with `children` direct children, listed children first.
fn wide_forest<'a>(b: &AstBuilder<'a>, count: usize, children: usize) -> Vec<&'a Script<'a>> {
    let mut scripts = Vec::new();
    for root in 0..count {
        let root_name = format!("Root{root}");
        for child in 0..children {
            scripts.push(script(b, &format!("Leaf{root}x{child}"), Some(&root_name), 4));
        }
        scripts.push(script(b, &root_name, None, 4));
    }
    scripts
}

/// One inheritance chain of `depth` scripts, listed deepest first.
fn deep_chain<'a>(b: &AstBuilder<'a>, depth: usize) -> Vec<&'a Script<'a>> {
    let mut scripts: Vec<_> = (0..depth)
        .map(|level| {
            let parent = level.checked_sub(1).map(|p| format!("Level{p}"));
            script(b, &format!("Level{level}"), parent.as_deref(), 4)
        })
        .collect();
    scripts.reverse();
    scripts
}

fn run(scripts: &[&Script<'_>]) -> usize {
    let mut scripts = scripts.to_vec();
    let mut log = Diagnostics::new();
    let (result, ok) = check(&mut log, &mut scripts);
    assert!(ok, "{log}");
    result.typed_node_count()
}

fn forest_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("check/forest");

    for (roots, children) in [(4, 4), (16, 8), (64, 8)] {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let scripts = wide_forest(&b, roots, children);
        group.throughput(Throughput::Elements(scripts.len() as u64));
        group.bench_function(format!("wide_{}", scripts.len()), |bench| {
            bench.iter(|| black_box(run(black_box(&scripts))));
        });
    }

    for depth in [8, 64] {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let scripts = deep_chain(&b, depth);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("deep_{depth}"), |bench| {
            bench.iter(|| black_box(run(black_box(&scripts))));
        });
    }

    group.finish();
}

fn ordering_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("check/ordering");

    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let scripts = wide_forest(&b, 128, 8);
    group.throughput(Throughput::Elements(scripts.len() as u64));
    group.bench_function("order_1152", |bench| {
        bench.iter(|| {
            let mut scripts = scripts.clone();
            let ordering = papyrus::checker::order_scripts(black_box(&mut scripts));
            black_box(ordering.len)
        });
    });

    group.finish();
}

criterion_group!(benches, forest_benchmarks, ordering_benchmarks);
criterion_main!(benches);
