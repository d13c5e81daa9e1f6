use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use arel::prelude::*;

fn build_query() -> SelectManager {
    let users = Table::new("users");
    let posts = Table::new("posts");

    let mut query = users.project([users.attr("id"), users.attr("name")]);
    query
        .project([posts.attr("title")])
        .join(&posts)
        .on(posts.attr("user_id").eq(users.attr("id")))
        .expect("join exists")
        .r#where(users.attr("active").eq(true))
        .r#where(users.attr("age").between(18..=65))
        .r#where(users.attr("role").eq_any(["admin", "editor", "author"]))
        .order([users.attr("name").asc()])
        .take(50);
    query
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_select", |b| b.iter(|| black_box(build_query())));
}

fn bench_render(c: &mut Criterion) {
    let query = build_query();
    let mut group = c.benchmark_group("render");

    group.bench_function("to_sql", |b| {
        b.iter(|| black_box(query.to_sql().expect("renders")))
    });

    for dialect in Dialect::ALL {
        group.bench_function(format!("compile_{dialect}"), |b| {
            b.iter(|| black_box(query.compile(dialect).expect("compiles")))
        });
    }

    group.finish();
}

fn bench_clone_and_extend(c: &mut Criterion) {
    let base = build_query();
    let users = Table::new("users");

    c.bench_function("clone_and_extend", |b| {
        b.iter_batched(
            || base.clone(),
            |mut query| {
                query.r#where(users.attr("id").gt(100));
                black_box(query.to_sql().expect("renders"))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_build, bench_render, bench_clone_and_extend);
criterion_main!(benches);
