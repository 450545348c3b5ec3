use chomsky::{
    grammar::{GrammarDef, GrammarDefError},
    Config, Grammar,
};
use chomsky_tests::grammars;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

criterion_main!(benches);
criterion_group!(benches, bench_small, bench_long_bodies, bench_membership);

type Def = fn(&mut GrammarDef) -> Result<(), GrammarDefError>;

fn bench_small(c: &mut Criterion) {
    bench_normalize(c, "sample", grammars::sample);
    bench_normalize(c, "balanced", grammars::balanced);
    bench_normalize(c, "arithmetic", grammars::arithmetic);
}

fn bench_long_bodies(c: &mut Criterion) {
    bench_normalize(c, "nullable_chain", grammars::nullable_chain);
    bench_normalize(c, "long_bodies", grammars::long_bodies);
}

fn bench_membership(c: &mut Criterion) {
    let grammar = Grammar::define(grammars::arithmetic).unwrap();
    let cnf = Config::new().normalize(&grammar).unwrap();
    let word = cnf.word("(n+n)*n+(n*(n+n))").unwrap();
    c.bench_function("cyk_arithmetic", |b| {
        b.iter(|| black_box(cnf.accepts(black_box(&word))));
    });
}

fn bench_normalize(c: &mut Criterion, name: &str, f: Def) {
    let grammar = Grammar::define(f).unwrap();
    c.bench_function(name, |b| {
        b.iter(|| {
            let _cnf = black_box(Config::new().normalize(&grammar));
        });
    });
}
