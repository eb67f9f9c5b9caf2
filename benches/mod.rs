use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    shell::bench_tokenize,
    shell::bench_dispatch,
    shell::bench_login
);
criterion_main!(benches);
