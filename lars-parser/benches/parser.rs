use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lars_parser::lexer::Lexer;
use lars_parser::parser::Parser;

fn program(source: &str) {
    let mut parser = Parser::new(source);
    let _ast = parser.parse_program();
    assert!(parser.errors().has_no_errors());
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| program(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = "1".to_string();
    for _i in 0..200 {
        source.push_str(" == 2 < 3 + 5 * 5");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| program(&source)));
}

fn tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    let mut source = String::new();
    for _i in 0..500 {
        source.push_str("let value = if (1.5 >= 2) { -3 } else { 4 % 2 };\n");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("tokenize", |b| b.iter(|| Lexer::new(&source).count()));
}

criterion_group!(benches, long_expr, stress_precedence, tokenize);
criterion_main!(benches);
