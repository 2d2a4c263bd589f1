//! Pipeline benchmarks for bc.
//!
//! Measures each stage separately and the whole compile across input sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use bc_codegen::CodegenConfig;
use bc_parse::ParseConfig;
use bcc::{compile, CompileConfig};

fn parse_config() -> ParseConfig {
    ParseConfig {
        arena_capacity: 64 * 1024 * 1024,
    }
}

/// Generate N two-parameter functions, each called once at the top level.
fn generate_n_functions(n: usize) -> String {
    let mut source = String::from("int total;\n");
    for i in 0..n {
        source.push_str(&format!(
            "fn int f{i}(int a, int b) {{\n    int c = a * {i};\n    while c > b {{ c = c - 1; }}\n    return c + b;\n}}\n"
        ));
        source.push_str(&format!("total = total + f{i}({i}, 2);\n"));
    }
    source
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer/scaling");
    for size in &[10, 100, 1000] {
        let source = generate_n_functions(*size);
        group.bench_with_input(BenchmarkId::new("functions", size), &source, |b, src| {
            b.iter(|| black_box(bc_lexer::lex(src)));
        });
    }
    group.finish();
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/scaling");
    let config = parse_config();
    for size in &[10, 100, 1000] {
        let tokens = bc_lexer::lex(&generate_n_functions(*size));
        group.bench_with_input(BenchmarkId::new("functions", size), &tokens, |b, tokens| {
            b.iter(|| black_box(bc_parse::parse(tokens, &config)));
        });
    }
    group.finish();
}

fn bench_codegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("codegen/scaling");
    let config = CodegenConfig::default();
    for size in &[10, 100, 1000] {
        let tokens = bc_lexer::lex(&generate_n_functions(*size));
        let Ok(program) = bc_parse::parse(&tokens, &parse_config()) else {
            panic!("benchmark input failed to parse");
        };
        group.bench_with_input(BenchmarkId::new("functions", size), &program, |b, program| {
            b.iter(|| black_box(bc_codegen::generate(program, &config)));
        });
    }
    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let config = CompileConfig {
        parse: parse_config(),
        ..CompileConfig::default()
    };
    let source = generate_n_functions(100);
    c.bench_function("compile/100_functions", |b| {
        b.iter(|| black_box(compile(&source, &config)));
    });
}

criterion_group!(benches, bench_lexer, bench_parser, bench_codegen, bench_compile);
criterion_main!(benches);
