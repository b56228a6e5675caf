use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xpr_core::{compile, lexer::Lexer, merge::MergeOrchestrator, Manifest};

// ============================================================================
// Test Data: Varying Complexity and Size
// ============================================================================

const TINY_XPR: &str = "@name TINY, @includes { /, } /title,";

const SMALL_XPR: &str = r"
@name SMALL,
@includes { /posts, }
POST /article {
    TITLE /h1,
    LINK /a [href],
}
";

const MEDIUM_XPR: &str = r"
% Blog section
@name MEDIUM,
@includes { /posts, /drafts, }
@excludes { /posts/archive, }

%- Post pages: header block plus a repeated tag list -%
POST /html/body/article {
    HEADER /header {
        TITLE /h1,
        AUTHOR /span[@class='author'],
        DATE /time [datetime],
    }
    TAGS /ul[@class='tags'] * {
        TAG /li,
        TAG_LINK /li/a [href],
    }
    BODY /div[@class='content'] 'prose',
}
SIDEBAR /aside * [data-id],
";

/// `size` sibling blocks, each with a nested block and a few leaves.
fn generate_large_xpr(size: usize) -> String {
    let mut source = String::from("@name LARGE,\n@includes { /a, /b, }\n");
    for i in 0..size {
        source.push_str(&format!(
            "BLOCK_{i} /section[{i}] * {{\n    HEAD_{i} /h2,\n    ITEMS_{i} /ul {{\n        ITEM /li [data-{i}],\n        LABEL /span 'label',\n    }}\n}}\n"
        ));
    }
    source
}

// ============================================================================
// Lexer Benchmarks
// ============================================================================

fn bench_lexer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_by_size");

    for (name, source) in [("tiny", TINY_XPR), ("small", SMALL_XPR), ("medium", MEDIUM_XPR)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| Lexer::new(black_box(src)).lex())
        });
    }

    group.finish();
}

fn bench_lexer_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_block_scaling");

    for size in [10, 100, 1000] {
        let source = generate_large_xpr(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| Lexer::new(black_box(src)).lex())
        });
    }

    group.finish();
}

// ============================================================================
// Compile Benchmarks
// ============================================================================

fn bench_compile_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_by_size");

    for (name, source) in [("tiny", TINY_XPR), ("small", SMALL_XPR), ("medium", MEDIUM_XPR)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| compile(black_box(src), "benchmark.xpr"))
        });
    }

    group.finish();
}

fn bench_compile_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_block_scaling");

    for size in [10, 100, 1000] {
        let source = generate_large_xpr(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| {
                let group = compile(black_box(src), "benchmark.xpr").unwrap();
                serde_json::to_string(&group)
            })
        });
    }

    group.finish();
}

// ============================================================================
// Merge Benchmarks
// ============================================================================

fn bench_merge_build(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut folders = Vec::new();
    for i in 0..20 {
        let name = format!("folder_{i:02}");
        let folder = dir.path().join(&name);
        std::fs::create_dir(&folder).unwrap();
        std::fs::write(folder.join("rule.xpr"), generate_large_xpr(20)).unwrap();
        std::fs::write(folder.join("trans.json"), r#"{"Title":"Hello","Body":{"Text":"x"}}"#)
            .unwrap();
        folders.push(name);
    }
    let manifest = Manifest {
        input: dir.path().to_path_buf(),
        output: dir.path().join("out"),
        ..Manifest::default()
    };

    c.bench_function("merge_build_20_folders", |b| {
        b.iter(|| MergeOrchestrator::new(&manifest).build(black_box(&folders)))
    });
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(lexer_benches, bench_lexer_sizes, bench_lexer_scaling);

criterion_group!(compile_benches, bench_compile_sizes, bench_compile_scaling);

criterion_group!(merge_benches, bench_merge_build);

criterion_main!(lexer_benches, compile_benches, merge_benches);
