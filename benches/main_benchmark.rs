use criterion::{Criterion, criterion_group, criterion_main};
use sbuild::build::{BuildCommand, IncludeResolver};
use sbuild::config::ProjectDescriptor;
use sbuild::store::to_pretty_json;
use std::hint::black_box;

const MOCK_DESCRIPTOR: &str = r#"{
    "flags": "-std=c++17 -O2 -Wall",
    "buildpath": "./build/output",
    "includepaths": ["./include/*", "./vendor"],
    "srcpath": "./src/main.cpp",
    "version": "1.0",
    "type": "shared",
    "name": "benchmark_project"
}"#;

fn bench_descriptor_parse(c: &mut Criterion) {
    c.bench_function("parse_project_json", |b| {
        b.iter(|| {
            let _: ProjectDescriptor = serde_json::from_str(black_box(MOCK_DESCRIPTOR)).unwrap();
        })
    });
}

fn bench_descriptor_write(c: &mut Criterion) {
    let descriptor: ProjectDescriptor = serde_json::from_str(MOCK_DESCRIPTOR).unwrap();
    c.bench_function("write_project_json", |b| {
        b.iter(|| to_pretty_json(black_box(&descriptor)).unwrap())
    });
}

fn bench_command_build(c: &mut Criterion) {
    let descriptor: ProjectDescriptor = serde_json::from_str(MOCK_DESCRIPTOR).unwrap();
    let includes: Vec<String> = (0..32).map(|i| format!("-I./include/lib{}", i)).collect();
    c.bench_function("build_command", |b| {
        b.iter(|| BuildCommand::build(black_box(&descriptor), black_box(&includes)).unwrap())
    });
}

fn bench_include_expansion(c: &mut Criterion) {
    // Setup a temp dir with a populated include tree
    let temp_dir = std::env::temp_dir().join("sbuild_bench_includes");
    if !temp_dir.exists() {
        for i in 0..32 {
            std::fs::create_dir_all(temp_dir.join("include").join(format!("lib{}", i))).unwrap();
        }
        std::fs::create_dir_all(temp_dir.join("vendor")).unwrap();
    }

    let resolver = IncludeResolver::new(&temp_dir);
    let specs = vec!["./include/*".to_string(), "./vendor".to_string()];
    c.bench_function("resolve_includes", |b| {
        b.iter(|| resolver.resolve(black_box(&specs)))
    });
}

criterion_group!(
    benches,
    bench_descriptor_parse,
    bench_descriptor_write,
    bench_command_build,
    bench_include_expansion
);
criterion_main!(benches);
