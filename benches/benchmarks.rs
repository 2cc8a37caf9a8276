//! Performance benchmarks for treex

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use treex::config::{IconSet, IgnoreList};
use treex::export::formats::{BitmapFormat, SvgDocument};
use treex::export::ExportFormat;
use treex::test_utils::TestTree;
use treex::{IgnoreMatcher, TreeWalker, WalkerConfig, join_lines};

fn create_tree(dirs: usize, files_per_dir: usize) -> TestTree {
    let tree = TestTree::new();
    for d in 0..dirs {
        for f in 0..files_per_dir {
            tree.add_file(&format!("dir_{:03}/file_{:03}.txt", d, f), "");
        }
        tree.add_file(&format!("dir_{:03}/node_modules/pkg/index.js", d), "");
        tree.add_file(&format!("dir_{:03}/debug.log", d), "");
    }
    tree
}

fn walker(config: WalkerConfig) -> TreeWalker {
    TreeWalker::new(
        config,
        IgnoreMatcher::new(IgnoreList::defaults().names()),
        IconSet::default(),
    )
}

fn bench_walk(c: &mut Criterion) {
    let tree = create_tree(20, 25);
    let mut group = c.benchmark_group("walk");

    let plain = walker(WalkerConfig::default());
    group.bench_function("lines", |b| b.iter(|| plain.lines(black_box(tree.path()))));

    let details = walker(WalkerConfig {
        show_details: true,
        ..Default::default()
    });
    group.bench_function("lines_with_details", |b| {
        b.iter(|| details.lines(black_box(tree.path())))
    });

    group.bench_function("node_tree", |b| b.iter(|| plain.tree(black_box(tree.path()))));

    group.finish();
}

fn bench_matcher(c: &mut Criterion) {
    let matcher = IgnoreMatcher::new(IgnoreList::defaults().names());
    let names = ["src", "node_modules", "server.log", "README.md", "Cargo.lock"];

    c.bench_function("matcher_is_ignored", |b| {
        b.iter(|| {
            for name in &names {
                black_box(matcher.is_ignored(black_box(name)));
            }
        })
    });
}

fn bench_export(c: &mut Criterion) {
    let tree = create_tree(10, 10);
    let text = join_lines(&walker(WalkerConfig::default()).lines(tree.path()));
    let mut group = c.benchmark_group("export");

    group.bench_function("svg_layout", |b| {
        b.iter(|| SvgDocument::layout(black_box(&text)))
    });

    let bitmap = BitmapFormat::new();
    group.bench_function("bmp_convert", |b| b.iter(|| bitmap.convert(black_box(&text))));

    group.finish();
}

criterion_group!(benches, bench_walk, bench_matcher, bench_export);
criterion_main!(benches);
