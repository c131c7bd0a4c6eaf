//! Benchmarks for reference scanning and for a complete in-memory migration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use theme_migration::config::{BundleEntry, MigrationConfig};
use theme_migration::filesystem::MemoryFS;
use theme_migration::phases::execute_migration;
use theme_migration::resolver::PathResolver;
use theme_migration::scanner::{FileKind, ReferenceScanner};

const BUNDLES: usize = 20;

fn hierarchy() -> Vec<String> {
    vec!["custom".to_string(), "default".to_string()]
}

/// A template with qualified, asset and unrelated references
fn template(lines: usize) -> String {
    let mut content = String::new();
    for i in 0..lines {
        content.push_str(&format!(
            "{{% use '@OroPart{}/layouts/default/blocks/block{}.html.twig' %}}\n",
            i % BUNDLES,
            i
        ));
        content.push_str(&format!(
            "<img src=\"{{{{ asset('bundles/oroui/img/icon{}.svg') }}}}\">\n",
            i
        ));
        content.push_str("{% block body %}<div class=\"content\">{{ block('inner') }}</div>{% endblock %}\n");
    }
    content
}

/// A layout update with relative template references
fn layout_update(lines: usize) -> String {
    let mut content = String::from("layout:\n    actions:\n");
    for i in 0..lines {
        content.push_str(&format!(
            "        - '@setBlockTheme':\n            themes: 'templates/block{}.html.twig'\n",
            i
        ));
    }
    content
}

fn bench_scanning(c: &mut Criterion) {
    let resolver = PathResolver::new("/app", "50", &hierarchy()).unwrap();
    let scanner = ReferenceScanner::new(&resolver);
    let twig = template(200);
    let yml = layout_update(200);

    let mut group = c.benchmark_group("scanner");
    group.bench_function("qualified_references", |b| {
        b.iter(|| scanner.qualified_references(black_box(&twig)))
    });
    group.bench_function("relative_references", |b| {
        b.iter(|| scanner.relative_references(black_box(&yml)))
    });
    group.bench_function("rewrite_asset_references", |b| {
        b.iter(|| scanner.rewrite_asset_references(black_box(&twig)))
    });
    group.bench_function("scan_template", |b| {
        b.iter(|| scanner.scan(black_box(&twig), FileKind::Template))
    });
    group.finish();
}

/// Application with `BUNDLES` bundles, each holding a template of both
/// themes that references templates of the other bundles
fn create_app() -> (MemoryFS, MigrationConfig) {
    let mut fs = MemoryFS::new();
    let mut bundles = Vec::new();
    for i in 0..BUNDLES {
        let path = format!("vendor/bundle{}", i);
        let layouts = format!("/app/{}/Resources/views/layouts", path);
        let next = (i + 1) % BUNDLES;
        fs.add_file_string(
            format!("{}/custom/page{}.html.twig", layouts, i),
            &format!("{{% extends '@OroPart{}/layouts/default/base{}.html.twig' %}}", next, next),
        )
        .unwrap();
        fs.add_file_string(
            format!("{}/default/base{}.html.twig", layouts, i),
            &format!("{{{{ asset('bundles/oropart{}/img/a.png') }}}}", i),
        )
        .unwrap();
        bundles.push(BundleEntry {
            name: format!("OroPart{}Bundle", i),
            path,
        });
    }
    fs.add_file_string(
        "/app/vendor/bundle0/Resources/views/layouts/custom/theme.yml",
        "label: Custom\nparent: default\n",
    )
    .unwrap();

    let config = MigrationConfig {
        app_root: "/app".to_string(),
        theme: "custom".to_string(),
        bundles,
        ..Default::default()
    };
    (fs, config)
}

fn bench_migration(c: &mut Criterion) {
    let (fs, config) = create_app();
    c.bench_function("execute_migration", |b| {
        b.iter(|| execute_migration(black_box(fs.clone()), &config).unwrap())
    });
}

criterion_group!(benches, bench_scanning, bench_migration);
criterion_main!(benches);
