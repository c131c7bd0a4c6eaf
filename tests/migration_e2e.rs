//! End-to-end tests running complete migrations against a real directory
//! tree through [`DiskFS`].

mod common;

use common::prelude::*;
use theme_migration::config;
use theme_migration::error::Error;
use theme_migration::filesystem::DiskFS;
use theme_migration::phases::execute_migration;

fn run(app: &AppFixture) -> theme_migration::error::Result<theme_migration::phases::MigrationReport> {
    let config = config::from_file(app.write_config())?;
    execute_migration(DiskFS::new(), &config).map(|(_, report)| report)
}

#[test]
fn test_qualified_reference_chain_is_copied_and_rewritten() {
    let app = AppFixture::new()
        .with_bundle("OroUIBundle", "vendor/ui")
        .with_bundle("OroFormBundle", "vendor/form");
    app.layout(
        "vendor/ui",
        "default",
        "page.html.twig",
        "{% use '@OroForm/layouts/default/form/fields.html.twig' %}",
    );
    app.layout(
        "vendor/form",
        "default",
        "form/fields.html.twig",
        "{% use '@OroUI/layouts/default/page.html.twig' %}",
    );

    let report = run(&app).unwrap();

    assert_eq!(
        app.read_migrated("default", "001_page_OroUI.html.twig").unwrap(),
        "{% use '@OroThemeDefault50/layouts/default_50/form/002_fields_OroForm.html.twig' %}"
    );
    assert_eq!(
        app.read_migrated("default", "form/002_fields_OroForm.html.twig").unwrap(),
        "{% use '@OroThemeDefault50/layouts/default_50/001_page_OroUI.html.twig' %}"
    );
    assert_eq!(report.migrated_files, 2);
    assert_eq!(report.actions.copied().len(), 2);
    assert!(report.actions.warned().is_empty());

    // The sources are left untouched
    assert_eq!(
        app.read("vendor/ui/Resources/views/layouts/default/page.html.twig").unwrap(),
        "{% use '@OroForm/layouts/default/form/fields.html.twig' %}"
    );
}

#[test]
fn test_parent_chain_is_migrated_once_per_theme() {
    let app = AppFixture::new()
        .with_bundle("OroUIBundle", "vendor/ui")
        .with_theme("child");
    app.layout("vendor/ui", "child", "theme.yml", "label: Child\nparent: base\n");
    app.layout("vendor/ui", "base", "theme.yml", "label: Base\nparent: root\n");
    app.layout("vendor/ui", "root", "theme.yml", "label: Root\n");
    app.layout(
        "vendor/ui",
        "child",
        "page.html.twig",
        "{% extends '@OroUI/layouts/root/page.html.twig' %}",
    );
    app.layout(
        "vendor/ui",
        "base",
        "page.html.twig",
        "{% extends '@OroUI/layouts/root/page.html.twig' %}",
    );
    app.layout("vendor/ui", "root", "page.html.twig", "root page");

    let report = run(&app).unwrap();

    assert_eq!(report.hierarchy, vec!["child", "base", "root"]);
    assert_eq!(report.migrated_themes, vec!["child", "base", "root"]);
    assert_eq!(report.migrated_files, 3);
    assert_eq!(
        app.read_migrated("root", "001_page_OroUI.html.twig").unwrap(),
        "root page"
    );
    assert!(app
        .read_migrated("child", "theme.yml")
        .unwrap()
        .contains("parent: base_50"));
    assert!(!app
        .read_migrated("root", "theme.yml")
        .unwrap()
        .contains("parent"));
}

#[test]
fn test_missing_reference_is_warned_and_left_alone() {
    let app = AppFixture::new().with_bundle("OroUIBundle", "vendor/ui");
    app.layout(
        "vendor/ui",
        "default",
        "page.html.twig",
        "{% use '@OroUI/layouts/default/missing.html.twig' %}",
    );

    let report = run(&app).unwrap();

    assert_eq!(
        app.read_migrated("default", "001_page_OroUI.html.twig").unwrap(),
        "{% use '@OroUI/layouts/default/missing.html.twig' %}"
    );
    assert_eq!(report.actions.warned().len(), 1);
    assert!(report.actions.warned()[0].message.contains("missing.html.twig"));
}

#[test]
fn test_unknown_bundle_alias_aborts() {
    let app = AppFixture::new().with_bundle("OroUIBundle", "vendor/ui");
    app.layout(
        "vendor/ui",
        "default",
        "page.html.twig",
        "{% use '@AcmeShop/layouts/default/a.html.twig' %}",
    );

    let err = run(&app).unwrap_err();
    assert!(matches!(err, Error::UnknownAlias { .. }), "got {:?}", err);
}

#[test]
fn test_assets_datagrids_and_config_files() {
    let app = AppFixture::new()
        .with_bundle("OroUIBundle", "vendor/ui")
        .with_bundle("OroFormBundle", "vendor/form")
        .with_datagrid("orders-grid");
    app.file("public/bundles/oroui/css/main.scss", "@import 'oroform/css/fields';");
    app.file("public/bundles/oroform/css/fields.scss", ".field {}");
    app.layout(
        "vendor/ui",
        "default",
        "config/assets.yml",
        "styles:\n  inputs:\n    - 'oroui/css/main.scss'\n",
    );
    app.layout(
        "vendor/form",
        "default",
        "config/datagrids.yml",
        "datagrids:\n  orders-grid:\n    columns:\n      id: ~\n",
    );
    app.layout(
        "vendor/ui",
        "default",
        "page.html.twig",
        "{{ asset('bundles/oroui/img/logo.png') }}",
    );

    run(&app).unwrap();

    let bundle = "src/Oro/Bundle/ThemeDefault50Bundle";
    assert!(app.exists(&format!("{}/OroThemeDefault50Bundle.php", bundle)));
    assert!(app.exists(&format!("{}/Resources/config/oro/bundles.yml", bundle)));
    assert_eq!(
        app.read(&format!("{}/Resources/public/oroui/css/main.scss", bundle)).unwrap(),
        "@import 'orothemedefault50/oroform/css/fields';"
    );
    assert_eq!(
        app.read_migrated("default", "001_page_OroUI.html.twig").unwrap(),
        "{{ asset('bundles/orothemedefault50/oroui/img/logo.png') }}"
    );
    assert!(app
        .read_migrated("default", "config/assets.yml")
        .unwrap()
        .contains("orothemedefault50/oroui/css/main.scss"));
    assert!(app
        .read_migrated("default", "config/datagrids.yml")
        .unwrap()
        .contains("orders-grid"));
}

#[test]
fn test_rerun_replaces_previous_output() {
    let app = AppFixture::new().with_bundle("OroUIBundle", "vendor/ui");
    app.layout("vendor/ui", "default", "page.html.twig", "page");
    run(&app).unwrap();

    app.file(&format!("{}/default_50/stale.html.twig", NEW_LAYOUTS), "stale");
    app.layout("vendor/ui", "default", "page.html.twig", "page v2");
    let report = run(&app).unwrap();

    assert!(report.actions.warned().is_empty());
    assert!(!app.exists(&format!("{}/default_50/stale.html.twig", NEW_LAYOUTS)));
    assert_eq!(
        app.read_migrated("default", "001_page_OroUI.html.twig").unwrap(),
        "page v2"
    );
}
