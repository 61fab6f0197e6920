mod common;

use std::path::Path;
use std::rc::Rc;

use covpages::compose::compose;
use covpages::error::ReportError;
use covpages::folder::ReportFolder;
use covpages::locator::DirectorySourceLocator;
use covpages::model::{BundleCoverage, ClassCoverage};
use covpages::nav;
use covpages::output::{FileOutput, MemoryOutput};
use covpages::report::render_report;

fn render(bundle: BundleCoverage, ctx: &covpages::context::ReportContext) -> MemoryOutput {
    let mut out = MemoryOutput::new();
    render_report(bundle, ctx, &mut out).unwrap();
    out
}

/// The `<ul id="rootUL">` menu of a rendered page.
fn menu_of(html: &str) -> &str {
    let start = html.find("id=\"rootUL\"").expect("page has a menu");
    let end = html[start..].find("<div class=\"right\">").unwrap() + start;
    &html[start..end]
}

fn simple_class(name: &str) -> Rc<ClassCoverage> {
    common::class(name, None, vec![common::method("run", "()V", 1, 0, 1)])
}

fn write_source(root: &Path, package: &str, name: &str, text: &str) {
    let dir = root.join(package);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(name), text).unwrap();
}

#[test]
fn test_entities_without_code_get_no_page() {
    let ctx = common::context();
    let composition = compose(common::app_bundle(), ReportFolder::root(), &ctx).unwrap();

    let stats = composition.stats;
    assert_eq!(stats.packages_considered, 2);
    assert_eq!(stats.packages_produced(), 1);
    assert_eq!(stats.packages_skipped, 1);
    assert_eq!(stats.classes_produced(), 1);
    // bundle, default package, Main
    assert_eq!(composition.tree.len(), 3);
}

#[test]
fn test_menu_lists_only_packages_with_code() {
    let ctx = common::context();
    let out = render(common::app_bundle(), &ctx);

    let index = out.get("index.html").unwrap();
    let menu = menu_of(index);
    assert_eq!(menu.matches("<ul class=\"level1\">").count(), 1);
    assert!(menu.contains("<a href=\"default/index.html\">default</a>"));
    assert!(!index.contains("com.x"));
    assert!(out.paths().iter().all(|p| !p.starts_with("com.x")));
}

#[test]
fn test_children_are_written_before_parents() {
    let ctx = common::context();
    let out = render(common::app_bundle(), &ctx);

    let class = out.position("default/Main.html").unwrap();
    let package = out.position("default/index.html").unwrap();
    let root = out.position("index.html").unwrap();
    assert!(class < package);
    assert!(package < root);
    assert_eq!(root, out.len() - 1);
}

#[test]
fn test_every_link_resolves_to_a_written_file() {
    let src = tempfile::tempdir().unwrap();
    write_source(src.path(), "", "Main.java", "class Main {\n  void main() {}\n}\n");
    let ctx = common::context()
        .with_locator(Box::new(DirectorySourceLocator::new(vec![src.path().to_path_buf()])));
    let out = render(common::app_bundle(), &ctx);

    let pages: Vec<&str> = out
        .paths()
        .into_iter()
        .filter(|p| p.ends_with(".html"))
        .collect();
    assert_eq!(pages.len(), 4);
    for page in pages {
        for link in common::hrefs(out.get(page).unwrap()) {
            let target = common::resolve(page, &link);
            assert!(
                out.get(&target).is_some(),
                "{page} links to {link}, which resolves to missing {target}"
            );
        }
    }
}

#[test]
fn test_breadcrumb_follows_the_page_path() {
    let ctx = common::context();
    let composition = compose(common::app_bundle(), ReportFolder::root(), &ctx).unwrap();
    let tree = &composition.tree;

    let package = tree.children(tree.root())[0];
    let class = tree.children(package)[0];

    let root_trail = nav::breadcrumb(tree, tree.root()).unwrap();
    assert_eq!(root_trail.len(), 1);
    assert!(root_trail[0].link.is_none());

    let trail = nav::breadcrumb(tree, class).unwrap();
    let labels: Vec<&str> = trail.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["App", "default", "Main"]);
    assert_eq!(trail[0].link.as_deref(), Some("../index.html"));
    assert_eq!(trail[1].link.as_deref(), Some("index.html"));
    assert!(trail[2].link.is_none());
}

#[test]
fn test_zero_totals_render_as_zero_percent() {
    let ctx = common::context();
    let out = render(common::app_bundle(), &ctx);

    for page in ["index.html", "default/index.html", "default/Main.html"] {
        let html = out.get(page).unwrap();
        assert!(!html.contains("NaN"), "{page} shows NaN");
        assert!(html.contains("Branch coverage: 0/0"));
        assert!(html.contains("0.00%"));
    }
}

#[test]
fn test_summary_block_and_chart_payload() {
    let ctx = common::context();
    let out = render(common::app_bundle(), &ctx);
    let index = out.get("index.html").unwrap();

    assert!(index.contains("Demo - Coverage Report"));
    assert!(index.contains("Target: App"));
    assert!(index.contains("2024-01-01"));
    assert!(index.contains("[ svc ]"));
    assert!(index.contains("Line coverage: 1/2"));
    assert!(index.contains("<script type=\"application/json\" id=\"chart-data\">"));
    assert!(index.contains("\"container\":\"container4\""));
}

#[test]
fn test_source_pages_are_linked_from_methods() {
    let src = tempfile::tempdir().unwrap();
    write_source(src.path(), "", "Main.java", "class Main {\n\tvoid main() {}\n}\n");
    let ctx = common::context()
        .with_locator(Box::new(DirectorySourceLocator::new(vec![src.path().to_path_buf()])));
    let out = render(common::app_bundle(), &ctx);

    let source = out.get("default/Main.java.html").unwrap();
    assert!(source.contains("prettyPrint()"));
    assert!(source.contains("id=\"L3\""));
    assert!(!source.contains("Line coverage:"));

    let class = out.get("default/Main.html").unwrap();
    assert!(class.contains("href=\"Main.java.html#L3\""));
    assert!(!class.contains("was not found"));

    let package = out.get("default/index.html").unwrap();
    assert!(package.contains("Source Files"));
    assert!(out.position("default/Main.java.html") < out.position("default/index.html"));
}

#[test]
fn test_missing_source_is_reported_on_class_page() {
    let src = tempfile::tempdir().unwrap();
    let ctx = common::context()
        .with_locator(Box::new(DirectorySourceLocator::new(vec![src.path().to_path_buf()])));
    let out = render(common::app_bundle(), &ctx);

    assert!(out.get("default/Main.java.html").is_none());
    let class = out.get("default/Main.html").unwrap();
    assert!(class.contains("Source file &quot;Main.java&quot; was not found"));
}

#[test]
fn test_render_twice_fails() {
    let ctx = common::context();
    let mut composition = compose(common::app_bundle(), ReportFolder::root(), &ctx).unwrap();
    let root = composition.tree.root();
    let mut out = MemoryOutput::new();

    composition.tree.render(root, &ctx, &mut out).unwrap();
    let err = composition.tree.render(root, &ctx, &mut out).unwrap_err();
    assert!(matches!(err, ReportError::AlreadyRendered { .. }));
}

#[test]
fn test_empty_bundle_renders_single_page() {
    let ctx = common::context();
    let out = render(common::bundle("Nothing", vec![]), &ctx);

    let index = out.get("index.html").unwrap();
    assert!(index.contains("No class files specified."));
    assert_eq!(out.paths().iter().filter(|p| p.ends_with(".html")).count(), 1);
}

#[test]
fn test_file_output_writes_report_tree() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = common::context();
    let mut out = FileOutput::new(dir.path());

    let stats = render_report(common::app_bundle(), &ctx, &mut out).unwrap();

    assert_eq!(stats.pages, 3);
    assert!(dir.path().join("index.html").is_file());
    assert!(dir.path().join("default/index.html").is_file());
    assert!(dir.path().join("default/Main.html").is_file());
    assert!(dir.path().join("covpages-resources/report.css").is_file());
    assert!(!dir.path().join("com.x").exists());
}

#[test]
fn test_class_named_like_package_index_keeps_its_page() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = common::context();
    let bundle = common::bundle(
        "App",
        vec![common::package(
            "com/x",
            vec![common::class(
                "com/x/index",
                None,
                vec![common::method("run", "()V", 4, 0, 2)],
            )],
            vec![],
        )],
    );

    let stats = render_report(bundle, &ctx, &mut FileOutput::new(dir.path())).unwrap();
    assert_eq!(stats.pages, 3);

    let pkg_dir = dir.path().join("com.x");
    let package = std::fs::read_to_string(pkg_dir.join("index.html")).unwrap();
    let class = std::fs::read_to_string(pkg_dir.join("index~1.html")).unwrap();

    assert!(class.contains("run()"));
    assert!(class.contains("id=\"coveragetable\""));
    assert!(package.contains("<a href=\"index~1.html\" class=\"el\">index</a>"));

    let root = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(menu_of(&root).contains("<a href=\"com.x/index~1.html\">index</a>"));
}

#[test]
fn test_source_text_is_read_when_the_page_renders() {
    let src = tempfile::tempdir().unwrap();
    write_source(src.path(), "", "Main.java", "old text\n");
    let ctx = common::context()
        .with_locator(Box::new(DirectorySourceLocator::new(vec![src.path().to_path_buf()])));
    let mut composition = compose(common::app_bundle(), ReportFolder::root(), &ctx).unwrap();
    assert_eq!(composition.stats.source_pages, 1);

    write_source(src.path(), "", "Main.java", "class Main {\n  fresh text\n}\n");
    let mut out = MemoryOutput::new();
    let root = composition.tree.root();
    composition.tree.render(root, &ctx, &mut out).unwrap();

    let source = out.get("default/Main.java.html").unwrap();
    assert!(source.contains("fresh text"));
    assert!(!source.contains("old text"));
}

#[test]
fn test_write_failure_aborts_and_keeps_written_pages() {
    let dir = tempfile::tempdir().unwrap();
    // A plain file where the second package folder has to go.
    std::fs::write(dir.path().join("b"), "not a folder").unwrap();
    let ctx = common::context();
    let bundle = common::bundle(
        "App",
        vec![
            common::package("a", vec![simple_class("a/A")], vec![]),
            common::package("b", vec![simple_class("b/B")], vec![]),
        ],
    );

    let err = render_report(bundle, &ctx, &mut FileOutput::new(dir.path())).unwrap_err();

    assert!(matches!(err, ReportError::Io(_)), "unexpected error: {err}");
    assert!(dir.path().join("a/A.html").is_file());
    assert!(dir.path().join("a/index.html").is_file());
    assert!(!dir.path().join("index.html").exists());
}

#[test]
fn test_tree_order_is_kept_in_menu_and_tables() {
    let ctx = common::context();
    let bundle = common::bundle(
        "App",
        vec![
            common::package(
                "zeta",
                vec![simple_class("zeta/Zed"), simple_class("zeta/Able")],
                vec![],
            ),
            common::package(
                "alpha",
                vec![simple_class("alpha/Mid")],
                vec![],
            ),
        ],
    );
    let out = render(bundle, &ctx);

    let index = out.get("index.html").unwrap();
    let menu = menu_of(index);
    let pos = |haystack: &str, needle: &str| haystack.find(needle).unwrap();
    assert!(pos(menu, ">zeta</a>") < pos(menu, ">alpha</a>"));
    assert!(pos(menu, ">Zed</a>") < pos(menu, ">Able</a>"));
    assert!(pos(menu, ">Able</a>") < pos(menu, ">Mid</a>"));

    let table = &index[index.find("id=\"coveragetable\"").unwrap()..];
    assert!(pos(table, "class=\"el\">zeta</a>") < pos(table, "class=\"el\">alpha</a>"));

    let zeta = out.get("zeta/index.html").unwrap();
    let table = &zeta[zeta.find("id=\"coveragetable\"").unwrap()..];
    assert!(pos(table, "class=\"el\">Zed</a>") < pos(table, "class=\"el\">Able</a>"));

    assert!(out.position("zeta/index.html") < out.position("alpha/index.html"));
}
