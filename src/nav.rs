//! Breadcrumb trail and tree menu shown on every page.
//!
//! The menu always covers the whole report, starting from the root bundle,
//! and follows the same visibility rule as the page composer: packages,
//! classes and methods without code are left out.

use crate::context::ReportContext;
use crate::error::Result;
use crate::html::Element;
use crate::model::CoverageNode;
use crate::page::{PageId, PageKey, PageTree};

/// One breadcrumb step. The current page has no link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub link: Option<String>,
}

/// Ancestors of `id` from the root down, then the page itself unlinked.
/// The root counts as an entry, so a page N levels below the root gets
/// N + 1 crumbs and the root page gets exactly one.
pub fn breadcrumb(tree: &PageTree, id: PageId) -> Result<Vec<Crumb>> {
    let mut crumbs = Vec::new();
    for ancestor in tree.ancestors(id) {
        crumbs.push(Crumb {
            label: tree.page(ancestor)?.link_label(),
            link: Some(tree.link(id, ancestor)?),
        });
    }
    crumbs.push(Crumb {
        label: tree.page(id)?.link_label(),
        link: None,
    });
    Ok(crumbs)
}

pub fn render_breadcrumb(div: &mut Element, crumbs: &[Crumb]) {
    for crumb in crumbs {
        match &crumb.link {
            Some(link) => {
                div.a(link).attr("class", "el_parent").text(crumb.label.as_str());
                div.text(" > ");
            }
            None => {
                div.span("el_current").text(crumb.label.as_str());
            }
        }
    }
}

/// One node of the tree menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub link: Option<String>,
    /// Hidden until the parent entry is expanded.
    pub collapsed: bool,
    pub children: Vec<MenuEntry>,
}

/// Build the full menu with links relative to page `id`. Empty when the
/// page is not connected to a bundle.
pub fn tree_menu(tree: &PageTree, id: PageId, ctx: &ReportContext) -> Result<Vec<MenuEntry>> {
    let Some(bundle) = tree.root_bundle(id) else {
        return Ok(Vec::new());
    };
    let names = &ctx.names;
    let link_to = |key: PageKey| -> Result<Option<String>> {
        tree.lookup(&key).map(|target| tree.link(id, target)).transpose()
    };

    let mut packages = Vec::new();
    for pkg in bundle.packages.iter().filter(|p| p.contains_code()) {
        let mut classes = Vec::new();
        for class in pkg.classes.iter().filter(|c| c.contains_code()) {
            let class_link = link_to(PageKey::Class(class.name.clone()))?;

            let mut methods = Vec::new();
            for method in class.methods.iter().filter(|m| m.contains_code()) {
                let source_link = match class.source_file.as_deref() {
                    Some(file) => tree.source_link(id, &pkg.name, file, method.first_line)?,
                    None => None,
                };
                methods.push(MenuEntry {
                    label: names.method_name(&class.name, &method.name, &method.desc),
                    link: source_link.or_else(|| class_link.clone()),
                    collapsed: true,
                    children: Vec::new(),
                });
            }

            classes.push(MenuEntry {
                label: names.class_name(&class.name),
                link: class_link,
                collapsed: true,
                children: methods,
            });
        }

        packages.push(MenuEntry {
            label: names.package_name(&pkg.name),
            link: link_to(PageKey::Package(pkg.name.clone()))?,
            collapsed: false,
            children: classes,
        });
    }
    Ok(packages)
}

fn render_entries(ul: &mut Element, entries: &[MenuEntry], level: usize) {
    for entry in entries {
        let li = ul.child("li");
        if entry.collapsed {
            li.attr("class", "collapsed");
        }
        let toggle = li.span("toggle");
        if !entry.children.is_empty() {
            toggle.text("\u{25b8}");
        }
        li.a_or_span(entry.link.as_deref(), "")
            .text(entry.label.as_str());
        if !entry.children.is_empty() {
            let nested = li.child("ul");
            nested.attr("class", format!("level{}", level + 1));
            render_entries(nested, &entry.children, level + 1);
        }
    }
}

pub fn render_menu(left: &mut Element, entries: &[MenuEntry]) {
    let tree = left.div("tree");
    let title = tree.div("treetitle");
    title.span("").text("Summary Report");
    title.child("br");
    title
        .child("input")
        .attr("id", "search")
        .attr("placeholder", "Search")
        .attr("title", "Filter the menu");

    let root = tree.child("ul");
    root.attr("id", "rootUL").attr("class", "level0");
    render_entries(root, entries, 0);
}
