//! Builds the page tree from a coverage bundle.
//!
//! One page is created per bundle, package and class with code, plus one
//! annotated source page per source file the locator can supply. Entities
//! without code get no page. Children keep the order of the coverage tree.

use std::rc::Rc;

use tracing::debug;

use crate::context::ReportContext;
use crate::error::Result;
use crate::folder::ReportFolder;
use crate::model::{BundleCoverage, CoverageNode, PackageCoverage};
use crate::page::bundle::BundlePage;
use crate::page::class::ClassPage;
use crate::page::package::{self, PackagePage};
use crate::page::source::SourceFilePage;
use crate::page::{PageId, PageKey, PageTree};

/// Counts of what composition saw and produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    pub packages_considered: usize,
    pub packages_skipped: usize,
    pub classes_considered: usize,
    pub classes_skipped: usize,
    pub source_pages: usize,
}

impl ComposeStats {
    pub fn packages_produced(&self) -> usize {
        self.packages_considered - self.packages_skipped
    }

    pub fn classes_produced(&self) -> usize {
        self.classes_considered - self.classes_skipped
    }
}

/// A composed, not yet rendered, page tree.
pub struct Composition {
    pub tree: PageTree,
    pub stats: ComposeStats,
}

/// Create all pages for `bundle` below `root`.
pub fn compose(bundle: BundleCoverage, root: ReportFolder, ctx: &ReportContext) -> Result<Composition> {
    let bundle = Rc::new(bundle);
    let mut tree = PageTree::new(Box::new(BundlePage::new(Rc::clone(&bundle))), root.clone());
    let mut stats = ComposeStats::default();
    let root_id = tree.root();

    for pkg in &bundle.packages {
        stats.packages_considered += 1;
        if !pkg.contains_code() {
            debug!(package = %pkg.name, "skipping package without code");
            stats.packages_skipped += 1;
            continue;
        }
        let folder = root.sub_folder(&package::folder_name(&pkg.name));
        let id = tree.add_child(
            root_id,
            Box::new(PackagePage::new(Rc::clone(pkg), ctx)),
            folder.clone(),
        )?;
        tree.register(PageKey::Package(pkg.name.clone()), id);
        compose_package(&mut tree, id, pkg, &folder, ctx, &mut stats)?;
    }

    debug!(
        pages = tree.len(),
        packages = stats.packages_produced(),
        classes = stats.classes_produced(),
        sources = stats.source_pages,
        "composed page tree"
    );
    Ok(Composition { tree, stats })
}

fn compose_package(
    tree: &mut PageTree,
    parent: PageId,
    pkg: &PackageCoverage,
    folder: &ReportFolder,
    ctx: &ReportContext,
    stats: &mut ComposeStats,
) -> Result<()> {
    for class in &pkg.classes {
        stats.classes_considered += 1;
        if !class.contains_code() {
            debug!(class = %class.name, "skipping class without code");
            stats.classes_skipped += 1;
            continue;
        }
        let id = tree.add_child(
            parent,
            Box::new(ClassPage::new(Rc::clone(class), &pkg.name, ctx)),
            folder.clone(),
        )?;
        tree.register(PageKey::Class(class.name.clone()), id);
    }

    let Some(locator) = ctx.locator.as_deref() else {
        return Ok(());
    };
    for file in pkg.source_files.iter().filter(|f| f.contains_code()) {
        if !locator.exists(&pkg.name, &file.name) {
            debug!(package = %pkg.name, file = %file.name, "source file not found");
            continue;
        }
        let id = tree.add_child(
            parent,
            Box::new(SourceFilePage::new(Rc::clone(file), &pkg.name)),
            folder.clone(),
        )?;
        tree.register(
            PageKey::Source {
                package: pkg.name.clone(),
                file: file.name.clone(),
            },
            id,
        );
        stats.source_pages += 1;
    }
    Ok(())
}
