//! Report pages and the tree that holds them.
//!
//! Every page lives in a [`PageTree`] arena and refers to its parent by
//! [`PageId`]. Rendering is post-order: a page writes all of its children
//! before itself, so links from a page to its children always resolve.

pub mod bundle;
pub mod class;
pub mod package;
pub mod source;
pub mod table;

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::context::{ReportContext, MENU_STYLE, SCRIPT, STYLESHEET};
use crate::error::{ReportError, Result};
use crate::folder::ReportFolder;
use crate::html::{self, Element};
use crate::model::{BundleCoverage, CoverageNode};
use crate::nav;
use crate::output::ReportOutput;
use crate::summary::Rollup;

pub use table::TableRow;

/// Index of a page in its [`PageTree`].
pub type PageId = usize;

/// The coverage entity a page was created for, used to find its page again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKey {
    /// VM package name.
    Package(String),
    /// VM class name.
    Class(String),
    Source { package: String, file: String },
}

/// What every page variant provides.
pub trait ReportPage {
    /// The entity this page represents. Container pages return `None` once
    /// they have been rendered and released.
    fn result_node(&self) -> Option<&dyn CoverageNode>;

    /// Counters shown in the page summary and in the parent's table row.
    fn summary_node(&self) -> Option<&dyn CoverageNode> {
        self.result_node()
    }

    /// The complete bundle, only for the page that represents it.
    fn root_bundle(&self) -> Option<&BundleCoverage> {
        None
    }

    /// Preferred file name within the page's folder. The tree may add a
    /// suffix when another page of the folder already uses it.
    fn file_name(&self) -> String;

    fn link_label(&self) -> String;

    fn onload(&self, _ctx: &ReportContext) -> Option<String> {
        None
    }

    /// Annotated source pages skip the summary block.
    fn is_source_page(&self) -> bool {
        false
    }

    /// Page specific body content.
    fn content(&self, body: &mut Element, view: &PageView<'_>) -> Result<()>;

    /// Drop data that is no longer needed once the page is written.
    fn release(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Created,
    Rendered,
}

struct PageSlot {
    page: Box<dyn ReportPage>,
    parent: Option<PageId>,
    folder: ReportFolder,
    file_name: String,
    children: Vec<PageId>,
    state: RenderState,
}

/// Arena of pages. The first page added is the root.
pub struct PageTree {
    slots: Vec<PageSlot>,
    keys: HashMap<PageKey, PageId>,
    taken: HashSet<(ReportFolder, String)>,
}

impl PageTree {
    pub fn new(root: Box<dyn ReportPage>, folder: ReportFolder) -> Self {
        let file_name = root.file_name();
        let mut taken = HashSet::new();
        taken.insert((folder.clone(), file_name.to_lowercase()));
        Self {
            slots: vec![PageSlot {
                page: root,
                parent: None,
                folder,
                file_name,
                children: Vec::new(),
                state: RenderState::Created,
            }],
            keys: HashMap::new(),
            taken,
        }
    }

    pub fn root(&self) -> PageId {
        0
    }

    /// Register `page` as the last child of `parent`.
    pub fn add_child(
        &mut self,
        parent: PageId,
        page: Box<dyn ReportPage>,
        folder: ReportFolder,
    ) -> Result<PageId> {
        let id = self.slots.len();
        self.slot_mut(parent)?.children.push(id);
        let file_name = self.claim_name(&folder, page.file_name());
        self.slots.push(PageSlot {
            page,
            parent: Some(parent),
            folder,
            file_name,
            children: Vec::new(),
            state: RenderState::Created,
        });
        Ok(id)
    }

    /// Reserve a file name in `folder`. Names are compared ignoring case so
    /// the output also survives case-insensitive file systems; a taken name
    /// gets a `~N` suffix before its extension.
    fn claim_name(&mut self, folder: &ReportFolder, wanted: String) -> String {
        let mut name = wanted.clone();
        let (stem, ext) = match wanted.rfind('.') {
            Some(dot) => wanted.split_at(dot),
            None => (wanted.as_str(), ""),
        };
        let mut n = 1;
        while !self.taken.insert((folder.clone(), name.to_lowercase())) {
            name = format!("{}~{}{}", stem, n, ext);
            n += 1;
        }
        if name != wanted {
            debug!(wanted = %wanted, actual = %name, "file name already taken in folder");
        }
        name
    }

    /// Remember which page was created for `key`.
    pub fn register(&mut self, key: PageKey, id: PageId) {
        self.keys.insert(key, id);
    }

    pub fn lookup(&self, key: &PageKey) -> Option<PageId> {
        self.keys.get(key).copied()
    }

    /// The file name the page was given in its folder.
    pub fn file_name(&self, id: PageId) -> Result<&str> {
        Ok(&self.slot(id)?.file_name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, id: PageId) -> Result<&PageSlot> {
        self.slots.get(id).ok_or(ReportError::UnknownPage(id))
    }

    fn slot_mut(&mut self, id: PageId) -> Result<&mut PageSlot> {
        self.slots.get_mut(id).ok_or(ReportError::UnknownPage(id))
    }

    pub fn page(&self, id: PageId) -> Result<&dyn ReportPage> {
        Ok(self.slot(id)?.page.as_ref())
    }

    pub fn parent(&self, id: PageId) -> Option<PageId> {
        self.slots.get(id).and_then(|s| s.parent)
    }

    pub fn children(&self, id: PageId) -> &[PageId] {
        self.slots
            .get(id)
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn folder(&self, id: PageId) -> Result<&ReportFolder> {
        Ok(&self.slot(id)?.folder)
    }

    pub fn state(&self, id: PageId) -> Result<RenderState> {
        Ok(self.slot(id)?.state)
    }

    /// Ancestors of `id`, outermost first, not including `id` itself.
    pub fn ancestors(&self, id: PageId) -> Vec<PageId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            chain.push(p);
            current = self.parent(p);
        }
        chain.reverse();
        chain
    }

    /// Walk up from `id` to the page holding the complete bundle.
    pub fn root_bundle(&self, id: PageId) -> Option<&BundleCoverage> {
        let mut current = Some(id);
        while let Some(p) = current {
            let slot = self.slots.get(p)?;
            if let Some(bundle) = slot.page.root_bundle() {
                return Some(bundle);
            }
            current = slot.parent;
        }
        None
    }

    /// Relative link from page `from` to page `to`.
    pub fn link(&self, from: PageId, to: PageId) -> Result<String> {
        let target = self.slot(to)?;
        Ok(self
            .slot(from)?
            .folder
            .link_to(&target.folder, &target.file_name))
    }

    /// Path of a page relative to the report root.
    pub fn path(&self, id: PageId) -> Result<String> {
        let slot = self.slot(id)?;
        Ok(ReportFolder::root().link_to(&slot.folder, &slot.file_name))
    }

    /// Link from page `from` into the annotated source page of `file` in
    /// `package`, anchored at `line` when given.
    pub fn source_link(
        &self,
        from: PageId,
        package: &str,
        file: &str,
        line: Option<u32>,
    ) -> Result<Option<String>> {
        let key = PageKey::Source {
            package: package.to_string(),
            file: file.to_string(),
        };
        let Some(target) = self.lookup(&key) else {
            return Ok(None);
        };
        let link = self.link(from, target)?;
        Ok(Some(match line {
            Some(nr) => format!("{}#L{}", link, nr),
            None => link,
        }))
    }

    /// Render `id` and everything below it. Children are written first, in
    /// registration order. Each page can be rendered only once.
    pub fn render(
        &mut self,
        id: PageId,
        ctx: &ReportContext,
        output: &mut dyn ReportOutput,
    ) -> Result<()> {
        if self.slot(id)?.state == RenderState::Rendered {
            return Err(ReportError::AlreadyRendered {
                page: self.path(id)?,
            });
        }

        let children = self.slot(id)?.children.clone();
        for child in children {
            self.render(child, ctx, output)?;
        }

        let document = self.render_document(id, ctx)?;
        let slot = self.slot(id)?;
        output.write_file(&slot.folder, &slot.file_name, &document)?;
        let path = self.path(id)?;
        debug!(page = %path, "rendered page");

        let slot = self.slot_mut(id)?;
        slot.state = RenderState::Rendered;
        slot.page.release();
        Ok(())
    }

    fn render_document(&self, id: PageId, ctx: &ReportContext) -> Result<String> {
        let slot = self.slot(id)?;
        let page = slot.page.as_ref();
        let folder = &slot.folder;

        let mut root = Element::new("html");
        root.attr("lang", ctx.locale.as_str());

        let head = root.child("head");
        head.child("meta")
            .attr("http-equiv", "Content-Type")
            .attr("content", format!("text/html;charset={}", ctx.encoding));
        head.stylesheet(&ctx.resources.link(folder, STYLESHEET));
        head.stylesheet(&ctx.resources.link(folder, MENU_STYLE));
        head.script_src(&ctx.resources.link(folder, SCRIPT));
        head.child("title").text(page.link_label());

        let body = root.child("body");
        if let Some(onload) = page.onload(ctx) {
            body.attr("onload", onload);
        }

        let menu = nav::tree_menu(self, id, ctx)?;
        nav::render_menu(body.div("left"), &menu);

        let view = PageView { tree: self, id, ctx };
        let right = body.div("right");
        let crumbs = nav::breadcrumb(self, id)?;
        let trail = right.div("breadcrumb");
        trail.attr("id", "breadcrumb");
        nav::render_breadcrumb(trail, &crumbs);

        if !page.is_source_page() {
            if let Some(summary) = page.summary_node() {
                summary_block(right.div("graph"), summary, &page.link_label(), ctx);
            }
        }

        page.content(right, &view)?;

        if let Some(footer) = &ctx.footer {
            right.div("footer").text(footer.as_str());
        }

        Ok(html::document(&root))
    }
}

/// Title area and chart payloads for a page summary.
fn summary_block(graph: &mut Element, summary: &dyn CoverageNode, location: &str, ctx: &ReportContext) {
    let meta = &ctx.metadata;
    graph
        .span("project")
        .text(format!("{} - Coverage Report", meta.project));
    graph
        .span("location")
        .text(format!("Target: {}", location));
    graph.child("br");
    graph.span("time").text(meta.timestamp_label());
    graph.child("br");
    graph.span("app").text(format!("[ {} ]", meta.app));
    graph.span("env").text(format!("[ {} ]", meta.env));
    graph.child("br");

    let rollup = Rollup::of(summary);
    let collect = graph.div("collects");
    for entry in &rollup.entries {
        collect
            .span("collect")
            .attr("id", format!("{}Collect", entry.kind.as_str()))
            .text(entry.text());
    }

    let payloads = rollup.chart_payloads();
    let charts = graph.div("charts");
    for payload in &payloads {
        charts
            .div("chart")
            .attr("id", payload.container.as_str())
            .text(format!("{} {:.2}%", payload.title, payload.percent));
    }
    match serde_json::to_string(&payloads) {
        Ok(json) => {
            graph
                .child("script")
                .attr("type", "application/json")
                .attr("id", "chart-data")
                .raw(json.replace("</", "<\\/"));
        }
        Err(e) => warn!(error = %e, "could not serialize chart payload, skipping charts"),
    }
}

/// What a page can see of the tree while producing its content.
pub struct PageView<'a> {
    pub tree: &'a PageTree,
    pub id: PageId,
    pub ctx: &'a ReportContext,
}

impl PageView<'_> {
    /// Table rows for the children of this page, keeping registration
    /// order. `source_pages` selects annotated source pages or all others.
    pub fn child_rows(&self, source_pages: bool) -> Result<Vec<TableRow>> {
        let mut rows = Vec::new();
        for &child in self.tree.children(self.id) {
            let page = self.tree.page(child)?;
            if page.is_source_page() != source_pages {
                continue;
            }
            let Some(node) = page.summary_node() else {
                continue;
            };
            rows.push(TableRow {
                label: page.link_label(),
                link: Some(self.tree.link(self.id, child)?),
                counters: *node.counters(),
            });
        }
        Ok(rows)
    }
}
