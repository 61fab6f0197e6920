use std::rc::Rc;

use crate::error::Result;
use crate::html::Element;
use crate::model::{BundleCoverage, CoverageNode, NodeSummary};

use super::table::coverage_table;
use super::{PageView, ReportPage};

pub const INDEX_FILE: &str = "index.html";

/// Root page: one table row per package with code.
pub struct BundlePage {
    summary: NodeSummary,
    package_count: usize,
    bundle: Option<Rc<BundleCoverage>>,
}

impl BundlePage {
    pub fn new(bundle: Rc<BundleCoverage>) -> Self {
        Self {
            summary: bundle.plain_copy(),
            package_count: bundle.packages.len(),
            bundle: Some(bundle),
        }
    }
}

impl ReportPage for BundlePage {
    fn result_node(&self) -> Option<&dyn CoverageNode> {
        self.bundle.as_deref().map(|b| b as &dyn CoverageNode)
    }

    fn summary_node(&self) -> Option<&dyn CoverageNode> {
        Some(&self.summary)
    }

    fn root_bundle(&self) -> Option<&BundleCoverage> {
        self.bundle.as_deref()
    }

    fn file_name(&self) -> String {
        INDEX_FILE.to_string()
    }

    fn link_label(&self) -> String {
        self.summary.name.clone()
    }

    fn onload(&self, _ctx: &crate::context::ReportContext) -> Option<String> {
        Some("initialSort(['breadcrumb', 'coveragetable'])".to_string())
    }

    fn content(&self, body: &mut Element, view: &PageView<'_>) -> Result<()> {
        if self.package_count == 0 {
            body.child("p").text("No class files specified.");
        } else if !self.summary.contains_code() {
            body.child("p")
                .text("None of the analyzed classes contain code relevant for code coverage.");
        } else {
            let rows = view.child_rows(false)?;
            coverage_table(body, "coveragetable", "Package", &rows, &self.summary.counters);
        }
        Ok(())
    }

    fn release(&mut self) {
        self.bundle = None;
    }
}
