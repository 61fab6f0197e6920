use std::rc::Rc;

use crate::context::ReportContext;
use crate::error::Result;
use crate::html::Element;
use crate::model::{CoverageNode, NodeSummary, PackageCoverage};
use crate::names::DEFAULT_PACKAGE;

use super::bundle::INDEX_FILE;
use super::table::coverage_table;
use super::{PageView, ReportPage};

/// Output folder name for a package: the dotted package name, or
/// `default` for the unnamed package.
#[must_use]
pub fn folder_name(vm_name: &str) -> String {
    if vm_name.is_empty() {
        DEFAULT_PACKAGE.to_string()
    } else {
        vm_name.replace('/', ".")
    }
}

/// Lists the classes of one package, followed by its source files.
pub struct PackagePage {
    summary: NodeSummary,
    label: String,
    package: Option<Rc<PackageCoverage>>,
}

impl PackagePage {
    pub fn new(package: Rc<PackageCoverage>, ctx: &ReportContext) -> Self {
        Self {
            summary: package.plain_copy(),
            label: ctx.names.package_name(&package.name),
            package: Some(package),
        }
    }
}

impl ReportPage for PackagePage {
    fn result_node(&self) -> Option<&dyn CoverageNode> {
        self.package.as_deref().map(|p| p as &dyn CoverageNode)
    }

    fn summary_node(&self) -> Option<&dyn CoverageNode> {
        Some(&self.summary)
    }

    fn file_name(&self) -> String {
        INDEX_FILE.to_string()
    }

    fn link_label(&self) -> String {
        self.label.clone()
    }

    fn onload(&self, _ctx: &ReportContext) -> Option<String> {
        Some("initialSort(['breadcrumb', 'coveragetable'])".to_string())
    }

    fn content(&self, body: &mut Element, view: &PageView<'_>) -> Result<()> {
        let classes = view.child_rows(false)?;
        coverage_table(body, "coveragetable", "Class", &classes, &self.summary.counters);

        let sources = view.child_rows(true)?;
        if !sources.is_empty() {
            body.child("h2").text("Source Files");
            coverage_table(body, "sourcetable", "Source File", &sources, &self.summary.counters);
        }
        Ok(())
    }

    fn release(&mut self) {
        self.package = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_name() {
        assert_eq!(folder_name(""), "default");
        assert_eq!(folder_name("com/example/util"), "com.example.util");
    }
}
