use std::rc::Rc;

use crate::context::ReportContext;
use crate::error::Result;
use crate::html::Element;
use crate::model::{ClassCoverage, CoverageNode, NodeSummary};

use super::table::{coverage_table, TableRow};
use super::{PageView, ReportPage};

/// Preferred file name of a class page: the VM simple name, so nested
/// classes keep their `$` and never collide with their outer class.
#[must_use]
pub fn file_name(class_vm_name: &str) -> String {
    let simple = class_vm_name.rsplit('/').next().unwrap_or(class_vm_name);
    format!("{}.html", simple)
}

/// Method table of one class.
pub struct ClassPage {
    summary: NodeSummary,
    label: String,
    package: String,
    class: Option<Rc<ClassCoverage>>,
}

impl ClassPage {
    pub fn new(class: Rc<ClassCoverage>, package: &str, ctx: &ReportContext) -> Self {
        Self {
            summary: class.plain_copy(),
            label: ctx.names.class_name(&class.name),
            package: package.to_string(),
            class: Some(class),
        }
    }
}

impl ReportPage for ClassPage {
    fn result_node(&self) -> Option<&dyn CoverageNode> {
        self.class.as_deref().map(|c| c as &dyn CoverageNode)
    }

    fn summary_node(&self) -> Option<&dyn CoverageNode> {
        Some(&self.summary)
    }

    fn file_name(&self) -> String {
        file_name(&self.summary.name)
    }

    fn link_label(&self) -> String {
        self.label.clone()
    }

    fn onload(&self, _ctx: &ReportContext) -> Option<String> {
        Some("initialSort(['breadcrumb', 'coveragetable'])".to_string())
    }

    fn content(&self, body: &mut Element, view: &PageView<'_>) -> Result<()> {
        let Some(class) = self.class.as_deref() else {
            return Ok(());
        };

        let source = class.source_file.as_deref();
        if let Some(file) = source {
            if view.tree.source_link(view.id, &self.package, file, None)?.is_none() {
                body.child("p").text(format!(
                    "Source file \"{}\" was not found during generation of report.",
                    file
                ));
            }
        }

        let mut rows = Vec::new();
        for method in class.methods.iter().filter(|m| m.contains_code()) {
            let link = match source {
                Some(file) => {
                    view.tree
                        .source_link(view.id, &self.package, file, method.first_line)?
                }
                None => None,
            };
            rows.push(TableRow {
                label: view
                    .ctx
                    .names
                    .method_name(&class.name, &method.name, &method.desc),
                link,
                counters: method.counters,
            });
        }
        coverage_table(body, "coveragetable", "Method", &rows, &self.summary.counters);
        Ok(())
    }

    fn release(&mut self) {
        self.class = None;
    }
}
