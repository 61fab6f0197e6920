use std::rc::Rc;

use tracing::warn;

use crate::context::ReportContext;
use crate::error::Result;
use crate::html::Element;
use crate::model::{CoverageNode, NodeSummary, SourceFileCoverage};

use super::{PageView, ReportPage};

/// File name of an annotated source page.
#[must_use]
pub fn file_name(source_file: &str) -> String {
    format!("{}.html", source_file)
}

/// Source listing with one anchor per line, highlighted by line status.
/// The text is read from the locator while the page renders and is not
/// kept afterwards.
pub struct SourceFilePage {
    summary: NodeSummary,
    package: String,
    file: Option<Rc<SourceFileCoverage>>,
}

impl SourceFilePage {
    pub fn new(file: Rc<SourceFileCoverage>, package: &str) -> Self {
        Self {
            summary: file.plain_copy(),
            package: package.to_string(),
            file: Some(file),
        }
    }
}

impl ReportPage for SourceFilePage {
    fn result_node(&self) -> Option<&dyn CoverageNode> {
        self.file.as_deref().map(|f| f as &dyn CoverageNode)
    }

    fn summary_node(&self) -> Option<&dyn CoverageNode> {
        Some(&self.summary)
    }

    fn file_name(&self) -> String {
        file_name(&self.summary.name)
    }

    fn link_label(&self) -> String {
        self.summary.name.clone()
    }

    fn onload(&self, ctx: &ReportContext) -> Option<String> {
        Some(format!(
            "window['PR_TAB_WIDTH']={};prettyPrint()",
            ctx.tab_width
        ))
    }

    fn is_source_page(&self) -> bool {
        true
    }

    fn content(&self, body: &mut Element, view: &PageView<'_>) -> Result<()> {
        let Some(file) = self.file.as_deref() else {
            return Ok(());
        };
        let text = view
            .ctx
            .locator
            .as_deref()
            .and_then(|locator| locator.source(&self.package, &file.name));
        let Some(text) = text else {
            warn!(package = %self.package, file = %file.name, "source file disappeared before rendering");
            body.child("p").text(format!(
                "Source file \"{}\" could not be read.",
                file.name
            ));
            return Ok(());
        };

        let pre = body.child_with_class("pre", "source linenums");
        for (idx, line) in text.lines().enumerate() {
            let nr = idx as u32 + 1;
            let span = pre.child("span");
            span.attr("id", format!("L{}", nr));
            if let Some(class) = file.line(nr).and_then(|l| l.status().css_class()) {
                span.attr("class", class);
            }
            span.text(line);
            pre.text("\n");
        }
        Ok(())
    }

    fn release(&mut self) {
        self.file = None;
    }
}
