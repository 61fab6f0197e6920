//! Report generation entry point.

use tracing::info;

use crate::compose::{compose, ComposeStats};
use crate::context::ReportContext;
use crate::error::Result;
use crate::folder::ReportFolder;
use crate::model::BundleCoverage;
use crate::output::ReportOutput;

/// Outcome of one report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStats {
    pub pages: usize,
    pub compose: ComposeStats,
}

/// Compose the page tree for `bundle` and write every page to `output`.
///
/// The first I/O failure aborts the run; files written before it are left
/// in place.
pub fn render_report(
    bundle: BundleCoverage,
    ctx: &ReportContext,
    output: &mut dyn ReportOutput,
) -> Result<ReportStats> {
    let name = bundle.name.clone();
    ctx.resources.write_all(output)?;

    let mut composition = compose(bundle, ReportFolder::root(), ctx)?;
    let root = composition.tree.root();
    composition.tree.render(root, ctx, output)?;

    let stats = ReportStats {
        pages: composition.tree.len(),
        compose: composition.stats,
    };
    info!(bundle = %name, pages = stats.pages, "report written");
    Ok(stats)
}
