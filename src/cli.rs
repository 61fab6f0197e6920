//! Command handler functions for the covpages CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::context::{ConfigFile, DisplayMetadata, ReportContext};
use crate::locator::DirectorySourceLocator;
use crate::model::{BundleCoverage, CoverageNode};
use crate::output::FileOutput;
use crate::parsers::jacoco;
use crate::report::render_report;
use crate::summary::Rollup;

/// Command-line overrides applied on top of an optional config file.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    pub config: Option<PathBuf>,
    pub project: Option<String>,
    pub app: Option<String>,
    pub env: Option<String>,
    pub time: Option<String>,
    pub source_roots: Vec<PathBuf>,
    pub tab_width: Option<u32>,
    pub locale: Option<String>,
}

impl HtmlOptions {
    /// Merge config file values with the flags; flags win.
    pub fn into_context(self) -> Result<ReportContext> {
        let mut config = match &self.config {
            Some(path) => ConfigFile::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ConfigFile::default(),
        };

        let display: &mut DisplayMetadata = &mut config.display;
        for (slot, value) in [
            (&mut display.project, self.project),
            (&mut display.app, self.app),
            (&mut display.env, self.env),
            (&mut display.time, self.time),
        ] {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if self.tab_width.is_some() {
            config.report.tab_width = self.tab_width;
        }
        if self.locale.is_some() {
            config.report.locale = self.locale;
        }

        let mut ctx = ReportContext::from_config(config.clone());
        if !self.source_roots.is_empty() {
            let mut roots = config.report.source_roots;
            roots.extend(self.source_roots);
            ctx = ctx.with_locator(Box::new(DirectorySourceLocator::new(roots)));
        }
        Ok(ctx)
    }
}

fn load_bundle(input: &Path) -> Result<BundleCoverage> {
    let content =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    if !jacoco::looks_like_jacoco(&content) {
        anyhow::bail!("{} does not look like a JaCoCo XML report", input.display());
    }
    Ok(jacoco::parse(&content)?)
}

pub fn cmd_html(input: &Path, out_dir: &Path, ctx: &ReportContext) -> Result<String> {
    let bundle = load_bundle(input)?;
    let name = bundle.name.clone();
    let mut output = FileOutput::new(out_dir);
    let stats = render_report(bundle, ctx, &mut output)
        .with_context(|| format!("Failed to write report to {}", out_dir.display()))?;

    let mut out = String::new();
    writeln!(
        out,
        "Wrote {} pages for '{}' to {}",
        stats.pages,
        name,
        out_dir.display()
    )
    .unwrap();
    let c = stats.compose;
    writeln!(
        out,
        "Packages:   {} ({} without code skipped)",
        c.packages_produced(),
        c.packages_skipped
    )
    .unwrap();
    writeln!(
        out,
        "Classes:    {} ({} without code skipped)",
        c.classes_produced(),
        c.classes_skipped
    )
    .unwrap();
    if c.source_pages > 0 {
        writeln!(out, "Sources:    {}", c.source_pages).unwrap();
    }
    Ok(out)
}

pub fn cmd_summary(input: &Path) -> Result<String> {
    let bundle = load_bundle(input)?;
    Ok(format_summary(&bundle))
}

/// Text rollup of a bundle, one line per counter category.
pub fn format_summary(bundle: &BundleCoverage) -> String {
    let mut out = String::new();
    writeln!(out, "Bundle:     {}", bundle.name).unwrap();
    writeln!(
        out,
        "Packages:   {}",
        bundle.packages.iter().filter(|p| p.contains_code()).count()
    )
    .unwrap();
    for entry in &Rollup::of(bundle).entries {
        let label = format!("{}:", crate::summary::plural_label(entry.kind));
        writeln!(
            out,
            "{:<11} {}/{} ({:.2}%)",
            label, entry.covered, entry.total, entry.percent
        )
        .unwrap();
    }
    out
}
