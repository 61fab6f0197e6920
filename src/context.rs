//! Read-only settings shared by every page of one report run.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Deserialize;

use crate::error::Result;
use crate::folder::ReportFolder;
use crate::locator::SourceLocator;
use crate::names::{JavaNames, LanguageNames};
use crate::output::ReportOutput;

/// Labels shown in the title area of every page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayMetadata {
    pub project: String,
    pub app: String,
    pub env: String,
    pub time: String,
}

impl DisplayMetadata {
    /// The configured timestamp, or today's date when it is blank.
    #[must_use]
    pub fn timestamp_label(&self) -> String {
        if self.time.trim().is_empty() {
            Local::now().format("%Y-%m-%d").to_string()
        } else {
            self.time.clone()
        }
    }
}

/// `[report]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub locale: Option<String>,
    pub encoding: Option<String>,
    pub footer: Option<String>,
    pub source_roots: Vec<PathBuf>,
    pub tab_width: Option<u32>,
}

/// Contents of a `covpages.toml` config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub display: DisplayMetadata,
    pub report: ReportSettings,
}

impl ConfigFile {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

/// Folder holding the shared static resources.
pub const RESOURCE_FOLDER: &str = "covpages-resources";
pub const STYLESHEET: &str = "report.css";
pub const MENU_STYLE: &str = "tree.css";
pub const SCRIPT: &str = "report.js";

const BUNDLED: &[(&str, &str)] = &[
    (STYLESHEET, include_str!("../assets/report.css")),
    (MENU_STYLE, include_str!("../assets/tree.css")),
    (SCRIPT, include_str!("../assets/report.js")),
];

/// Static files shared by all pages.
#[derive(Debug, Clone)]
pub struct Resources {
    folder: ReportFolder,
}

impl Resources {
    pub fn new(root: &ReportFolder) -> Self {
        Self {
            folder: root.sub_folder(RESOURCE_FOLDER),
        }
    }

    /// Link to resource `name` as seen from `base`.
    #[must_use]
    pub fn link(&self, base: &ReportFolder, name: &str) -> String {
        base.link_to(&self.folder, name)
    }

    pub fn write_all(&self, output: &mut dyn ReportOutput) -> Result<()> {
        for (name, contents) in BUNDLED {
            output.write_file(&self.folder, name, contents)?;
        }
        Ok(())
    }
}

pub const DEFAULT_TAB_WIDTH: u32 = 4;

/// Settings and collaborators threaded through composition and rendering.
pub struct ReportContext {
    pub metadata: DisplayMetadata,
    pub names: Box<dyn LanguageNames>,
    pub locator: Option<Box<dyn SourceLocator>>,
    pub resources: Resources,
    pub locale: String,
    pub encoding: String,
    pub footer: Option<String>,
    pub tab_width: u32,
}

impl ReportContext {
    pub fn new(metadata: DisplayMetadata) -> Self {
        Self {
            metadata,
            names: Box::new(JavaNames),
            locator: None,
            resources: Resources::new(&ReportFolder::root()),
            locale: "en".to_string(),
            encoding: "UTF-8".to_string(),
            footer: None,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    /// Context from a config file; source roots become a directory locator.
    pub fn from_config(config: ConfigFile) -> Self {
        let ConfigFile { display, report } = config;
        let mut ctx = Self::new(display);
        if let Some(locale) = report.locale {
            ctx.locale = locale;
        }
        if let Some(encoding) = report.encoding {
            ctx.encoding = encoding;
        }
        if let Some(width) = report.tab_width {
            ctx.tab_width = width;
        }
        ctx.footer = report.footer;
        if !report.source_roots.is_empty() {
            ctx.locator = Some(Box::new(crate::locator::DirectorySourceLocator::new(
                report.source_roots,
            )));
        }
        ctx
    }

    pub fn with_locator(mut self, locator: Box<dyn SourceLocator>) -> Self {
        self.locator = Some(locator);
        self
    }
}
