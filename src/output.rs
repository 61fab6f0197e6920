//! Destinations for rendered report files.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::folder::ReportFolder;

/// Every report destination implements this trait.
pub trait ReportOutput {
    /// Write `contents` as `name` inside `folder`, creating the folder if
    /// needed.
    fn write_file(&mut self, folder: &ReportFolder, name: &str, contents: &str) -> Result<()>;
}

/// Writes the report into a directory on disk.
pub struct FileOutput {
    root: PathBuf,
}

impl FileOutput {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, folder: &ReportFolder, name: &str) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(folder.segments());
        path.push(name);
        path
    }
}

impl ReportOutput for FileOutput {
    fn write_file(&mut self, folder: &ReportFolder, name: &str, contents: &str) -> Result<()> {
        let path = self.path_of(folder, name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote report file");
        Ok(())
    }
}

/// Keeps written files in memory, in write order.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    files: Vec<(String, String)>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(folder: &ReportFolder, name: &str) -> String {
        let mut parts: Vec<&str> = folder.segments().iter().map(String::as_str).collect();
        parts.push(name);
        parts.join("/")
    }

    /// Paths (relative to the report root) in the order they were written.
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|(p, _)| p.as_str()).collect()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| c.as_str())
    }

    /// Position of `path` in write order.
    pub fn position(&self, path: &str) -> Option<usize> {
        self.files.iter().position(|(p, _)| p == path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ReportOutput for MemoryOutput {
    fn write_file(&mut self, folder: &ReportFolder, name: &str, contents: &str) -> Result<()> {
        self.files
            .push((Self::key(folder, name), contents.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_output_creates_folders() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = FileOutput::new(dir.path());
        let folder = ReportFolder::root().sub_folder("com.example");

        out.write_file(&folder, "index.html", "<html></html>").unwrap();

        let written = std::fs::read_to_string(dir.path().join("com.example/index.html")).unwrap();
        assert_eq!(written, "<html></html>");
    }

    #[test]
    fn test_memory_output_keeps_order() {
        let mut out = MemoryOutput::new();
        let pkg = ReportFolder::root().sub_folder("default");
        out.write_file(&pkg, "Foo.html", "a").unwrap();
        out.write_file(&pkg, "index.html", "b").unwrap();
        out.write_file(&ReportFolder::root(), "index.html", "c").unwrap();

        assert_eq!(out.paths(), vec!["default/Foo.html", "default/index.html", "index.html"]);
        assert_eq!(out.get("index.html"), Some("c"));
        assert_eq!(out.position("default/index.html"), Some(1));
    }
}
