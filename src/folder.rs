//! Hierarchical output locations and the relative links between them.

/// A folder in the report output, as the path segments below the report
/// root. Two folders of the same report can always link to each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ReportFolder {
    segments: Vec<String>,
}

impl ReportFolder {
    /// The report root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn sub_folder(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Relative path from this folder to `other`: one `..` per segment of
    /// `self` beyond the common prefix, then the remaining segments of
    /// `other`. Empty when both are the same folder.
    #[must_use]
    pub fn relative_path_to(&self, other: &ReportFolder) -> String {
        let common = self
            .segments
            .iter()
            .zip(&other.segments)
            .take_while(|(a, b)| a == b)
            .count();

        let ups = std::iter::repeat("..").take(self.segments.len() - common);
        let downs = other.segments[common..].iter().map(String::as_str);
        ups.chain(downs).collect::<Vec<_>>().join("/")
    }

    /// Link from this folder to `file` inside `target`.
    #[must_use]
    pub fn link_to(&self, target: &ReportFolder, file: &str) -> String {
        let path = self.relative_path_to(target);
        if path.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", path, file)
        }
    }
}
