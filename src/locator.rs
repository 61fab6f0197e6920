//! Lookup of source file text for annotated source pages.

use std::path::PathBuf;

use tracing::{debug, warn};

/// Supplies the text of a source file, if it can be found.
pub trait SourceLocator {
    /// `package` is the VM package name (`com/example`), `file_name` the
    /// bare source file name (`Foo.java`).
    fn source(&self, package: &str, file_name: &str) -> Option<String>;

    /// Whether `source` would find the file. Used while composing the
    /// report, before any text is needed.
    fn exists(&self, package: &str, file_name: &str) -> bool {
        self.source(package, file_name).is_some()
    }
}

/// Looks up sources below one or more root directories, using the package
/// name as the relative directory.
#[derive(Debug, Clone, Default)]
pub struct DirectorySourceLocator {
    roots: Vec<PathBuf>,
}

impl DirectorySourceLocator {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    fn candidates<'a>(
        &'a self,
        package: &'a str,
        file_name: &'a str,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        self.roots.iter().map(move |root| {
            let mut path = root.clone();
            path.extend(package.split('/').filter(|s| !s.is_empty()));
            path.push(file_name);
            path
        })
    }
}

impl SourceLocator for DirectorySourceLocator {
    fn source(&self, package: &str, file_name: &str) -> Option<String> {
        for path in self.candidates(package, file_name) {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    debug!(path = %path.display(), "located source file");
                    return Some(String::from_utf8_lossy(&bytes).into_owned());
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not read source file");
                }
            }
        }
        None
    }

    fn exists(&self, package: &str, file_name: &str) -> bool {
        self.candidates(package, file_name).any(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_file_in_second_root() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let pkg_dir = second.path().join("com/example");
        std::fs::create_dir_all(&pkg_dir).unwrap();
        std::fs::write(pkg_dir.join("Foo.java"), "class Foo {}\n").unwrap();

        let locator = DirectorySourceLocator::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);

        assert_eq!(
            locator.source("com/example", "Foo.java").as_deref(),
            Some("class Foo {}\n")
        );
        assert_eq!(locator.source("com/example", "Bar.java"), None);
        assert!(locator.exists("com/example", "Foo.java"));
        assert!(!locator.exists("com/example", "Bar.java"));
    }

    #[test]
    fn test_default_package() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("Main.java"), "class Main {}").unwrap();

        let locator = DirectorySourceLocator::new(vec![root.path().to_path_buf()]);
        assert!(locator.source("", "Main.java").is_some());
    }
}
