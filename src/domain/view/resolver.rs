//! Maps dotted view identifiers to files under the views root

use std::path::{Path, PathBuf};

use crate::config::ViewsConfig;

/// Resolves `layout.header` to `<root>/layout/header.<ext>`.
///
/// Resolution is purely textual; whether the file exists is up to the caller.
#[derive(Debug, Clone)]
pub struct ViewResolver {
    root: PathBuf,
    extension: String,
}

impl ViewResolver {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn from_config(config: &ViewsConfig) -> Self {
        Self::new(&config.path, &config.extension)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Resolve a dotted identifier to a file path under the root
    pub fn resolve(&self, name: &str) -> PathBuf {
        let mut path = self.root.clone();
        let mut segments = name.split('.').peekable();

        while let Some(segment) = segments.next() {
            // A rooted segment would replace the whole path on push
            let segment = segment.trim_start_matches(['/', '\\']);
            if segments.peek().is_some() || self.extension.is_empty() {
                path.push(segment);
            } else {
                path.push(format!("{}.{}", segment, self.extension));
            }
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_resolve_nested() {
        let resolver = ViewResolver::new("views", "html");
        assert_eq!(
            resolver.resolve("layout.header"),
            Path::new("views").join("layout").join("header.html")
        );
    }

    #[test]
    fn test_resolve_single_segment() {
        let resolver = ViewResolver::new("/srv/views", ".tpl");
        assert_eq!(resolver.extension(), "tpl");
        assert_eq!(resolver.resolve("home"), Path::new("/srv/views/home.tpl"));
    }

    #[test]
    fn test_resolve_without_extension() {
        let resolver = ViewResolver::new("views", "");
        assert_eq!(resolver.resolve("a.b"), Path::new("views").join("a").join("b"));
    }

    #[test]
    fn test_resolve_rooted_identifier_stays_under_root() {
        let resolver = ViewResolver::new("views", "html");

        let path = resolver.resolve("/tmp/outside");
        assert!(path.starts_with("views"));
        assert_eq!(path, Path::new("views").join("tmp/outside.html"));

        let nested = resolver.resolve("layout./etc/passwd");
        assert!(nested.starts_with("views"));
        assert_eq!(nested, Path::new("views").join("layout").join("etc/passwd.html"));
    }

    proptest! {
        #[test]
        fn prop_segments_match_identifier(
            segments in prop::collection::vec("[a-z_][a-z0-9_]{0,7}", 1..5)
        ) {
            let resolver = ViewResolver::new("root", "html");
            let identifier = segments.join(".");
            let path = resolver.resolve(&identifier);

            let relative: Vec<String> = path
                .strip_prefix("root")
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();

            let mut expected = segments.clone();
            let last = expected.pop().unwrap();
            expected.push(format!("{}.html", last));

            prop_assert_eq!(relative, expected);
        }
    }
}
