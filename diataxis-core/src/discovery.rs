use crate::error::{LintError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions scanned when the caller does not name any.
pub const DEFAULT_EXTENSIONS: [&str; 1] = ["mdx"];

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

/// An entry the walker found but could not visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning a root: documents to analyze plus entries that could
/// not be visited, both sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub documents: Vec<PathBuf>,
    pub failures: Vec<DiscoveryFailure>,
}

impl Discovery {
    pub fn len(&self) -> usize {
        self.documents.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.failures.is_empty()
    }
}

/// Documents under `root`.
///
/// A file root is returned as-is whatever its extension. A directory is
/// walked recursively, following symlinks, for files with one of
/// `extensions` (leading dots are ignored). Entries that cannot be visited
/// are kept as failures unless their name marks them as some other kind of
/// file; only a missing or unreadable root is an error.
pub fn discover(root: &Path, extensions: &[String]) -> Result<Discovery> {
    let metadata = std::fs::metadata(root).map_err(|source| LintError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if metadata.is_file() {
        return Ok(Discovery {
            documents: vec![root.to_path_buf()],
            failures: Vec::new(),
        });
    }

    let extensions: Vec<String> = extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_string())
        .collect();

    let mut discovery = Discovery::default();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                // Directories and wanted documents only; a broken image link is not our concern.
                if path.extension().is_some() && !has_extension(&path, &extensions) {
                    tracing::debug!(path = %path.display(), error = %err, "ignoring unreadable entry");
                    continue;
                }
                let reason = match err.io_error() {
                    Some(io) => io.to_string(),
                    None => err.to_string(),
                };
                tracing::warn!(path = %path.display(), error = %reason, "unreadable entry");
                discovery.failures.push(DiscoveryFailure { path, reason });
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), &extensions) {
            discovery.documents.push(entry.into_path());
        }
    }
    discovery.documents.sort();
    discovery.failures.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::info!(
        root = %root.display(),
        count = discovery.documents.len(),
        failures = discovery.failures.len(),
        "discovered documents"
    );
    Ok(discovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn mdx() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn walks_recursively_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("guides/nested")).unwrap();
        fs::write(dir.path().join("b.mdx"), "").unwrap();
        fs::write(dir.path().join("a.mdx"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::write(dir.path().join("guides/nested/c.MDX"), "").unwrap();

        let found = discover(dir.path(), &mdx()).unwrap();
        assert!(found.failures.is_empty());
        let names: Vec<_> = found
            .documents
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.mdx", "b.mdx", "guides/nested/c.MDX"]);
    }

    #[test]
    fn extra_extensions_accept_leading_dot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mdx"), "").unwrap();
        fs::write(dir.path().join("b.md"), "").unwrap();
        let found = discover(dir.path(), &["mdx".to_string(), ".md".to_string()]).unwrap();
        assert_eq!(found.documents.len(), 2);
    }

    #[test]
    fn file_root_is_returned_directly() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.txt");
        fs::write(&file, "").unwrap();
        assert_eq!(discover(&file, &mdx()).unwrap().documents, vec![file]);
    }

    #[test]
    fn missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(&dir.path().join("nope"), &mdx()).unwrap_err();
        assert!(matches!(err, LintError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn broken_links_to_documents_are_failures() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mdx"), "").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.mdx"), dir.path().join("ghost.mdx")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.png"), dir.path().join("logo.png")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("shared")).unwrap();

        let found = discover(dir.path(), &mdx()).unwrap();
        assert_eq!(found.documents, vec![dir.path().join("a.mdx")]);
        let failed: Vec<_> = found.failures.iter().map(|f| f.path.clone()).collect();
        assert_eq!(failed, vec![dir.path().join("ghost.mdx"), dir.path().join("shared")]);
        assert!(found.failures.iter().all(|f| !f.reason.is_empty()));
        assert_eq!(found.len(), 3);
    }
}
