//! Locating `.feature` files below a source directory.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::CliError;

const FEATURE_EXTENSION: &str = "feature";

/// Find `.feature` files in `root`, descending into subdirectories when
/// `recursive` is set.
///
/// Symbolic links are not followed, so a link pointing back up the tree
/// cannot yield the same file twice. Results are sorted so batches run in a
/// stable order.
///
/// # Errors
///
/// Returns [`CliError::Discover`] when a directory cannot be listed.
pub fn find_feature_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, CliError> {
    let mut walker = WalkDir::new(root).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut features = Vec::new();
    for next in walker {
        let entry = next.map_err(|err| discover_error(root, err))?;
        if is_feature_file(&entry) {
            features.push(entry.into_path());
        }
    }
    features.sort();
    debug!(root = %root.display(), recursive, count = features.len(), "discovered feature files");
    Ok(features)
}

fn discover_error(root: &Path, err: walkdir::Error) -> CliError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    CliError::Discover { path, source }
}

fn is_feature_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .is_some_and(|ext| ext == FEATURE_EXTENSION)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn tree() -> TempDir {
        let dir = TempDir::new().expect("failed to create temp dir");
        let nested = dir.path().join("nested").join("deeper");
        fs::create_dir_all(&nested).expect("failed to create nested dirs");
        for path in [
            dir.path().join("b.feature"),
            dir.path().join("a.feature"),
            dir.path().join("notes.md"),
            dir.path().join("nested").join("c.feature"),
            nested.join("d.feature"),
        ] {
            fs::write(&path, "Feature: x\n").expect("failed to write file");
        }
        dir
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|path| {
                path.strip_prefix(root)
                    .expect("path below root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[rstest]
    fn top_level_search_ignores_subdirectories(tree: TempDir) {
        let files = find_feature_files(tree.path(), false).expect("discovery succeeds");
        assert_eq!(names(tree.path(), &files), ["a.feature", "b.feature"]);
    }

    #[rstest]
    fn recursive_search_finds_nested_files(tree: TempDir) {
        let files = find_feature_files(tree.path(), true).expect("discovery succeeds");
        assert_eq!(
            names(tree.path(), &files),
            [
                "a.feature",
                "b.feature",
                "nested/c.feature",
                "nested/deeper/d.feature",
            ]
        );
    }

    #[cfg(unix)]
    #[rstest]
    fn symlink_cycles_are_not_followed(tree: TempDir) {
        std::os::unix::fs::symlink(tree.path(), tree.path().join("nested").join("back"))
            .expect("failed to create symlink");
        let files = find_feature_files(tree.path(), true).expect("discovery succeeds");
        assert_eq!(
            names(tree.path(), &files),
            [
                "a.feature",
                "b.feature",
                "nested/c.feature",
                "nested/deeper/d.feature",
            ]
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let result = find_feature_files(&dir.path().join("absent"), true);
        assert!(matches!(result, Err(CliError::Discover { .. })));
    }
}
