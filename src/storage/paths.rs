//! Path construction for checked files
//!
//! Checks refer to files as a home directory, any number of nested
//! segments, and a file name. Each segment is taken relative to its own
//! root, so `"/docs"` and `"docs"` name the same place under the home.

use std::path::{Component, Path, PathBuf};

/// Strips the root and prefix of a path, keeping the rest
fn without_anchor(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect()
}

/// Returns only the root and prefix of a path: `/` for an absolute
/// path, empty for a relative one
pub fn path_anchor(path: &Path) -> PathBuf {
    path.components()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect()
}

/// Creates the path of `file` below `home` and the nested `segments`
pub fn create_path(segments: &[&str], file: impl AsRef<Path>, home: impl AsRef<Path>) -> PathBuf {
    let mut path = home.as_ref().to_path_buf();
    for segment in segments {
        path.push(without_anchor(Path::new(segment)));
    }
    path.push(file);
    path
}

/// Returns true if the specified file exists as a regular file
pub fn check_file_in_directory(segments: &[&str], file: impl AsRef<Path>, home: impl AsRef<Path>) -> bool {
    let path = create_path(segments, file, home);
    let found = path.is_file();
    tracing::debug!(path = %path.display(), found, "checked for file");
    found
}
