//! Candidate file discovery.
//!
//! Walks a root directory and returns every file with the merge extension as
//! a root-relative path with forward slashes, sorted.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur while discovering files.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Root directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("File name is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Failed to walk {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Find all files with `extension` under `root`.
///
/// Paths in `exclude` (absolute, or relative to the current directory) are
/// skipped. Any unreadable directory aborts the walk.
pub fn discover_files(
    root: &Path,
    extension: &str,
    exclude: &[PathBuf],
) -> DiscoveryResult<Vec<String>> {
    if !root.exists() {
        return Err(DiscoveryError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let excluded: Vec<PathBuf> = exclude.iter().filter_map(|p| absolute(p)).collect();
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }
        if let Some(abs) = absolute(entry.path()) {
            if excluded.contains(&abs) {
                continue;
            }
        }

        if let Ok(relative) = entry.path().strip_prefix(root) {
            let name = to_node_name(relative)
                .ok_or_else(|| DiscoveryError::NonUtf8Path(entry.path().to_path_buf()))?;
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

/// Render a relative path the way graph nodes are spelled, or `None` if any
/// component is not valid UTF-8.
fn to_node_name(relative: &Path) -> Option<String> {
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == extension)
}

fn absolute(path: &Path) -> Option<PathBuf> {
    // The output file may not exist yet, so canonicalize its parent.
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = match parent {
        Some(parent) => parent.canonicalize().ok()?,
        None => std::env::current_dir().ok()?,
    };
    Some(dir.join(path.file_name()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    fn discover_text_files(root: &Path) -> DiscoveryResult<Vec<String>> {
        discover_files(root, "txt", &[])
    }

    #[test]
    fn test_discovers_nested_txt_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "Folder2/File2-2.txt");
        touch(&dir, "Folder1/File1-1.txt");
        touch(&dir, "Folder2/File2-1.txt");
        touch(&dir, "level1/level2/level3/deep.txt");
        touch(&dir, "root.txt");

        let files = discover_text_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                "Folder1/File1-1.txt",
                "Folder2/File2-1.txt",
                "Folder2/File2-2.txt",
                "level1/level2/level3/deep.txt",
                "root.txt",
            ]
        );
    }

    #[test]
    fn test_skips_other_extensions_and_dirs() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "notes.md");
        touch(&dir, "data.txt.bak");
        touch(&dir, "keep.txt");
        fs::create_dir_all(dir.path().join("folder.txt")).unwrap();

        assert_eq!(discover_text_files(dir.path()).unwrap(), vec!["keep.txt"]);
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        touch(&dir, "b.part");

        assert_eq!(
            discover_files(dir.path(), "part", &[]).unwrap(),
            vec!["b.part"]
        );
    }

    #[test]
    fn test_excludes_output_path() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        touch(&dir, "output.txt");

        let exclude = vec![dir.path().join("output.txt")];
        assert_eq!(
            discover_files(dir.path(), "txt", &exclude).unwrap(),
            vec!["a.txt"]
        );
    }

    #[test]
    fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        assert!(discover_text_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = discover_text_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, DiscoveryError::NotFound(_)));
    }

    #[test]
    fn test_root_is_file() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        let err = discover_text_files(&dir.path().join("a.txt")).unwrap_err();
        assert!(matches!(err, DiscoveryError::NotADirectory(_)));
    }

    #[test]
    fn test_node_name_uses_forward_slashes() {
        let relative: PathBuf = ["Folder 1", "File 1-1.txt"].iter().collect();
        assert_eq!(
            to_node_name(&relative).as_deref(),
            Some("Folder 1/File 1-1.txt")
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        touch(&dir, "ok.txt");
        let bad = dir.path().join(OsStr::from_bytes(b"bad\xff.txt"));
        fs::write(&bad, "x").unwrap();

        let err = discover_text_files(dir.path()).unwrap_err();
        let DiscoveryError::NonUtf8Path(path) = &err else {
            panic!("expected a non-UTF-8 path error, got {err}");
        };
        assert_eq!(*path, bad);
    }
}
