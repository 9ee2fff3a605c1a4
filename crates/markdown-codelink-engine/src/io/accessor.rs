use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use super::{IoError, read_file, region, split_lines};

/// Read-only view of the files a document may link to.
///
/// Paths are relative to the accessor's root. Code-link blocks borrow an
/// accessor for the duration of a parse; implementations must not block for
/// long since lookups happen synchronously per line.
pub trait FileAccessor {
    /// Resolves `path` against the accessor root.
    fn fully_qualified_path(&self, path: &RelativePath) -> PathBuf;

    /// Reads the file's lines, or `IoError::NotFound` if it doesn't exist.
    fn read_lines(&self, path: &RelativePath) -> Result<Vec<String>, IoError>;

    fn file_exists(&self, path: &RelativePath) -> bool;

    /// Finds the lexicographically first file in the root directory with
    /// extension `ext` (without the leading dot).
    fn find_file_with_extension(&self, ext: &str) -> Option<RelativePathBuf>;

    /// Returns the lines inside the named region, or `None` if the region
    /// markers aren't present.
    fn extract_region(&self, lines: &[String], region: &str) -> Option<Vec<String>> {
        region::extract(lines, region)
    }
}

/// A [`FileAccessor`] backed by a directory on the local file system.
#[derive(Debug, Clone)]
pub struct DirectoryAccessor {
    root: PathBuf,
}

impl DirectoryAccessor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileAccessor for DirectoryAccessor {
    fn fully_qualified_path(&self, path: &RelativePath) -> PathBuf {
        path.to_path(&self.root)
    }

    fn read_lines(&self, path: &RelativePath) -> Result<Vec<String>, IoError> {
        read_file(path, &self.root).map(|content| split_lines(&content))
    }

    fn file_exists(&self, path: &RelativePath) -> bool {
        path.to_path(&self.root).is_file()
    }

    fn find_file_with_extension(&self, ext: &str) -> Option<RelativePathBuf> {
        let entries = fs::read_dir(&self.root).ok()?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == ext))
            .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
            .collect();
        names.sort();

        names.into_iter().next().map(RelativePathBuf::from)
    }
}
