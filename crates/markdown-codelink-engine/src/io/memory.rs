use relative_path::{RelativePath, RelativePathBuf};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{FileAccessor, IoError, split_lines};

/// A [`FileAccessor`] over an in-memory set of files.
///
/// Paths are normalized on insert and lookup, so `./src/A.cs` and
/// `src/A.cs` name the same file.
#[derive(Debug, Clone)]
pub struct InMemoryAccessor {
    root: PathBuf,
    files: BTreeMap<RelativePathBuf, String>,
}

impl InMemoryAccessor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        self.files
            .insert(RelativePath::new(path).normalize(), content.into());
    }
}

impl FileAccessor for InMemoryAccessor {
    fn fully_qualified_path(&self, path: &RelativePath) -> PathBuf {
        path.normalize().to_path(&self.root)
    }

    fn read_lines(&self, path: &RelativePath) -> Result<Vec<String>, IoError> {
        self.files
            .get(&path.normalize())
            .map(|content| split_lines(content))
            .ok_or_else(|| IoError::NotFound(self.fully_qualified_path(path)))
    }

    fn file_exists(&self, path: &RelativePath) -> bool {
        self.files.contains_key(&path.normalize())
    }

    fn find_file_with_extension(&self, ext: &str) -> Option<RelativePathBuf> {
        // BTreeMap iteration is already sorted.
        self.files
            .keys()
            .find(|path| !path.as_str().contains('/') && path.extension() == Some(ext))
            .cloned()
    }
}
