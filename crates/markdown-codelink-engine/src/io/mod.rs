pub mod accessor;
pub mod memory;
pub mod region;

pub use accessor::{DirectoryAccessor, FileAccessor};
pub use memory::InMemoryAccessor;

use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid docs directory: {0}")]
    InvalidDocsDir(String),
}

/// Read a file below `root` and return its content
pub fn read_file(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.is_file() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Split file text into lines, dropping line terminators.
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

/// Scan for markdown files in the docs directory
pub fn scan_markdown_files(docs_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !docs_root.exists() {
        return Err(IoError::InvalidDocsDir(
            "docs directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(docs_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_docs_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidDocsDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
