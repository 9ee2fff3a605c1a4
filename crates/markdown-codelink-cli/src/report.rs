//! Checks markdown files and formats what the code-link blocks resolved to.

use anyhow::{Context, Result};
use markdown_codelink_engine::{
    CodeLinkBlock, CodeLinkSettings, DirectoryAccessor, io, parse_document_with_settings,
};
use relative_path::RelativePathBuf;
use std::fmt::{self, Display};
use std::path::Path;
use xi_rope::Rope;

/// One code-link block and what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 1-based line of the opening fence.
    pub line: usize,
    pub source_file: Option<String>,
    pub region: Option<String>,
    pub line_count: usize,
    pub diagnostics: Vec<String>,
}

impl Finding {
    fn new(line: usize, block: &CodeLinkBlock) -> Self {
        Self {
            line,
            source_file: block.source_file().map(|path| path.to_string()),
            region: block.region().map(str::to_string),
            line_count: block.lines().len(),
            diagnostics: block.diagnostics().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Document path relative to the docs folder.
    pub path: RelativePathBuf,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn diagnostic_count(&self) -> usize {
        self.findings.iter().map(|f| f.diagnostics.len()).sum()
    }
}

impl Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            let target = match (&finding.source_file, &finding.region) {
                (Some(source), Some(region)) => format!("{source}#{region}"),
                (Some(source), None) => source.clone(),
                (None, _) => "literal".to_string(),
            };
            writeln!(
                f,
                "{}:{}: [{target}] {} line(s)",
                self.path, finding.line, finding.line_count
            )?;
            for diagnostic in &finding.diagnostics {
                writeln!(f, "    {diagnostic}")?;
            }
        }
        Ok(())
    }
}

/// Parses `file` (below `docs_root`) with links resolved against the file's
/// own directory.
pub fn check_file(docs_root: &Path, file: &Path, settings: &CodeLinkSettings) -> Result<FileReport> {
    let relative = file
        .strip_prefix(docs_root)
        .ok()
        .and_then(|path| RelativePathBuf::from_path(path).ok())
        .with_context(|| format!("{} is not inside {}", file.display(), docs_root.display()))?;

    let content = io::read_file(&relative, docs_root)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let rope = Rope::from(content.as_str());

    let link_root = relative
        .parent()
        .map(|dir| dir.to_path(docs_root))
        .unwrap_or_else(|| docs_root.to_path_buf());
    let accessor = DirectoryAccessor::new(link_root);
    let doc = parse_document_with_settings(&rope, &accessor, settings.clone());

    let findings = doc
        .blocks
        .iter()
        .filter_map(|block| {
            let link = block.as_code_link()?;
            Some(Finding::new(block.line + 1, link))
        })
        .collect();

    Ok(FileReport {
        path: relative,
        findings,
    })
}
