//! Code-link blocks: fenced blocks whose info string names a source file.
//!
//! ````markdown
//! ```csharp ./Program.cs --region Main --session intro
//! // ignored: content comes from the Main region of Program.cs
//! ```
//! ````
//!
//! When a source file is given and resolves to non-blank content, the
//! block's lines are replaced by that content and body lines in the
//! document are discarded. Otherwise the body is kept as literal content.
//! Every problem found along the way becomes a diagnostic on the block.

use relative_path::{RelativePath, RelativePathBuf};
use std::path::PathBuf;

use crate::io::{FileAccessor, IoError};
use crate::parsing::blocks::{
    cursor::LineCursor,
    parser::{BlockState, FencedBlockParser},
    types::{BlockLifecycle, FencedLeaf},
};
use crate::parsing::link_options::{LinkOptions, ParsedInfo, parse_info};

use super::code_fence::{CodeFence, Fence};

/// A code-link block. Diagnostics are append-only, and nothing changes once
/// the block is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLinkBlock {
    fence: Fence,
    source_file: Option<RelativePathBuf>,
    region: Option<String>,
    session: Option<String>,
    package: Option<String>,
    project: Option<RelativePathBuf>,
    project_file: Option<PathBuf>,
    lines: Vec<String>,
    diagnostics: Vec<String>,
    state: BlockLifecycle,
}

impl CodeLinkBlock {
    pub fn new(fence: Fence, options: LinkOptions) -> Self {
        Self {
            fence,
            source_file: options.source_file,
            region: options.region,
            session: options.session,
            package: options.package,
            project: options.project,
            project_file: None,
            lines: vec![],
            diagnostics: vec![],
            state: BlockLifecycle::Open,
        }
    }

    pub fn fence(&self) -> Fence {
        self.fence
    }

    pub fn source_file(&self) -> Option<&RelativePathBuf> {
        self.source_file.as_ref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// The `--project` path as written, whether or not it resolved.
    pub fn project(&self) -> Option<&RelativePathBuf> {
        self.project.as_ref()
    }

    /// Fully qualified path of the project file, explicit or discovered.
    /// Always `None` when a package was given.
    pub fn project_file(&self) -> Option<&PathBuf> {
        self.project_file.as_ref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn is_closed(&self) -> bool {
        self.state == BlockLifecycle::Closed
    }

    /// True when content came from the source file, so body lines in the
    /// document are ignored.
    pub fn has_linked_content(&self) -> bool {
        self.source_file.is_some() && self.lines.iter().any(|line| !line.trim().is_empty())
    }

    pub fn add_diagnostic(&mut self, message: impl Into<String>) {
        if !self.is_closed() {
            self.diagnostics.push(message.into());
        }
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        if !self.is_closed() {
            self.lines.push(line.to_string());
        }
    }

    pub(crate) fn close(&mut self) {
        self.state = BlockLifecycle::Closed;
    }

    fn set_linked_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }
}

/// Settings for recognizing code-link blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLinkSettings {
    /// Leading info-string word that marks a code-link block.
    pub keyword: String,
    /// Extension (without dot) used to discover a project file.
    pub project_extension: String,
}

impl Default for CodeLinkSettings {
    fn default() -> Self {
        Self {
            keyword: "csharp".to_string(),
            project_extension: "csproj".to_string(),
        }
    }
}

/// Recognizes code-link blocks and resolves their content through a
/// [`FileAccessor`].
pub struct CodeLinkParser<'a> {
    accessor: &'a dyn FileAccessor,
    settings: CodeLinkSettings,
}

impl<'a> CodeLinkParser<'a> {
    pub fn new(accessor: &'a dyn FileAccessor) -> Self {
        Self::with_settings(accessor, CodeLinkSettings::default())
    }

    pub fn with_settings(accessor: &'a dyn FileAccessor, settings: CodeLinkSettings) -> Self {
        Self { accessor, settings }
    }

    pub fn settings(&self) -> &CodeLinkSettings {
        &self.settings
    }

    /// Project/package rules. A package wins over a project and skips
    /// project resolution entirely.
    fn resolve_project(&self, block: &mut CodeLinkBlock, parsed: &ParsedInfo) {
        if block.package.is_none() {
            let (project, attempted) = match &parsed.options.project {
                Some(path) => (
                    self.accessor.file_exists(path).then_some(path.clone()),
                    self.accessor.fully_qualified_path(path),
                ),
                None if parsed.project_given => (None, self.root()),
                None => (
                    self.accessor
                        .find_file_with_extension(&self.settings.project_extension),
                    self.root(),
                ),
            };

            block.project_file = project
                .as_ref()
                .map(|path| self.accessor.fully_qualified_path(path));

            if block.project_file.is_none() && block.source_file.is_some() {
                block.add_diagnostic(format!(
                    "No project file could be found at path {}",
                    attempted.display()
                ));
            }
        }

        if parsed.project_given && parsed.package_given {
            block.add_diagnostic("Can't specify both --project and --package");
        }
    }

    fn resolve_content(&self, block: &mut CodeLinkBlock) {
        let Some(source_file) = block.source_file.clone() else {
            return;
        };

        let lines = match self.accessor.read_lines(&source_file) {
            Ok(lines) => lines,
            Err(IoError::NotFound(path)) => {
                log::warn!("Linked file not found: {}", path.display());
                block.add_diagnostic(format!("File not found: {source_file}"));
                return;
            }
            Err(e) => {
                log::warn!("Failed to read linked file {source_file}: {e}");
                block.add_diagnostic(format!("Could not read file {source_file}: {e}"));
                return;
            }
        };

        let region = block.region.clone();
        let lines = match region.as_deref() {
            Some(region) => match self.accessor.extract_region(&lines, region) {
                Some(region_lines) => region_lines,
                None => {
                    log::warn!("Region {region} not found in {source_file}");
                    block.add_diagnostic(format!(
                        "Region \"{region}\" not found in file {source_file}"
                    ));
                    return;
                }
            },
            None => lines,
        };

        block.set_linked_lines(lines);
    }

    fn root(&self) -> PathBuf {
        self.accessor.fully_qualified_path(RelativePath::new(""))
    }
}

impl FencedBlockParser for CodeLinkParser<'_> {
    fn opening_chars(&self) -> &[char] {
        &[CodeFence::BACKTICK]
    }

    fn try_open(&self, fence: Fence, info: &str) -> Option<FencedLeaf> {
        let Some(parsed) = parse_info(&self.settings.keyword, info) else {
            log::debug!("Not a code-link fence: {info:?}");
            return None;
        };

        let mut block = CodeLinkBlock::new(fence, parsed.options.clone());
        for error in &parsed.errors {
            block.add_diagnostic(error.as_str());
        }
        self.resolve_project(&mut block, &parsed);
        self.resolve_content(&mut block);

        log::debug!(
            "Opened code-link block: source={:?} region={:?} lines={} diagnostics={}",
            block.source_file,
            block.region,
            block.lines.len(),
            block.diagnostics.len()
        );

        Some(FencedLeaf::CodeLink(block))
    }

    fn try_continue(&self, line: &mut LineCursor<'_>, leaf: &FencedLeaf) -> BlockState {
        if leaf.is_closed() || CodeFence::closes(leaf.fence(), line) {
            return BlockState::BreakDiscard;
        }

        line.go_to_column(line.column_before_indent());

        match leaf {
            FencedLeaf::CodeLink(block) if block.has_linked_content() => {
                BlockState::ContinueDiscard
            }
            _ => BlockState::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::InMemoryAccessor;
    use crate::parsing::blocks::kinds::FenceKind;
    use pretty_assertions::assert_eq;

    const PROGRAM: &str = "using System;\n\
        class Program {\n\
        #region Main\n\
        static void Main() {\n\
        Console.WriteLine(\"hi\");\n\
        }\n\
        #endregion\n\
        }";

    fn fence() -> Fence {
        Fence {
            kind: FenceKind::Backticks,
            count: 3,
            indent: 0,
        }
    }

    fn accessor() -> InMemoryAccessor {
        InMemoryAccessor::new("/docs")
            .with_file("Program.cs", PROGRAM)
            .with_file("App.csproj", "<Project />")
    }

    fn open(accessor: &dyn FileAccessor, info: &str) -> CodeLinkBlock {
        match CodeLinkParser::new(accessor).try_open(fence(), info) {
            Some(FencedLeaf::CodeLink(block)) => block,
            other => panic!("expected a code-link block, got {other:?}"),
        }
    }

    #[test]
    fn declines_other_keywords() {
        let accessor = accessor();
        let parser = CodeLinkParser::new(&accessor);
        assert_eq!(parser.try_open(fence(), "ruby foo.rb"), None);
        assert_eq!(parser.try_open(fence(), ""), None);
    }

    #[test]
    fn custom_keyword() {
        let accessor = accessor();
        let parser = CodeLinkParser::with_settings(
            &accessor,
            CodeLinkSettings {
                keyword: "fsharp".into(),
                project_extension: "fsproj".into(),
            },
        );
        assert_eq!(parser.try_open(fence(), "csharp Program.cs"), None);

        match parser.try_open(fence(), "fsharp") {
            Some(FencedLeaf::CodeLink(block)) => assert!(block.diagnostics().is_empty()),
            other => panic!("expected a code-link block, got {other:?}"),
        }
    }

    #[test]
    fn literal_block_has_no_content_or_diagnostics() {
        let block = open(&accessor(), "csharp --session one");

        assert_eq!(block.source_file(), None);
        assert_eq!(block.session(), Some("one"));
        assert!(block.lines().is_empty());
        assert!(block.diagnostics().is_empty());
        assert!(!block.has_linked_content());
    }

    #[test]
    fn whole_file_content_is_linked() {
        let block = open(&accessor(), "csharp Program.cs");

        let expected: Vec<String> = PROGRAM.lines().map(str::to_string).collect();
        assert_eq!(block.lines(), expected.as_slice());
        assert!(block.has_linked_content());
        assert!(block.diagnostics().is_empty());
        assert_eq!(block.project_file(), Some(&PathBuf::from("/docs/App.csproj")));
    }

    #[test]
    fn region_content_is_linked() {
        let block = open(&accessor(), "csharp ./Program.cs --region Main");

        assert_eq!(
            block.lines(),
            &["static void Main() {", "Console.WriteLine(\"hi\");", "}"]
        );
        assert_eq!(block.region(), Some("Main"));
        assert!(block.diagnostics().is_empty());
    }

    #[test]
    fn missing_region_is_a_diagnostic() {
        let block = open(&accessor(), "csharp Program.cs --region Nope");

        assert!(block.lines().is_empty());
        assert_eq!(
            block.diagnostics(),
            &["Region \"Nope\" not found in file Program.cs"]
        );
    }

    #[test]
    fn missing_file_is_a_diagnostic() {
        let block = open(&accessor(), "csharp missing.cs");

        assert!(block.lines().is_empty());
        assert_eq!(block.diagnostics(), &["File not found: missing.cs"]);
        assert_eq!(
            block.source_file(),
            Some(&RelativePathBuf::from("missing.cs"))
        );
    }

    #[test]
    fn missing_project_is_reported_only_with_a_source_file() {
        let accessor = InMemoryAccessor::new("/docs").with_file("Program.cs", PROGRAM);

        let literal = open(&accessor, "csharp");
        assert!(literal.diagnostics().is_empty());

        let linked = open(&accessor, "csharp Program.cs");
        assert_eq!(
            linked.diagnostics(),
            &["No project file could be found at path /docs"]
        );
        assert!(linked.has_linked_content());
    }

    #[test]
    fn explicit_project_is_resolved() {
        let accessor = accessor().with_file("src/Other.csproj", "<Project />");
        let block = open(&accessor, "csharp Program.cs --project src/Other.csproj");

        assert_eq!(
            block.project_file(),
            Some(&PathBuf::from("/docs/src/Other.csproj"))
        );
        assert!(block.diagnostics().is_empty());
    }

    #[test]
    fn explicit_missing_project_names_the_attempted_path() {
        let block = open(&accessor(), "csharp Program.cs --project nope.csproj");

        assert_eq!(block.project(), Some(&RelativePathBuf::from("nope.csproj")));
        assert_eq!(block.project_file(), None);
        assert_eq!(
            block.diagnostics(),
            &["No project file could be found at path /docs/nope.csproj"]
        );
    }

    #[test]
    fn package_wins_over_project() {
        let block = open(&accessor(), "csharp --package Foo --project bar.csproj");

        assert_eq!(block.package(), Some("Foo"));
        assert_eq!(block.project(), Some(&RelativePathBuf::from("bar.csproj")));
        assert_eq!(block.project_file(), None);
        assert_eq!(
            block.diagnostics(),
            &["Can't specify both --project and --package"]
        );
    }

    #[test]
    fn both_flags_conflict_even_when_malformed() {
        let block = open(&accessor(), "csharp --project --package");

        let conflicts = block
            .diagnostics()
            .iter()
            .filter(|d| d.starts_with("Can't specify both"))
            .count();
        assert_eq!(conflicts, 1);
        assert_eq!(
            block.diagnostics()[0],
            "Required argument missing for option: --project"
        );
    }

    #[test]
    fn package_skips_project_discovery() {
        let accessor = InMemoryAccessor::new("/docs").with_file("Program.cs", PROGRAM);
        let block = open(&accessor, "csharp Program.cs --package Foo");

        assert!(block.diagnostics().is_empty());
        assert_eq!(block.package(), Some("Foo"));
    }

    #[test]
    fn grammar_errors_come_before_validation_errors() {
        let accessor = InMemoryAccessor::new("/docs");
        let block = open(&accessor, "csharp missing.cs --bogus");

        assert_eq!(
            block.diagnostics(),
            &[
                "Unrecognized command or argument '--bogus'",
                "No project file could be found at path /docs",
                "File not found: missing.cs",
            ]
        );
    }

    #[test]
    fn linked_blocks_discard_body_lines() {
        let accessor = accessor();
        let parser = CodeLinkParser::new(&accessor);
        let leaf = parser.try_open(fence(), "csharp Program.cs").unwrap();

        let mut line = LineCursor::new("body text");
        assert_eq!(
            parser.try_continue(&mut line, &leaf),
            BlockState::ContinueDiscard
        );
    }

    #[test]
    fn unresolved_blocks_keep_body_lines() {
        let accessor = accessor();
        let parser = CodeLinkParser::new(&accessor);
        let leaf = parser.try_open(fence(), "csharp missing.cs").unwrap();

        let mut line = LineCursor::new("  body text");
        assert_eq!(parser.try_continue(&mut line, &leaf), BlockState::Continue);
        assert_eq!(line.rest(), "  body text");
    }

    #[test]
    fn closing_fence_breaks() {
        let accessor = accessor();
        let parser = CodeLinkParser::new(&accessor);
        let leaf = parser.try_open(fence(), "csharp").unwrap();

        let mut line = LineCursor::new("````   ");
        assert_eq!(
            parser.try_continue(&mut line, &leaf),
            BlockState::BreakDiscard
        );
    }

    #[test]
    fn closed_blocks_are_not_mutated() {
        let accessor = accessor();
        let parser = CodeLinkParser::new(&accessor);
        let mut leaf = parser.try_open(fence(), "csharp missing.cs").unwrap();
        leaf.push_line("kept");
        leaf.close();
        let before = leaf.clone();

        let mut line = LineCursor::new("more text");
        assert_eq!(
            parser.try_continue(&mut line, &leaf),
            BlockState::BreakDiscard
        );
        leaf.push_line("ignored");
        if let FencedLeaf::CodeLink(block) = &mut leaf {
            block.add_diagnostic("ignored");
        }
        assert_eq!(leaf, before);
    }
}
