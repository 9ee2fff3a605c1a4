use crate::parsing::rope::span::Span;

use super::kinds::{CodeBlock, CodeLinkBlock, Fence};

/// A frame in the container stack representing a nesting level.
///
/// Containers wrap leaf blocks (paragraphs, code blocks) and can nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerFrame {
    /// A blockquote container with its nesting depth.
    BlockQuote {
        /// How many `>` prefixes (1 = single quote, 2 = nested, etc.)
        depth: u8,
    },
}

/// Whether a fenced block still accepts lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLifecycle {
    Open,
    /// Terminal. Content and diagnostics no longer change.
    Closed,
}

/// An open fenced block. The variant is the block's kind tag: parsers check
/// it to decide whether a block is theirs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FencedLeaf {
    Code(CodeBlock),
    CodeLink(CodeLinkBlock),
}

impl FencedLeaf {
    pub fn fence(&self) -> Fence {
        match self {
            FencedLeaf::Code(block) => block.fence,
            FencedLeaf::CodeLink(block) => block.fence(),
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            FencedLeaf::Code(block) => block.state == BlockLifecycle::Closed,
            FencedLeaf::CodeLink(block) => block.is_closed(),
        }
    }

    /// Appends a content line. Ignored once the block is closed.
    pub fn push_line(&mut self, line: &str) {
        match self {
            FencedLeaf::Code(block) => {
                if block.state == BlockLifecycle::Open {
                    block.lines.push(line.to_string());
                }
            }
            FencedLeaf::CodeLink(block) => block.push_line(line),
        }
    }

    pub fn close(&mut self) {
        match self {
            FencedLeaf::Code(block) => block.state = BlockLifecycle::Closed,
            FencedLeaf::CodeLink(block) => block.close(),
        }
    }
}

/// The kind of a leaf block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A paragraph block (default when no other block opener matches).
    Paragraph,
    /// A fenced code block (``` or ~~~) with literal content.
    FencedCode(CodeBlock),
    /// A fenced block linking to an external source file.
    CodeLink(CodeLinkBlock),
}

impl From<FencedLeaf> for BlockKind {
    fn from(leaf: FencedLeaf) -> Self {
        match leaf {
            FencedLeaf::Code(block) => BlockKind::FencedCode(block),
            FencedLeaf::CodeLink(block) => BlockKind::CodeLink(block),
        }
    }
}

/// A parsed block node with its containers, kind, and spans.
#[derive(Debug, Clone)]
pub struct BlockNode {
    /// The container stack this block is nested within.
    pub containers: Vec<ContainerFrame>,
    /// The kind of leaf block (Paragraph, FencedCode, etc.)
    pub kind: BlockKind,
    /// 0-based line the block starts on.
    pub line: usize,
    /// Full byte span of the block including delimiters.
    pub span: Span,
    /// Content span (excludes prefixes like `>` on the first line).
    pub content_span: Span,
}

impl BlockNode {
    pub fn as_code_link(&self) -> Option<&CodeLinkBlock> {
        match &self.kind {
            BlockKind::CodeLink(block) => Some(block),
            _ => None,
        }
    }
}
