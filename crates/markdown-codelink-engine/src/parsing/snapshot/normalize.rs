use std::fmt::{self, Display};

use xi_rope::Rope;

use crate::parsing::{
    blocks::{BlockKind, BlockNode, ContainerFrame},
    rope::Span,
};

/// A stable, comparable view of parsed blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSnap {
    pub kind: String,
    /// 0-based line the block starts on.
    pub line: usize,
    pub span: (usize, usize),
    pub containers: Vec<String>,
    /// Source text of the block, truncated to 80 characters.
    pub text: String,
    /// Content lines of fenced blocks.
    pub lines: Vec<String>,
    pub diagnostics: Vec<String>,
}

/// Source text under `sp`, cut after `max` characters with a `...` suffix.
fn preview(rope: &Rope, sp: Span, max: usize) -> String {
    let text = sp.text(rope);
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}

pub fn normalize(rope: &Rope, blocks: &[BlockNode]) -> Snap {
    let blocks = blocks
        .iter()
        .map(|b| {
            let (kind, lines, diagnostics) = match &b.kind {
                BlockKind::Paragraph => ("Paragraph".to_string(), vec![], vec![]),
                BlockKind::FencedCode(block) => (
                    format!("FencedCode({:?})", block.fence.kind),
                    block.lines.clone(),
                    vec![],
                ),
                BlockKind::CodeLink(block) => {
                    let kind = match (block.source_file(), block.region()) {
                        (Some(source), Some(region)) => format!("CodeLink({source}#{region})"),
                        (Some(source), None) => format!("CodeLink({source})"),
                        (None, _) => "CodeLink".to_string(),
                    };
                    (
                        kind,
                        block.lines().to_vec(),
                        block.diagnostics().to_vec(),
                    )
                }
            };

            let containers = b
                .containers
                .iter()
                .map(|c| match c {
                    ContainerFrame::BlockQuote { depth } => format!("Quote({depth})"),
                })
                .collect();

            BlockSnap {
                kind,
                line: b.line,
                span: (b.span.start, b.span.end),
                containers,
                text: preview(rope, b.span, 80),
                lines,
                diagnostics,
            }
        })
        .collect();

    Snap { blocks }
}

/// One header line per block (`Kind start..end`, plus containers), then
/// `|` content lines and `!` diagnostics.
impl Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.blocks {
            write!(f, "{} {}..{}", b.kind, b.span.0, b.span.1)?;
            if !b.containers.is_empty() {
                write!(f, " [{}]", b.containers.join(", "))?;
            }
            writeln!(f)?;
            for line in &b.lines {
                if line.is_empty() {
                    writeln!(f, "  |")?;
                } else {
                    writeln!(f, "  | {line}")?;
                }
            }
            for diagnostic in &b.diagnostics {
                writeln!(f, "  ! {diagnostic}")?;
            }
        }
        Ok(())
    }
}
