use crate::parsing::blocks::{
    cursor::{CODE_INDENT, LineCursor},
    parser::{BlockState, FencedBlockParser},
    types::{BlockLifecycle, FencedLeaf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn char(self) -> char {
        match self {
            FenceKind::Backticks => CodeFence::BACKTICK,
            FenceKind::Tildes => CodeFence::TILDE,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            CodeFence::BACKTICK => Some(FenceKind::Backticks),
            CodeFence::TILDE => Some(FenceKind::Tildes),
            _ => None,
        }
    }
}

/// The opening fence of a fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub kind: FenceKind,
    /// How many fence characters opened the block (at least 3).
    pub count: usize,
    /// Columns of indentation before the opening fence (0..=3).
    pub indent: usize,
}

/// A fence opener found on a line, with the text following it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceOpen<'a> {
    pub fence: Fence,
    /// Info string, trimmed.
    pub info: &'a str,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';
    pub const MIN_COUNT: usize = 3;

    /// Detects an opening fence: up to 3 columns of indentation, then at
    /// least three backticks or tildes. A backtick fence's info string may
    /// not contain backticks.
    pub fn opener(remainder: &str) -> Option<FenceOpen<'_>> {
        let mut line = LineCursor::new(remainder);
        if line.indent() >= CODE_INDENT {
            return None;
        }

        let kind = FenceKind::from_char(line.current_char()?)?;
        let mut count = 0;
        let mut c = line.current_char();
        while c == Some(kind.char()) {
            count += 1;
            c = line.next_char();
        }
        if count < Self::MIN_COUNT {
            return None;
        }

        let info = line.rest().trim();
        if kind == FenceKind::Backticks && info.contains(Self::BACKTICK) {
            return None;
        }

        Some(FenceOpen {
            fence: Fence {
                kind,
                count,
                indent: line.indent(),
            },
            info,
        })
    }

    /// True if `line` closes `fence`: the same character repeated at least
    /// as many times, followed only by whitespace, and not indented as code.
    ///
    /// Moves the cursor past any fence characters; callers reset it before
    /// taking content.
    pub fn closes(fence: Fence, line: &mut LineCursor<'_>) -> bool {
        let mut remaining = fence.count as isize;
        let mut c = line.current_char();
        while c == Some(fence.kind.char()) {
            c = line.next_char();
            remaining -= 1;
        }

        remaining <= 0 && !line.is_code_indent() && line.rest_is_blank()
    }
}

/// A plain fenced code block: content is always the literal body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub fence: Fence,
    pub info: String,
    pub lines: Vec<String>,
    pub state: BlockLifecycle,
}

/// Claims every fence it is offered. Register it last so more specific
/// fenced block kinds get the first look.
pub struct CodeFenceParser;

impl FencedBlockParser for CodeFenceParser {
    fn opening_chars(&self) -> &[char] {
        &[CodeFence::BACKTICK, CodeFence::TILDE]
    }

    fn try_open(&self, fence: Fence, info: &str) -> Option<FencedLeaf> {
        Some(FencedLeaf::Code(CodeBlock {
            fence,
            info: info.to_string(),
            lines: vec![],
            state: BlockLifecycle::Open,
        }))
    }

    fn try_continue(&self, line: &mut LineCursor<'_>, leaf: &FencedLeaf) -> BlockState {
        if leaf.is_closed() || CodeFence::closes(leaf.fence(), line) {
            return BlockState::BreakDiscard;
        }
        line.go_to_column(line.column_before_indent());
        BlockState::Continue
    }
}
