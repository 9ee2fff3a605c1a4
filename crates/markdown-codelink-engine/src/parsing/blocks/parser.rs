use crate::io::FileAccessor;

use super::{
    cursor::LineCursor,
    kinds::{CodeFenceParser, CodeLinkParser, Fence},
    types::FencedLeaf,
};

/// What the builder should do with a line offered to an open fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// Keep the block open and append the line to its content.
    Continue,
    /// Keep the block open but drop the line.
    ContinueDiscard,
    /// Close the block; the line (the closing fence) is dropped.
    BreakDiscard,
}

/// Hooks a fenced block kind implements to take part in block building.
pub trait FencedBlockParser {
    /// Fence characters this parser can open on.
    fn opening_chars(&self) -> &[char];

    /// Offered an opening fence and its info string. Return `None` to let the
    /// next registered parser try; declining must not have side effects.
    fn try_open(&self, fence: Fence, info: &str) -> Option<FencedLeaf>;

    /// Offered each line after the opener until it returns
    /// [`BlockState::BreakDiscard`]. The cursor sits after the line's
    /// indentation; on `Continue` the builder takes content from wherever
    /// the cursor is left.
    fn try_continue(&self, line: &mut LineCursor<'_>, leaf: &FencedLeaf) -> BlockState;
}

/// Fenced block parsers in priority order.
#[derive(Default)]
pub struct BlockParsers<'a> {
    parsers: Vec<Box<dyn FencedBlockParser + 'a>>,
}

impl<'a> BlockParsers<'a> {
    pub fn new() -> Self {
        Self { parsers: vec![] }
    }

    /// Code-link blocks first, then plain fenced code.
    pub fn with_defaults(code_link: CodeLinkParser<'a>) -> Self {
        Self::new().with(code_link).with(CodeFenceParser)
    }

    /// Default parsers with default code-link settings.
    pub fn for_accessor(accessor: &'a dyn FileAccessor) -> Self {
        Self::with_defaults(CodeLinkParser::new(accessor))
    }

    pub fn with(mut self, parser: impl FencedBlockParser + 'a) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Offers the fence to each parser whose opening characters match.
    /// Returns the index of the parser that claimed it.
    pub fn try_open(&self, fence: Fence, info: &str) -> Option<(usize, FencedLeaf)> {
        self.parsers
            .iter()
            .enumerate()
            .filter(|(_, parser)| parser.opening_chars().contains(&fence.kind.char()))
            .find_map(|(index, parser)| parser.try_open(fence, info).map(|leaf| (index, leaf)))
    }

    pub fn get(&self, index: usize) -> Option<&(dyn FencedBlockParser + 'a)> {
        self.parsers.get(index).map(|parser| parser.as_ref())
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}
