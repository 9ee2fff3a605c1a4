use super::{kinds::CodeFence, parser::BlockParsers, types::FencedLeaf};

/// A leaf block opened on the current line, and the parser that owns it.
#[derive(Debug)]
pub enum BlockOpen {
    Fenced { parser: usize, leaf: FencedLeaf },
}

/// Detects a block opener in `remainder` (line text after container prefixes).
///
/// Fences are offered to the registered parsers in priority order. A fence
/// no parser claims is not an opener; the line falls back to paragraph text.
pub fn try_open_leaf(remainder: &str, parsers: &BlockParsers<'_>) -> Option<BlockOpen> {
    let open = CodeFence::opener(remainder)?;
    let (parser, leaf) = parsers.try_open(open.fence, open.info)?;
    Some(BlockOpen::Fenced { parser, leaf })
}
