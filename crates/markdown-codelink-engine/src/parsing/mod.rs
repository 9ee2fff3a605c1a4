pub mod blocks;
pub mod link_options;
pub mod rope;
pub mod snapshot;

use xi_rope::Rope;

use crate::io::FileAccessor;
use blocks::{BlockBuilder, BlockNode, BlockParsers, MarkdownLineClassifier};
use blocks::kinds::{CodeLinkBlock, CodeLinkParser, CodeLinkSettings};
use rope::lines_with_spans;

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

impl ParsedDoc {
    /// Code-link blocks in document order.
    pub fn code_links(&self) -> impl Iterator<Item = &CodeLinkBlock> {
        self.blocks.iter().filter_map(BlockNode::as_code_link)
    }
}

/// Parses a document with the default parsers, resolving code links
/// through `accessor`.
pub fn parse_document(rope: &Rope, accessor: &dyn FileAccessor) -> ParsedDoc {
    parse_document_with(rope, &BlockParsers::for_accessor(accessor))
}

/// Parses a document with custom code-link settings.
pub fn parse_document_with_settings(
    rope: &Rope,
    accessor: &dyn FileAccessor,
    settings: CodeLinkSettings,
) -> ParsedDoc {
    let parsers = BlockParsers::with_defaults(CodeLinkParser::with_settings(accessor, settings));
    parse_document_with(rope, &parsers)
}

pub fn parse_document_with(rope: &Rope, parsers: &BlockParsers<'_>) -> ParsedDoc {
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new(parsers);

    for lr in lines_with_spans(rope) {
        let lc = classifier.classify(&lr);
        builder.push(&lc);
    }

    ParsedDoc {
        blocks: builder.finish(),
    }
}

#[cfg(test)]
mod tests;
