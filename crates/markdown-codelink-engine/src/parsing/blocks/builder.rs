use crate::parsing::rope::span::Span;

use super::{
    classify::LineClass,
    cursor::LineCursor,
    kinds::BlockQuote,
    open::{BlockOpen, try_open_leaf},
    parser::{BlockParsers, BlockState},
    types::{BlockKind, BlockNode, ContainerFrame, FencedLeaf},
};

/// Containers enclosing the current line.
#[derive(Debug, Default, Clone)]
struct ContainerPath(Vec<ContainerFrame>);

impl ContainerPath {
    fn set_blockquote_depth(&mut self, depth: u8) {
        self.0
            .retain(|f| !matches!(f, ContainerFrame::BlockQuote { .. }));
        if depth > 0 {
            self.0.push(ContainerFrame::BlockQuote { depth });
        }
    }
}

/// Where an open leaf started. Containers are captured on the opening line;
/// later lines can't change them.
#[derive(Debug)]
struct LeafStart {
    first_line: usize,
    containers: Vec<ContainerFrame>,
    quote_depth: u8,
    start: Span,
    content_start: Span,
}

impl LeafStart {
    fn at(c: &LineClass, containers: &ContainerPath) -> Self {
        Self {
            first_line: c.index,
            containers: containers.0.clone(),
            quote_depth: c.quote_depth,
            start: c.line,
            content_start: c.remainder_span,
        }
    }

    fn into_node(self, kind: BlockKind, last_line_end: usize) -> BlockNode {
        BlockNode {
            containers: self.containers,
            kind,
            line: self.first_line,
            span: Span {
                start: self.start.start,
                end: last_line_end,
            },
            content_span: Span {
                start: self.content_start.start,
                end: last_line_end,
            },
        }
    }
}

#[derive(Debug)]
enum LeafState {
    None,
    Paragraph {
        at: LeafStart,
        last_line_end: usize,
    },
    Fence {
        /// Index of the owning parser in the registry.
        parser: usize,
        leaf: FencedLeaf,
        at: LeafStart,
        last_line_end: usize,
    },
}

/// Drives fenced block parsers line by line and emits finished blocks.
///
/// Open fenced blocks are owned by the builder and only lent to their
/// parser's `try_continue`, so each block belongs to exactly one parse pass.
pub struct BlockBuilder<'p, 'a> {
    parsers: &'p BlockParsers<'a>,
    containers: ContainerPath,
    leaf: LeafState,
    out: Vec<BlockNode>,
}

impl<'p, 'a> BlockBuilder<'p, 'a> {
    pub fn new(parsers: &'p BlockParsers<'a>) -> Self {
        Self {
            parsers,
            containers: ContainerPath::default(),
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        self.containers.set_blockquote_depth(c.quote_depth);

        if let Some(depth) = self.fence_quote_depth() {
            if c.quote_depth >= depth {
                self.consume_fence_line(c, depth);
                return;
            }
            // The blockquote holding the fence ended.
            self.flush_fence();
        }

        if c.is_blank {
            self.flush_paragraph();
            return;
        }

        if let Some(open) = try_open_leaf(&c.remainder_text, self.parsers) {
            self.flush_paragraph();
            self.open_leaf(open, c);
            return;
        }

        self.extend_paragraph(c);
    }

    pub fn finish(mut self) -> Vec<BlockNode> {
        // EOF flush
        self.flush_paragraph();
        self.flush_fence();
        self.out
    }

    fn fence_quote_depth(&self) -> Option<u8> {
        match &self.leaf {
            LeafState::Fence { at, .. } => Some(at.quote_depth),
            _ => None,
        }
    }

    fn open_leaf(&mut self, open: BlockOpen, c: &LineClass) {
        match open {
            BlockOpen::Fenced { parser, leaf } => {
                self.leaf = LeafState::Fence {
                    parser,
                    leaf,
                    at: LeafStart::at(c, &self.containers),
                    last_line_end: c.line.end,
                }
            }
        }
    }

    /// Offers a line to the open fence's parser. Only the fence's own
    /// blockquote prefixes are stripped; deeper `>` markers are content.
    fn consume_fence_line(&mut self, c: &LineClass, depth: u8) {
        let parsers = self.parsers;
        let LeafState::Fence {
            parser,
            leaf,
            last_line_end,
            ..
        } = &mut self.leaf
        else {
            return;
        };
        *last_line_end = c.line.end;

        let Some(owner) = parsers.get(*parser) else {
            log::warn!("Fenced block owner {parser} is not registered; closing block");
            self.flush_fence();
            return;
        };

        let (_, offset) = BlockQuote::strip_prefixes_max(&c.text, depth);
        let mut line = LineCursor::new(&c.text[offset..]);
        match owner.try_continue(&mut line, leaf) {
            BlockState::Continue => {
                line.skip_indent(leaf.fence().indent);
                leaf.push_line(&line.content());
            }
            BlockState::ContinueDiscard => {}
            BlockState::BreakDiscard => self.flush_fence(),
        }
    }

    /// Lazy continuation lines join the paragraph; a deeper blockquote
    /// starts a new one.
    fn extend_paragraph(&mut self, c: &LineClass) {
        if let LeafState::Paragraph { at, last_line_end } = &mut self.leaf {
            if c.quote_depth <= at.quote_depth {
                *last_line_end = c.line.end;
                return;
            }
            self.flush_paragraph();
        }

        self.leaf = LeafState::Paragraph {
            at: LeafStart::at(c, &self.containers),
            last_line_end: c.line.end,
        };
    }

    fn flush_paragraph(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        if let LeafState::Paragraph { at, last_line_end } = prev {
            self.out
                .push(at.into_node(BlockKind::Paragraph, last_line_end));
        } else {
            self.leaf = prev; // put back non-paragraph leaf (e.g. fence)
        }
    }

    /// Closes the open fenced block, if any. Also used at EOF: an
    /// unterminated fence runs to the end of the document.
    fn flush_fence(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        if let LeafState::Fence {
            mut leaf,
            at,
            last_line_end,
            ..
        } = prev
        {
            leaf.close();
            log::debug!(
                "Closed fenced block at bytes {}..{last_line_end}",
                at.start.start
            );
            self.out.push(at.into_node(leaf.into(), last_line_end));
        } else {
            self.leaf = prev;
        }
    }
}
