use crate::parsing::rope::{lines::LineRef, span::Span};

use super::kinds::BlockQuote;

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// 0-based line number.
    pub index: usize,
    /// Full byte span of this line in the rope.
    pub line: Span,
    /// Whether the line is blank (whitespace only after stripping prefixes).
    pub is_blank: bool,
    /// Number of blockquote `>` prefixes found.
    pub quote_depth: u8,
    /// Byte span of the line content after stripping quote prefixes.
    pub remainder_span: Span,
    /// Text content after stripping prefixes, without the line ending.
    pub remainder_text: String,
    /// The whole line, prefixes included, without the line ending.
    pub text: String,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let trimmed = lr.text.trim_end_matches(['\r', '\n']);

        let (qd, idx) = BlockQuote::strip_prefixes(trimmed);
        let remainder = &trimmed[idx..];
        let remainder_span = Span {
            start: lr.span.start + idx,
            end: lr.span.start + trimmed.len(),
        };

        LineClass {
            index: lr.index,
            line: lr.span,
            is_blank: remainder.trim().is_empty(),
            quote_depth: qd,
            remainder_span,
            remainder_text: remainder.to_string(),
            text: trimmed.to_string(),
        }
    }
}
