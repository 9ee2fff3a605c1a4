use xi_rope::Rope;

use super::span::Span;

/// One line of the rope with its position.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// 0-based line number.
    pub index: usize,
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    pub text: String,
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters, which is important for
/// accurate span tracking during block parsing.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(index, line)| {
        let start = offset;
        offset += line.len();
        LineRef {
            index,
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}
