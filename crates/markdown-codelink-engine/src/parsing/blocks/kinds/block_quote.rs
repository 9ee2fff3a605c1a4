use crate::parsing::blocks::cursor::CODE_INDENT;

/// Blockquote container syntax. The classifier asks this type for prefixes
/// rather than knowing about `>` itself.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: char = '>';

    /// Strips blockquote prefixes from a line, returning `(depth, byte_offset)`
    /// where `byte_offset` is where content begins.
    ///
    /// Each `>` may be preceded by up to 3 spaces and absorbs one following
    /// space: `> text`, `>> nested`, `> > spaced nested`. Any other leading
    /// whitespace belongs to the content, so fence indentation inside a quote
    /// survives.
    pub fn strip_prefixes(s: &str) -> (u8, usize) {
        Self::strip_prefixes_max(s, u8::MAX)
    }

    /// Like [`BlockQuote::strip_prefixes`], but stops after `max_depth`
    /// prefixes. Deeper `>` markers stay in the content.
    pub fn strip_prefixes_max(s: &str, max_depth: u8) -> (u8, usize) {
        let b = s.as_bytes();
        let mut offset = 0usize;
        let mut depth = 0u8;

        while depth < max_depth {
            let spaces = b[offset..].iter().take_while(|&&c| c == b' ').count();
            let marker = offset + spaces;
            if spaces >= CODE_INDENT || b.get(marker) != Some(&(Self::PREFIX as u8)) {
                break;
            }

            depth += 1;
            offset = marker + 1;
            if b.get(offset) == Some(&b' ') {
                offset += 1;
            }
        }
        (depth, offset)
    }
}
