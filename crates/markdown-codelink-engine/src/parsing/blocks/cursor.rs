use std::borrow::Cow;

/// Width of a tab stop when measuring indentation.
pub const TAB_WIDTH: usize = 4;

/// Indentation (in columns) at which a line counts as indented code.
pub const CODE_INDENT: usize = 4;

/// A cursor over one line's text (after container prefixes) that tracks
/// columns and the line's leading indentation.
///
/// A fresh cursor sits on the first non-whitespace character. Fenced block
/// parsers move it while matching fences and reset it with
/// [`LineCursor::go_to_column`] before content is taken.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    text: &'a str,
    i: usize,
    column: usize,
    column_before_indent: usize,
    indent: usize,
    /// Columns left over from a tab that [`LineCursor::skip_indent`] only
    /// partly consumed.
    partial_tab: usize,
}

impl<'a> LineCursor<'a> {
    /// Creates a cursor positioned after the leading indentation of `text`.
    pub fn new(text: &'a str) -> Self {
        let text = text.trim_end_matches(['\r', '\n']);
        let mut cursor = Self {
            text,
            i: 0,
            column: 0,
            column_before_indent: 0,
            indent: 0,
            partial_tab: 0,
        };
        cursor.skip_indent(usize::MAX);
        cursor.indent = cursor.column - cursor.column_before_indent;
        cursor
    }

    /// The character under the cursor, or `None` at end of line.
    pub fn current_char(&self) -> Option<char> {
        self.text[self.i..].chars().next()
    }

    /// Advances one character and returns the new current character.
    pub fn next_char(&mut self) -> Option<char> {
        self.partial_tab = 0;
        if let Some(c) = self.current_char() {
            self.column = Self::advance_column(self.column, c);
            self.i += c.len_utf8();
        }
        self.current_char()
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The column the line's leading indentation starts at.
    pub fn column_before_indent(&self) -> usize {
        self.column_before_indent
    }

    /// Width of the line's leading indentation in columns.
    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn is_code_indent(&self) -> bool {
        self.indent >= CODE_INDENT
    }

    /// Rewinds to the start of the line and advances over whitespace until
    /// `column` is reached.
    pub fn go_to_column(&mut self, column: usize) {
        self.i = 0;
        self.column = 0;
        self.partial_tab = 0;
        self.skip_indent(column);
    }

    /// Advances over spaces and tabs for at most `max_columns` columns.
    ///
    /// A tab that straddles the limit is consumed, and the columns it spans
    /// past the limit come back as spaces in [`LineCursor::content`].
    pub fn skip_indent(&mut self, max_columns: usize) {
        let limit = self.column.saturating_add(max_columns);
        while self.column < limit {
            match self.current_char() {
                Some(' ') => {
                    self.next_char();
                }
                Some('\t') => {
                    let next = Self::advance_column(self.column, '\t');
                    self.next_char();
                    if next > limit {
                        self.partial_tab = next - limit;
                        self.column = limit;
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    /// The unconsumed rest of the line.
    pub fn rest(&self) -> &'a str {
        &self.text[self.i..]
    }

    /// The rest of the line as block content, with the leftover columns of a
    /// partly skipped tab expanded to spaces.
    pub fn content(&self) -> Cow<'a, str> {
        match self.partial_tab {
            0 => Cow::Borrowed(self.rest()),
            n => Cow::Owned(format!("{}{}", " ".repeat(n), self.rest())),
        }
    }

    /// True if only whitespace remains.
    pub fn rest_is_blank(&self) -> bool {
        self.rest().trim().is_empty()
    }

    fn advance_column(column: usize, c: char) -> usize {
        if c == '\t' {
            (column / TAB_WIDTH + 1) * TAB_WIDTH
        } else {
            column + 1
        }
    }
}
