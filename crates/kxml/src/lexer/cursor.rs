//! Character cursor with position tracking

use crate::error::Pos;

/// Cursor over a `str` that yields one `char` at a time
///
/// The cursor can be bounded to a sub-range of its input so that positions
/// stay relative to the full text while scanning only the trimmed part.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    end: usize,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    /// Create cursor over the whole input
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            end: input.len(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Create cursor over `input` with surrounding whitespace skipped
    ///
    /// Positions reported afterwards still refer to `input`.
    pub fn trimmed(input: &'a str) -> Self {
        let start = input.len() - input.trim_start().len();
        let end = input.trim_end().len().max(start);
        let mut cursor = Self::new(input);
        cursor.end = end;
        while cursor.pos < start {
            cursor.advance();
        }
        cursor
    }

    /// Get current character without consuming
    pub fn current(&self) -> Option<char> {
        self.input.get(self.pos..self.end)?.chars().next()
    }

    /// Advance cursor by one character
    pub fn advance(&mut self) {
        if let Some(ch) = self.current() {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Consume and return the current character
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.advance();
        Some(ch)
    }

    /// Get current position
    pub const fn position(&self) -> Pos {
        Pos::new(self.pos, self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_basic() {
        let mut cursor = Cursor::new("héllo");
        assert_eq!(cursor.bump(), Some('h'));
        assert_eq!(cursor.bump(), Some('é'));
        assert_eq!(cursor.current(), Some('l'));
        assert_eq!(cursor.position(), Pos::new(3, 1, 3));
    }

    #[test]
    fn test_cursor_newline() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.position(), Pos::new(2, 2, 1));
    }

    #[test]
    fn test_cursor_trimmed() {
        let mut cursor = Cursor::trimmed("\n  <a/>  \n");
        assert_eq!(cursor.position(), Pos::new(3, 2, 3));
        let mut seen = String::new();
        while let Some(ch) = cursor.bump() {
            seen.push(ch);
        }
        assert_eq!(seen, "<a/>");
        assert_eq!(cursor.position().offset, 7);
    }

    #[test]
    fn test_cursor_trimmed_blank() {
        let cursor = Cursor::trimmed(" \t ");
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_cursor_eof() {
        let mut cursor = Cursor::new("");
        assert_eq!(cursor.bump(), None);
        assert_eq!(cursor.position(), Pos::new(0, 1, 1));
    }
}
