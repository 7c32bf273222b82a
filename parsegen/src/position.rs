use std::fmt::{self, Display};

/// A location in the source text. Lines and columns start at 1, columns
/// count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Byte offset from the start of the text.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The position just past the end of `text`.
    pub fn end_of(text: &str) -> Self {
        let mut cursor = Cursor::new(text);
        cursor.advance(text.len());
        cursor.position()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Keep track of a position within a str, updating as input is consumed.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            pos: Position::start(),
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Input that has not been consumed yet.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos.offset..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos.offset >= self.input.len()
    }

    /// Consume the next `len` bytes and return them. `len` is clamped to the
    /// remaining input and must fall on a char boundary.
    pub fn advance(&mut self, len: usize) -> &'a str {
        let start = self.pos.offset;
        let end = (start + len).min(self.input.len());
        let consumed = &self.input[start..end];
        for c in consumed.chars() {
            if c == '\n' {
                self.pos.line += 1;
                self.pos.column = 1;
            } else {
                self.pos.column += 1;
            }
        }
        self.pos.offset = end;
        consumed
    }

    /// Consume characters as long as `f` accepts them.
    pub fn skip_while<F>(&mut self, f: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let rest = self.rest();
        let len = rest.find(|c: char| !f(c)).unwrap_or_else(|| rest.len());
        self.advance(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_advance_tracks_lines() {
        let mut c = Cursor::new("ab\ncd\n\ne");
        assert_eq!(c.advance(2), "ab");
        assert_eq!(c.position().to_string(), "1:3");
        assert_eq!(c.advance(2), "\nc");
        assert_eq!(c.position().to_string(), "2:2");
        c.advance(3);
        assert_eq!(c.position().to_string(), "4:1");
        assert_eq!(c.position().offset, 7);
        assert_eq!(c.rest(), "e");
    }

    #[test]
    fn cursor_advance_clamps() {
        let mut c = Cursor::new("hi");
        assert_eq!(c.advance(10), "hi");
        assert!(c.is_at_end());
        assert_eq!(c.rest(), "");
    }

    #[test]
    fn cursor_skip_while() {
        let tests = vec![
            ("  \tx", "  \t", "x"),
            ("x  ", "", "x  "),
            ("   ", "   ", ""),
            ("", "", ""),
        ];
        for test in tests {
            let mut c = Cursor::new(test.0);
            let skipped = c.skip_while(|c| c == ' ' || c == '\t');
            assert_eq!(skipped, test.1, "test case: {:?}", test);
            assert_eq!(c.rest(), test.2, "test case: {:?}", test);
        }
    }

    #[test]
    fn columns_count_chars() {
        let mut c = Cursor::new("\"ä\"x");
        c.advance("\"ä\"".len());
        assert_eq!(c.position().column, 4);
        assert_eq!(c.position().offset, 4);
    }

    #[test]
    fn end_of_text() {
        assert_eq!(Position::end_of(""), Position::start());
        let end = Position::end_of("$AXIOM S\n");
        assert_eq!((end.line, end.column, end.offset), (2, 1, 9));
    }
}
