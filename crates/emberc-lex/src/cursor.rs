//! Character cursor for traversing source code.
//!
//! Unlike a conventional lexer cursor, `Cursor` never *consumes* a token on
//! its own — the ambiguity resolution in `lex` decides how far to advance
//! after every category has been tried at the current position (§4.1).
//! `Cursor` only tracks position/line/column and offers read-only lookahead.

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// The remainder of the source starting at the cursor. Every category
    /// matcher is anchored at the start of this slice.
    #[inline]
    pub fn remainder(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Advance the cursor to an absolute byte offset, recomputing line and
    /// column by scanning the bytes consumed along the way.
    pub fn advance_to(&mut self, new_position: usize) {
        debug_assert!(new_position >= self.position);
        debug_assert!(new_position <= self.source.len());
        for ch in self.source[self.position..new_position].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position = new_position;
    }

    /// Advance past exactly one byte, used when no category matches at the
    /// current position (§4.1 "If the set is empty, the cursor advances by
    /// one byte").
    pub fn advance_one_byte(&mut self) {
        let next = self.source[self.position..]
            .char_indices()
            .nth(1)
            .map(|(offset, _)| self.position + offset)
            .unwrap_or(self.source.len());
        self.advance_to(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_to_tracks_newlines() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance_to(3);
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn remainder_reflects_position() {
        let mut cursor = Cursor::new("let x");
        cursor.advance_to(4);
        assert_eq!(cursor.remainder(), "x");
    }
}
