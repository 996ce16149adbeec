//! # Character Cursor
//!
//! Peekable character cursor for the lexer. Tracks the byte offset as it
//! advances.
//!
//! ## Example
//!
//! ```rust
//! use geom_equation::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("x+1");
//! assert_eq!(cursor.peek(), Some('x'));
//! cursor.advance();
//! assert_eq!(cursor.offset(), 1);
//! ```

use std::str::Chars;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor over equation source, tracking the byte offset.
pub struct Cursor<'a> {
    /// Character iterator.
    chars: Chars<'a>,
    /// Current byte offset.
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            offset: 0,
        }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Peek at the current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Peek one character past the current one.
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    /// Consume and return the current character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Check if at end of input.
    pub fn is_eof(&self) -> bool {
        self.peek().is_none()
    }

    /// Consume characters while `pred` holds.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.peek().is_some_and(&mut pred) {
            self.advance();
        }
    }

    /// Consume `first` followed by `second`, or nothing.
    pub fn eat_pair(&mut self, first: char, second: char) -> bool {
        if self.peek() == Some(first) && self.peek_next() == Some(second) {
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
