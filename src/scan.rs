//! Byte cursor over a single statement.
//!
//! Every position the cursor stops at is either the end of input or just past
//! an ASCII byte, so slicing the source at [`Cursor::pos`] is always valid.

/// Outcome of [`Cursor::skip_balanced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Balance {
    /// The opening delimiter was not at the cursor; nothing was consumed.
    Missing,
    /// The span was consumed up to and including its matching close.
    Closed,
    /// The input ended before depth returned to zero.
    Unclosed,
}

pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    pub fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn skip_ws(&mut self) {
        while self.peek().map_or(false, |b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Reads `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn ident(&mut self) -> Option<&'a str> {
        let start = self.pos;
        match self.peek() {
            Some(b) if is_ident_start(b) => self.pos += 1,
            _ => return None,
        }
        while self.peek().map_or(false, is_ident_continue) {
            self.pos += 1;
        }
        Some(&self.src[start..self.pos])
    }

    /// Consumes a depth-counted `open ... close` span starting at the cursor.
    pub fn skip_balanced(&mut self, open: u8, close: u8) -> Balance {
        if !self.eat(open) {
            return Balance::Missing;
        }
        let mut depth = 1usize;
        while let Some(b) = self.bump() {
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    return Balance::Closed;
                }
            }
        }
        Balance::Unclosed
    }

    /// Consumes a balanced `[ ... ]` span and returns the text between the
    /// outermost brackets.
    pub fn bracketed(&mut self) -> Option<&'a str> {
        let start = self.pos + 1;
        match self.skip_balanced(b'[', b']') {
            Balance::Closed => Some(&self.src[start..self.pos - 1]),
            Balance::Missing | Balance::Unclosed => None,
        }
    }
}

pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub(crate) fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
