//! Read cursor over a token buffer.
//!
//! A [`TokenStream`] borrows a token slice and walks it front to back. It
//! never reads past the end: at end-of-stream every accessor yields
//! [`Token::INVALID`] and [`Span::DUMMY`] instead.

use crate::Span;

use super::{Token, TokenKind};

/// Cursor over `&'a [Token]`.
///
/// Streams are cheap to copy; a parser that wants to look further ahead
/// than [`peek_nth`](Self::peek_nth) allows can clone the stream and drive
/// the clone.
#[derive(Copy, Clone, Debug)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

/// Saved cursor position, see [`TokenStream::checkpoint`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StreamCheckpoint(usize);

impl<'a> TokenStream<'a> {
    #[inline]
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenStream { tokens, pos: 0 }
    }

    #[inline]
    pub fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The current token, or the error token at end-of-stream.
    #[inline]
    pub fn peek(&self) -> &'a Token {
        self.peek_nth(0)
    }

    /// The token `n` positions past the current one, or the error token if
    /// that is past the end.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> &'a Token {
        self.pos
            .checked_add(n)
            .and_then(|i| self.tokens.get(i))
            .unwrap_or(&Token::INVALID)
    }

    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind()
    }

    /// Return the current token and advance past it.
    ///
    /// At end-of-stream, returns the error token and stays put.
    #[inline]
    pub fn get(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.eof() {
            self.pos += 1;
        }
        token
    }

    /// Location of the current token, or [`Span::DUMMY`] at end-of-stream.
    #[inline]
    pub fn location(&self) -> Span {
        self.peek().span()
    }

    /// Location of the last token in the buffer.
    ///
    /// Diagnostics about unexpected end-of-file point here.
    pub fn last_location(&self) -> Span {
        self.tokens.last().map_or(Span::DUMMY, Token::span)
    }

    /// Unconsumed tokens.
    #[inline]
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.pos..]
    }

    /// Iterate the unconsumed tokens without advancing.
    pub fn iter(&self) -> std::slice::Iter<'a, Token> {
        self.remaining().iter()
    }

    /// Every token of the underlying buffer, consumed or not.
    #[inline]
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Save the cursor position for a later [`rewind`](Self::rewind).
    #[inline]
    pub fn checkpoint(&self) -> StreamCheckpoint {
        StreamCheckpoint(self.pos)
    }

    /// Move back to a saved position.
    ///
    /// Checkpoints from a different stream over a longer buffer are a
    /// caller bug; in debug builds they trip an assertion.
    pub fn rewind(&mut self, checkpoint: StreamCheckpoint) {
        debug_assert!(
            checkpoint.0 <= self.tokens.len(),
            "checkpoint {} out of bounds (max {})",
            checkpoint.0,
            self.tokens.len()
        );
        self.pos = checkpoint.0.min(self.tokens.len());
    }
}
