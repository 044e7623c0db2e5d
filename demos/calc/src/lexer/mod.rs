//! Scanner for calculator input.
//!
//! Produces a [`TokenList`] for one line. Unrecognized characters are
//! reported through the diagnostic facade and skipped, so a line with lex
//! errors still yields the tokens around them.

use glossa_diagnostic::error;
use glossa_ir::{Span, StringInterner, Token, TokenKind, TokenKindRegistry, TokenList};

/// Longest punctuation spelling the scanner tries.
const MAX_PUNCT_LEN: usize = 2;

/// Scan `source` into tokens.
pub fn lex(source: &str, registry: &TokenKindRegistry, interner: &StringInterner) -> TokenList {
    let mut tokens = TokenList::new();
    if u32::try_from(source.len()).is_err() {
        error(Span::DUMMY, "input is too long to scan");
        return tokens;
    }

    let mut lexer = Lexer {
        source,
        pos: 0,
        registry,
        interner,
    };
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    tracing::trace!(count = tokens.len(), "lexed line");
    tokens
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    registry: &'a TokenKindRegistry,
    interner: &'a StringInterner,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    /// `lex` rejects sources whose offsets do not fit in a span.
    fn span(start: usize, end: usize) -> Span {
        Span::try_from_range(start..end).unwrap_or(Span::DUMMY)
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
    }

    fn token(&self, start: usize, kind: TokenKind) -> Token {
        Token::with_kind(
            Self::span(start, self.pos),
            kind,
            &self.source[start..self.pos],
            self.interner,
        )
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            self.eat_while(|b| b.is_ascii_whitespace());
            let start = self.pos;
            let byte = self.peek()?;

            if byte.is_ascii_digit() {
                return Some(self.integer(start));
            }
            if byte.is_ascii_alphabetic() || byte == b'_' {
                return Some(self.word(start));
            }
            if let Some(token) = self.punctuation(start) {
                return Some(token);
            }

            let c = self.source[start..].chars().next()?;
            self.pos += c.len_utf8();
            error(
                Self::span(start, self.pos),
                format!("unrecognized character '{c}'"),
            );
        }
    }

    /// Integer literal. The radix prefix picks the kind; digit validity is
    /// left to elaboration so `0b12` is one bad literal, not two tokens.
    fn integer(&mut self, start: usize) -> Token {
        let kind = match (self.peek(), self.peek_at(1)) {
            (Some(b'0'), Some(b'b' | b'B')) => TokenKind::BINARY_INTEGER,
            (Some(b'0'), Some(b'o' | b'O')) => TokenKind::OCTAL_INTEGER,
            (Some(b'0'), Some(b'x' | b'X')) => TokenKind::HEXADECIMAL_INTEGER,
            _ => TokenKind::DECIMAL_INTEGER,
        };
        if kind != TokenKind::DECIMAL_INTEGER {
            self.pos += 2;
        }
        self.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        self.token(start, kind)
    }

    /// Identifier or keyword.
    fn word(&mut self, start: usize) -> Token {
        self.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let text = &self.source[start..self.pos];
        let span = Self::span(start, self.pos);
        Token::lookup(span, text, self.registry, self.interner)
            .unwrap_or_else(|| Token::identifier(span, self.interner.intern(text)))
    }

    /// Longest punctuation spelling the registry knows at `start`.
    fn punctuation(&mut self, start: usize) -> Option<Token> {
        for len in (1..=MAX_PUNCT_LEN).rev() {
            let Some(text) = self.source.get(start..start + len) else {
                continue;
            };
            if let Some(token) =
                Token::lookup(Self::span(start, start + len), text, self.registry, self.interner)
            {
                self.pos = start + len;
                return Some(token);
            }
        }
        None
    }
}
