//! Token model.
//!
//! A [`Token`] is one occurrence of a lexeme: where it is, what kind it is,
//! and the interned text it was scanned from. Kinds get their names and
//! spellings from a [`TokenKindRegistry`]; text comes from any
//! [`StringLookup`].

mod kind;
mod list;
mod registry;
mod set;
mod stream;

use std::fmt;

pub use kind::{KindRange, TokenKind};
pub use list::TokenList;
pub use registry::{LookupError, RegistryError, TokenKindRegistry, TokenSetId};
pub use set::{StaticTokenSet, TokenSet};
pub use stream::{StreamCheckpoint, TokenStream};

use crate::{Name, Span, StringInterner, StringLookup};

/// A lexeme occurrence.
///
/// Layout: 16 bytes total
/// - span: 8 bytes
/// - symbol: 4 bytes
/// - kind: 2 bytes (+2 padding)
///
/// `Token::default()` is [`Token::INVALID`]: kind `ERROR`, no location, no
/// text. Every other constructor produces a token of the requested kind.
/// Test for "no token" with [`is_valid`](Self::is_valid) or
/// [`valid`](Self::valid).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Token {
    span: Span,
    symbol: Name,
    kind: TokenKind,
}

impl Token {
    /// The error token.
    pub const INVALID: Token = Token {
        span: Span::DUMMY,
        symbol: Name::EMPTY,
        kind: TokenKind::ERROR,
    };

    /// Scan-time constructor: find the kind of `text` in the spelling table
    /// and intern the text. `None` if no kind has that spelling.
    pub fn lookup(
        span: Span,
        text: &str,
        registry: &TokenKindRegistry,
        interner: &StringInterner,
    ) -> Option<Token> {
        let kind = registry.lookup(text)?;
        Some(Token::with_kind(span, kind, text, interner))
    }

    /// Build a token whose kind the scanner already knows.
    pub fn with_kind(span: Span, kind: TokenKind, text: &str, interner: &StringInterner) -> Token {
        Token::from_symbol(span, kind, interner.intern(text))
    }

    /// Build a token from already-interned text.
    #[inline]
    pub const fn from_symbol(span: Span, kind: TokenKind, symbol: Name) -> Token {
        Token { span, symbol, kind }
    }

    #[inline]
    pub const fn identifier(span: Span, symbol: Name) -> Token {
        Token::from_symbol(span, TokenKind::IDENTIFIER, symbol)
    }

    /// Build an integer literal token.
    ///
    /// # Panics
    /// Panics if `kind` is not one of the integer kinds.
    pub fn integer(span: Span, symbol: Name, kind: TokenKind) -> Token {
        assert!(kind.is_integer(), "{kind:?} is not an integer kind");
        Token::from_symbol(span, kind, symbol)
    }

    #[inline]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Alias of [`span`](Self::span).
    #[inline]
    pub const fn location(&self) -> Span {
        self.span
    }

    #[inline]
    pub const fn symbol(&self) -> Name {
        self.symbol
    }

    pub fn name<'r>(&self, registry: &'r TokenKindRegistry) -> &'r str {
        registry.name(self.kind)
    }

    pub fn spelling<'r>(&self, registry: &'r TokenKindRegistry) -> &'r str {
        registry.spelling(self.kind)
    }

    /// The source text this token was scanned from.
    pub fn text<'i, L: StringLookup + ?Sized>(&self, interner: &'i L) -> &'i str {
        interner.lookup(self.symbol)
    }

    /// True unless this is the error token.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        !self.kind.is_error()
    }

    /// `Some(self)` for a valid token, `None` for the error token.
    #[inline]
    pub const fn valid(self) -> Option<Token> {
        if self.is_valid() {
            Some(self)
        } else {
            None
        }
    }

    /// Render as `<name:text>`, or `<invalid>` for the error token.
    pub fn display<'a, L: StringLookup + ?Sized>(
        &self,
        registry: &'a TokenKindRegistry,
        interner: &'a L,
    ) -> TokenDisplay<'a, L> {
        TokenDisplay {
            token: *self,
            registry,
            interner,
        }
    }
}

/// [`Display`](fmt::Display) adapter returned by [`Token::display`].
pub struct TokenDisplay<'a, L: ?Sized> {
    token: Token,
    registry: &'a TokenKindRegistry,
    interner: &'a L,
}

impl<L: StringLookup + ?Sized> fmt::Display for TokenDisplay<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.token.is_valid() {
            write!(
                f,
                "<{}:{}>",
                self.token.name(self.registry),
                self.token.text(self.interner)
            )
        } else {
            f.write_str("<invalid>")
        }
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Token, TokenKind};
    crate::static_assert_size!(Token, 16);
    crate::static_assert_size!(TokenKind, 2);
}
