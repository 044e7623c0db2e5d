//! Token kind identifiers and the built-in kind table.

use std::fmt;

/// Classifies a lexeme.
///
/// A kind is a plain 16-bit identifier. The value space is laid out in
/// contiguous ranges with gaps reserved for future built-ins:
///
/// | Range   | Category                              |
/// |---------|---------------------------------------|
/// | 0       | `ERROR` (not a valid token)           |
/// | 1-34    | Punctuation and operators             |
/// | 35-49   | Gap (future punctuation)              |
/// | 50-56   | Value classes                         |
/// | 57-127  | Gap (future value classes)            |
/// | 128+    | Client kinds, claimed per `TokenSet`  |
///
/// Built-in kinds resolve without any registry state. Client kinds only
/// have a name and spelling while the `TokenSet` that claimed them is
/// installed in a [`TokenKindRegistry`](super::TokenKindRegistry).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct TokenKind(u16);

impl TokenKind {
    /// Not a valid token. Matching routines return this to signal "no match".
    pub const ERROR: TokenKind = TokenKind(0);

    pub const LPAREN: TokenKind = TokenKind(1);
    pub const RPAREN: TokenKind = TokenKind(2);
    pub const LBRACE: TokenKind = TokenKind(3);
    pub const RBRACE: TokenKind = TokenKind(4);
    pub const LBRACK: TokenKind = TokenKind(5);
    pub const RBRACK: TokenKind = TokenKind(6);
    pub const DOT: TokenKind = TokenKind(7);
    pub const COMMA: TokenKind = TokenKind(8);
    pub const SEMICOLON: TokenKind = TokenKind(9);
    pub const COLON: TokenKind = TokenKind(10);
    pub const EQUAL: TokenKind = TokenKind(11);
    pub const PLUS: TokenKind = TokenKind(12);
    pub const MINUS: TokenKind = TokenKind(13);
    pub const STAR: TokenKind = TokenKind(14);
    pub const SLASH: TokenKind = TokenKind(15);
    pub const PERCENT: TokenKind = TokenKind(16);
    pub const AMP: TokenKind = TokenKind(17);
    pub const BAR: TokenKind = TokenKind(18);
    pub const CARET: TokenKind = TokenKind(19);
    pub const TILDE: TokenKind = TokenKind(20);
    pub const BANG: TokenKind = TokenKind(21);
    pub const LT: TokenKind = TokenKind(22);
    pub const GT: TokenKind = TokenKind(23);
    pub const MINUS_GT: TokenKind = TokenKind(24);
    pub const EQ_GT: TokenKind = TokenKind(25);
    pub const LT_LT: TokenKind = TokenKind(26);
    pub const GT_GT: TokenKind = TokenKind(27);
    pub const EQ_EQ: TokenKind = TokenKind(28);
    pub const BANG_EQ: TokenKind = TokenKind(29);
    pub const LT_EQ: TokenKind = TokenKind(30);
    pub const GT_EQ: TokenKind = TokenKind(31);
    pub const AMP_AMP: TokenKind = TokenKind(32);
    pub const BAR_BAR: TokenKind = TokenKind(33);
    pub const DOT_DOT: TokenKind = TokenKind(34);

    pub const IDENTIFIER: TokenKind = TokenKind(50);
    /// `true` | `false`
    pub const BOOLEAN: TokenKind = TokenKind(51);
    /// `0b[01]+`
    pub const BINARY_INTEGER: TokenKind = TokenKind(52);
    /// `[0-9]+`
    pub const DECIMAL_INTEGER: TokenKind = TokenKind(53);
    /// `0o[0-7]+`
    pub const OCTAL_INTEGER: TokenKind = TokenKind(54);
    /// `0x[0-9a-fA-F]+`
    pub const HEXADECIMAL_INTEGER: TokenKind = TokenKind(55);
    /// Double-quoted string literal.
    pub const STRING: TokenKind = TokenKind(56);

    /// First kind value available to client token sets.
    pub const CLIENT_BASE: u16 = 128;

    #[inline]
    pub const fn new(raw: u16) -> Self {
        TokenKind(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    /// True for every value below `CLIENT_BASE`, including the reserved gaps.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::CLIENT_BASE
    }

    #[inline]
    pub const fn is_punctuation(self) -> bool {
        Self::LPAREN.0 <= self.0 && self.0 <= Self::DOT_DOT.0
    }

    #[inline]
    pub const fn is_value_class(self) -> bool {
        Self::IDENTIFIER.0 <= self.0 && self.0 <= Self::STRING.0
    }

    /// True for the binary, decimal, octal and hexadecimal integer kinds.
    #[inline]
    pub const fn is_integer(self) -> bool {
        Self::BINARY_INTEGER.0 <= self.0 && self.0 <= Self::HEXADECIMAL_INTEGER.0
    }

    /// Radix and literal prefix for the integer kinds.
    pub const fn integer_radix(self) -> Option<(u32, &'static str)> {
        match self {
            Self::BINARY_INTEGER => Some((2, "0b")),
            Self::DECIMAL_INTEGER => Some((10, "")),
            Self::OCTAL_INTEGER => Some((8, "0o")),
            Self::HEXADECIMAL_INTEGER => Some((16, "0x")),
            _ => None,
        }
    }

    /// Name of a built-in kind, `None` for gaps and client kinds.
    pub fn builtin_name(self) -> Option<&'static str> {
        builtin_entry(self).map(|(name, _)| name)
    }

    /// Canonical spelling of a built-in kind, `None` for gaps and client kinds.
    pub fn builtin_spelling(self) -> Option<&'static str> {
        builtin_entry(self).map(|(_, spelling)| spelling)
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => write!(f, "TokenKind({}:{name})", self.0),
            None => write!(f, "TokenKind({})", self.0),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// (name, spelling) for kinds 0..=34, indexed by raw value.
const PUNCTUATION: [(&str, &str); 35] = [
    ("error", "<error>"),
    ("lparen", "("),
    ("rparen", ")"),
    ("lbrace", "{"),
    ("rbrace", "}"),
    ("lbrack", "["),
    ("rbrack", "]"),
    ("dot", "."),
    ("comma", ","),
    ("semicolon", ";"),
    ("colon", ":"),
    ("equal", "="),
    ("plus", "+"),
    ("minus", "-"),
    ("star", "*"),
    ("slash", "/"),
    ("percent", "%"),
    ("amp", "&"),
    ("bar", "|"),
    ("caret", "^"),
    ("tilde", "~"),
    ("bang", "!"),
    ("lt", "<"),
    ("gt", ">"),
    ("minus_gt", "->"),
    ("eq_gt", "=>"),
    ("lt_lt", "<<"),
    ("gt_gt", ">>"),
    ("eq_eq", "=="),
    ("bang_eq", "!="),
    ("lt_eq", "<="),
    ("gt_eq", ">="),
    ("amp_amp", "&&"),
    ("bar_bar", "||"),
    ("dot_dot", ".."),
];

/// (name, spelling) for kinds 50..=56.
const VALUE_CLASSES: [(&str, &str); 7] = [
    ("identifier", "identifier"),
    ("boolean", "boolean"),
    ("binary_integer", "binary integer"),
    ("decimal_integer", "decimal integer"),
    ("octal_integer", "octal integer"),
    ("hexadecimal_integer", "hexadecimal integer"),
    ("string", "string"),
];

fn builtin_entry(kind: TokenKind) -> Option<(&'static str, &'static str)> {
    let raw = usize::from(kind.0);
    if raw < PUNCTUATION.len() {
        return Some(PUNCTUATION[raw]);
    }
    let base = usize::from(TokenKind::IDENTIFIER.0);
    raw.checked_sub(base)
        .and_then(|i| VALUE_CLASSES.get(i))
        .copied()
}

/// Iterator over every punctuation kind with its spelling.
pub(crate) fn punctuation_spellings() -> impl Iterator<Item = (&'static str, TokenKind)> {
    PUNCTUATION
        .iter()
        .enumerate()
        .skip(1)
        .map(|(raw, &(_, spelling))| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "PUNCTUATION has 35 entries"
            )]
            let kind = TokenKind(raw as u16);
            (spelling, kind)
        })
}

/// Half-open range `[start, end)` of kind values claimed by a token set.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct KindRange {
    pub start: u16,
    pub end: u16,
}

impl KindRange {
    #[inline]
    pub const fn new(start: u16, end: u16) -> Self {
        KindRange { start, end }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.start <= kind.0 && kind.0 < self.end
    }

    #[inline]
    pub const fn overlaps(self, other: KindRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if every kind of `other` lies in `self`.
    #[inline]
    pub const fn covers(self, other: KindRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Kind at `offset` from the start of the range.
    ///
    /// # Panics
    /// Panics if `offset` falls outside the range.
    pub fn kind(self, offset: u16) -> TokenKind {
        let raw = self
            .start
            .checked_add(offset)
            .filter(|&raw| raw < self.end)
            .unwrap_or_else(|| panic!("offset {offset} is outside {self}"));
        TokenKind(raw)
    }
}

impl fmt::Debug for KindRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl fmt::Display for KindRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
