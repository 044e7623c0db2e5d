//! Literal elaboration.
//!
//! Turns the text of a literal token into a value. Malformed text is a user
//! error: it is reported at the token's location and the result is `None`.
//! Calling an elaborator on a token of the wrong kind is a parser bug and
//! panics.

use glossa_diagnostic::error;
use glossa_ir::{StringLookup, Token, TokenKind};

fn expect_kind(token: &Token, ok: bool, wanted: &str) {
    assert!(
        ok,
        "cannot elaborate a {:?} token as {wanted} at {}",
        token.kind(),
        token.span()
    );
}

/// Value of a `BOOLEAN` token.
///
/// # Panics
/// Panics if the token is not a `BOOLEAN` token.
pub fn as_boolean<L: StringLookup + ?Sized>(token: &Token, interner: &L) -> Option<bool> {
    expect_kind(token, token.kind() == TokenKind::BOOLEAN, "a boolean");
    match token.text(interner) {
        "true" => Some(true),
        "false" => Some(false),
        text => {
            error(token.span(), format!("invalid boolean literal '{text}'"));
            None
        }
    }
}

fn radix_name(radix: u32) -> &'static str {
    match radix {
        2 => "binary",
        8 => "octal",
        16 => "hexadecimal",
        _ => "decimal",
    }
}

/// Value of an integer token, in the radix its kind names.
///
/// Accepts the `0b`/`0o`/`0x` prefix for non-decimal kinds (either case)
/// and `_` digit separators.
///
/// # Panics
/// Panics if the token is not one of the integer kinds.
pub fn as_integer<L: StringLookup + ?Sized>(token: &Token, interner: &L) -> Option<u64> {
    let kind = token.kind();
    let radix = kind.integer_radix();
    expect_kind(token, radix.is_some(), "an integer");
    let (radix, prefix) = radix?;

    let text = token.text(interner);
    let body = if prefix.is_empty() {
        text
    } else {
        text.get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map_or(text, |_| &text[prefix.len()..])
    };
    let digits: String = body.chars().filter(|&c| c != '_').collect();

    if digits.is_empty() {
        error(
            token.span(),
            format!("{} integer literal '{text}' has no digits", radix_name(radix)),
        );
        return None;
    }

    if !digits.chars().all(|c| c.is_digit(radix)) {
        error(
            token.span(),
            format!("invalid digit in {} integer literal '{text}'", radix_name(radix)),
        );
        return None;
    }

    // Only overflow is left once every character is a digit of the radix.
    let value = u64::from_str_radix(&digits, radix).ok();
    if value.is_none() {
        error(
            token.span(),
            format!("integer literal '{text}' does not fit in 64 bits"),
        );
    }
    value
}

/// Contents of a `STRING` token with quotes removed and escapes resolved.
///
/// Recognised escapes: `\n \t \r \0 \\ \" \'`.
///
/// # Panics
/// Panics if the token is not a `STRING` token.
pub fn as_string<L: StringLookup + ?Sized>(token: &Token, interner: &L) -> Option<String> {
    expect_kind(token, token.kind() == TokenKind::STRING, "a string");
    let text = token.text(interner);

    let Some(inner) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        error(token.span(), format!("unterminated string literal {text}"));
        return None;
    };

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            Some(other) => {
                error(
                    token.span(),
                    format!("unknown escape sequence '\\{other}' in string literal"),
                );
                return None;
            }
            None => {
                error(token.span(), "string literal ends with a lone '\\'");
                return None;
            }
        };
        value.push(escaped);
    }
    Some(value)
}
