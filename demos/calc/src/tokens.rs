//! Tokens the calculator adds on top of the built-in kinds.

use glossa_ir::{RegistryError, StaticTokenSet, TokenKind, TokenKindRegistry, TokenSetId};

const ENTRIES: &[(&str, &str)] = &[
    ("star_star", "**"),
    ("kw_abs", "abs"),
    ("kw_min", "min"),
    ("kw_max", "max"),
];

pub const STAR_STAR: TokenKind = TokenKind::new(TokenKind::CLIENT_BASE);
pub const KW_ABS: TokenKind = TokenKind::new(TokenKind::CLIENT_BASE + 1);
pub const KW_MIN: TokenKind = TokenKind::new(TokenKind::CLIENT_BASE + 2);
pub const KW_MAX: TokenKind = TokenKind::new(TokenKind::CLIENT_BASE + 3);

/// The calculator's token set, claiming kinds from `CLIENT_BASE` up.
pub fn token_set() -> StaticTokenSet {
    StaticTokenSet::new(TokenKind::CLIENT_BASE, ENTRIES)
}

/// Install the calculator's tokens into `registry`.
pub fn install(registry: &mut TokenKindRegistry) -> Result<TokenSetId, RegistryError> {
    let id = registry.install_static(token_set())?;
    tracing::debug!(%id, "installed calc tokens");
    Ok(id)
}

/// True for the keywords naming a builtin function.
pub fn is_builtin_function(kind: TokenKind) -> bool {
    (KW_ABS..=KW_MAX).contains(&kind)
}
