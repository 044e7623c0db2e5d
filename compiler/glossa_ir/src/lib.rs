//! Glossa IR - shared lexical vocabulary
//!
//! This crate contains the value types every Glossa front end agrees on:
//! - Spans for source locations
//! - Names for interned text, and the interner that owns it
//! - Token kinds, the registry client languages extend at runtime
//! - Tokens, `TokenList` buffers, and `TokenStream` cursors
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: token text lives in the interner, tokens carry `Name(u32)`
//! - **Small Copy Values**: `Token` is 16 bytes and never allocates on copy
//! - **Explicit Registries**: kind lookups go through a `TokenKindRegistry` value,
//!   never an ambient global

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod span;
pub mod token;

pub use interner::{InternError, StringInterner, StringLookup};
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{
    KindRange, LookupError, RegistryError, StaticTokenSet, StreamCheckpoint, Token, TokenDisplay,
    TokenKind, TokenKindRegistry, TokenList, TokenSet, TokenSetId, TokenStream,
};
