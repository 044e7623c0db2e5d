//! Glossa Syntax Helpers
//!
//! Building blocks a hand-written parser uses on top of a
//! [`TokenStream`](glossa_ir::TokenStream):
//! - literal elaboration: typed values from literal tokens
//! - token matching: lookahead tests, `match_*`/`expect_*` consumers
//! - speculation: [`attempt`] runs a parse under a suppressed
//!   diagnostic scope and rewinds on failure
//! - combinators: enclosed, prefix, left-binary, list and sequence shapes
//!   parameterised by the grammar's own rules
//!
//! All user-facing problems are reported through `glossa_diagnostic`'s
//! facade. Asking for the wrong kind of value from a token is a parser
//! bug and panics.

mod combinators;
mod elaborate;
mod matching;

pub use combinators::{
    parse_enclosed, parse_left_binary_term, parse_list, parse_prefix_term, parse_sequence,
    Enclosed,
};
pub use elaborate::{as_boolean, as_integer, as_string};
pub use matching::{
    attempt, expect_if, expect_token, match_if, match_token, next_token_in_range, next_token_is,
    next_token_is_not, next_token_kind,
};
