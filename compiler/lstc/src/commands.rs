//! Command handlers for the `lst` CLI.

mod lex;

pub use lex::{lex_file, parse_lex_options};

use lst_lexer::TokenKind;

/// Print every token kind with its discriminant and diagnostic name.
pub fn list_kinds() {
    for kind in TokenKind::ALL {
        println!("{:>3}  {kind:?}  ({})", kind as u8, kind.name());
    }
}
