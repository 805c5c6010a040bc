//! Tokenizer for listfile build scripts.
//!
//! Listfiles are sequences of command invocations, `name(arg arg ...)`.
//! This crate turns their bytes into a typed token stream for a downstream
//! parser. It does not build an AST, expand variables, or decode escape
//! sequences: escapes are preserved verbatim in the token text.
//!
//! # Layers
//!
//! - [`InputSource`]: supplies raw bytes. [`StreamSource`] normalizes CRLF to
//!   LF; [`MemorySource`] copies bytes verbatim (NUL-safe).
//! - [`sniff_bom`]: one-shot byte-order-mark classification for stream binds.
//! - [`TokenBuilder`]: growable byte buffer holding the token being scanned.
//! - [`Scanner`]: the state machine pulling bytes and producing tokens.
//! - [`Lexer`]: facade owning exactly one source and scanner at a time.
//!
//! Lexical faults (bad characters, unterminated strings and brackets) are
//! ordinary tokens, never `Err`. The only `Err` is failing to open a file.

mod bom;
mod config;
mod error;
mod input;
mod lexer;
mod reader;
mod scanner;
mod token;
mod token_builder;

pub use bom::{sniff_bom, Bom};
pub use config::{LexerConfig, DEFAULT_CHUNK_SIZE, MIN_CHUNK_SIZE};
pub use error::LexerError;
pub use input::{InputSource, MemorySource, StreamSource};
pub use lexer::{tokenize, Lexer};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
pub use token_builder::TokenBuilder;
