//! Errors surfaced by the lexer facade.
//!
//! Lexical faults are tokens, not errors. The only failure a caller sees is
//! a source that cannot be opened.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LexerError {
    /// The file could not be opened for reading.
    #[error("cannot open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LexerError {
    /// Underlying I/O error kind.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            LexerError::Open { source, .. } => source.kind(),
        }
    }
}
