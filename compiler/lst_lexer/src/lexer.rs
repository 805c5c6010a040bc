//! Lexer facade: binds one input source at a time and hands out tokens.
//!
//! A bound lexer owns exactly one [`Session`]: the source, the scanner
//! state, and the token buffer. Binding a new source (or closing) drops the
//! previous session before any byte of the new source is read.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::bom::{sniff_bom, Bom};
use crate::config::LexerConfig;
use crate::error::LexerError;
use crate::input::{InputSource, MemorySource, StreamSource};
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};
use crate::token_builder::TokenBuilder;

/// Either kind of bound source.
enum Source {
    Stream(StreamSource<Box<dyn BufRead>>),
    Memory(MemorySource),
}

impl InputSource for Source {
    fn fill(&mut self, buf: &mut [u8]) -> usize {
        match self {
            Source::Stream(stream) => stream.fill(buf),
            Source::Memory(memory) => memory.fill(buf),
        }
    }
}

/// Everything that lives exactly as long as one binding.
struct Session {
    scanner: Scanner<Source>,
    token: TokenBuilder,
    /// Stream binds only.
    bom: Option<Bom>,
    /// Set once the terminal None token was produced.
    finished: bool,
}

/// Listfile lexer.
///
/// ```
/// use lst_lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new();
/// lexer.open_memory("project(demo)");
/// let first = lexer.next_token().map(|t| t.kind());
/// assert_eq!(first, Some(TokenKind::Identifier));
/// ```
#[derive(Default)]
pub struct Lexer {
    config: LexerConfig,
    session: Option<Session>,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LexerConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Bind the file at `path` as a stream source.
    ///
    /// The previous binding is torn down first, so on failure the lexer is
    /// left unbound. On success returns the byte-order-mark classification;
    /// the stream is positioned after the marker.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<Bom, LexerError> {
        self.close();
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexerError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened listfile");
        Ok(self.open_reader(file))
    }

    /// Bind any seekable reader as a stream source.
    ///
    /// The reader must be positioned at its start. Returns the byte-order
    /// mark classification.
    pub fn open_reader<R: Read + Seek + 'static>(&mut self, mut reader: R) -> Bom {
        self.close();
        let bom = sniff_bom(&mut reader);
        debug!(%bom, "bound stream source");
        let stream: Box<dyn BufRead> =
            Box::new(BufReader::with_capacity(self.config.effective_chunk_size(), reader));
        self.bind(Source::Stream(StreamSource::new(stream)), Some(bom));
        bom
    }

    /// Bind an in-memory byte range. Always succeeds, including when empty.
    pub fn open_memory(&mut self, bytes: impl Into<Vec<u8>>) {
        self.close();
        let source = MemorySource::new(bytes);
        debug!(len = source.remaining(), "bound memory source");
        self.bind(Source::Memory(source), None);
    }

    /// Release the current source and token buffer, if any.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            debug!("released source");
        }
    }

    fn bind(&mut self, source: Source, bom: Option<Bom>) {
        self.session = Some(Session {
            scanner: Scanner::with_config(source, &self.config),
            token: TokenBuilder::new(),
            bom,
            finished: false,
        });
    }

    pub fn is_bound(&self) -> bool {
        self.session.is_some()
    }

    /// Byte-order mark of the current stream binding.
    ///
    /// `None` for memory bindings and when unbound.
    pub fn bom(&self) -> Option<Bom> {
        self.session.as_ref().and_then(|s| s.bom)
    }

    /// Produce the next token, or `None` once the input is exhausted.
    ///
    /// Fault tokens ([`TokenKind::is_error`]) are returned like any other
    /// token; scanning can continue after them. After end of input the
    /// scanner is not driven again until the lexer is rebound.
    pub fn next_token(&mut self) -> Option<&Token> {
        let session = self.session.as_mut()?;
        if session.finished {
            return None;
        }
        let token = session.scanner.next_token(&mut session.token);
        if token.kind() == TokenKind::None {
            session.finished = true;
            return None;
        }
        Some(token)
    }

    /// Line of the most recently produced token (1 before any token).
    pub fn current_line(&self) -> u32 {
        self.session.as_ref().map_or(1, |s| s.token.token().line())
    }

    /// Column of the most recently produced token (1 before any token).
    pub fn current_column(&self) -> u32 {
        self.session.as_ref().map_or(1, |s| s.token.token().column())
    }
}

/// Scan `bytes` as a memory source and collect every token.
///
/// The terminal None token is not included.
pub fn tokenize(bytes: impl Into<Vec<u8>>) -> Vec<Token> {
    let mut lexer = Lexer::new();
    lexer.open_memory(bytes);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token.clone());
    }
    tokens
}
