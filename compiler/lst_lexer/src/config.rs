//! Lexer configuration.

/// Default number of bytes requested from a source per fill.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Smallest accepted chunk size. The scanner needs two bytes of lookahead.
pub const MIN_CHUNK_SIZE: usize = 16;

/// Options applied when a [`Lexer`](crate::Lexer) binds a source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexerConfig {
    /// Emit runs of spaces and tabs as [`TokenKind::Space`](crate::TokenKind)
    /// tokens instead of skipping them.
    pub emit_space: bool,
    /// Maximum bytes requested from the source per fill.
    pub chunk_size: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            emit_space: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl LexerConfig {
    #[must_use]
    pub fn with_emit_space(mut self, emit_space: bool) -> Self {
        self.emit_space = emit_space;
        self
    }

    /// Set the fill size, clamped to [`MIN_CHUNK_SIZE`].
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(MIN_CHUNK_SIZE);
        self
    }

    /// Chunk size actually used, clamped even when the field was set directly.
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(MIN_CHUNK_SIZE)
    }
}
