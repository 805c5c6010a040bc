//! Growable buffer accumulating the text of the token being scanned.
//!
//! Token bursts are small and bounded, so growth is exact rather than
//! amortized: `set` reallocates to `len + 1` when the current storage is too
//! small, and `append` reallocates to exactly the new length.

use crate::token::{Token, TokenKind};

/// Accumulates one token's text and stamps its start position.
///
/// The builder owns the [`Token`] it fills; its storage is reused from one
/// token to the next.
#[derive(Debug, Default)]
pub struct TokenBuilder {
    token: Token,
}

impl TokenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new token at `line:column` with an empty body.
    pub fn start(&mut self, line: u32, column: u32) {
        self.token.text.clear();
        self.token.line = line;
        self.token.column = column;
    }

    /// Replace the body with `bytes`.
    pub fn set(&mut self, bytes: &[u8]) {
        let text = &mut self.token.text;
        if bytes.len() >= text.capacity() {
            *text = Vec::with_capacity(bytes.len() + 1);
        } else {
            text.clear();
        }
        text.extend_from_slice(bytes);
    }

    /// Append `bytes` to the body.
    pub fn append(&mut self, bytes: &[u8]) {
        let text = &mut self.token.text;
        let required = text.len() + bytes.len();
        if required > text.capacity() {
            text.reserve_exact(required - text.len());
        }
        text.extend_from_slice(bytes);
    }

    /// Drop the last `n` bytes of the body.
    pub fn truncate_tail(&mut self, n: usize) {
        let text = &mut self.token.text;
        debug_assert!(n <= text.len(), "truncating past token start");
        text.truncate(text.len().saturating_sub(n));
    }

    /// Current body.
    pub fn text(&self) -> &[u8] {
        &self.token.text
    }

    /// Stamp the kind and expose the finished token.
    pub fn finish(&mut self, kind: TokenKind) -> &Token {
        self.token.kind = kind;
        &self.token
    }

    /// The most recently finished token (or the empty default).
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Allocated capacity of the body buffer.
    pub fn capacity(&self) -> usize {
        self.token.text.capacity()
    }
}
