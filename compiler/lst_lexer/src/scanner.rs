//! Hand-written scanner producing one [`Token`] per call.
//!
//! The scanner pulls bytes from its [`InputSource`] through a refilling
//! [`Reader`] window and classifies them with a five-state machine:
//!
//! ```text
//! Default ──#──────────▶ LineComment ──\n / EOF──▶ Default
//!    │ ───"──────────▶ QuotedString ──"/EOF─────▶ Default
//!    └─ [=*[ / #[=*[ ─▶ BracketArgument ──]=*]──▶ BracketClosing ──▶ Default
//!                              └──EOF──▶ Default (BadBracket)
//! ```
//!
//! Only `Default` and the terminal states emit tokens; the other states
//! accumulate. Lexical faults are ordinary tokens ([`TokenKind::BadCharacter`],
//! [`TokenKind::BadBracket`], [`TokenKind::BadString`]) and the scanner stays
//! usable after each of them. Escape sequences are kept verbatim.
//!
//! Lines and columns are 1-based and count bytes. A token is stamped with
//! the position of its first byte.

use tracing::trace;

use crate::config::LexerConfig;
use crate::input::InputSource;
use crate::reader::Reader;
use crate::token::{Token, TokenKind};
use crate::token_builder::TokenBuilder;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Default,
    LineComment,
    QuotedString,
    BracketArgument,
    /// Entered the moment an exact-length closer has been appended.
    BracketClosing,
}

/// Listfile scanner over a single input source.
///
/// One scanner serves exactly one source. Rebinding means building a new
/// scanner; no state carries over.
pub struct Scanner<S> {
    reader: Reader<S>,
    state: State,
    /// Number of `=` in the open bracket's delimiter. Meaningful only in
    /// `BracketArgument` and `BracketClosing`.
    bracket_len: usize,
    /// Kind the open bracket finishes as.
    bracket_kind: TokenKind,
    line: u32,
    column: u32,
    /// Open parentheses; bare words at depth 0 are in command name position.
    paren_depth: u32,
    emit_space: bool,
}

impl<S: InputSource> Scanner<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, &LexerConfig::default())
    }

    pub fn with_config(source: S, config: &LexerConfig) -> Self {
        Self {
            reader: Reader::new(source, config.effective_chunk_size()),
            state: State::Default,
            bracket_len: 0,
            bracket_kind: TokenKind::ArgumentBracket,
            line: 1,
            column: 1,
            paren_depth: 0,
            emit_space: config.emit_space,
        }
    }

    /// Line of the next unread byte.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Column of the next unread byte.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Scan the next token into `out`.
    ///
    /// Returns a [`TokenKind::None`] token with empty text once the input is
    /// exhausted. Calling again after that keeps returning `None` tokens.
    pub fn next_token<'t>(&mut self, out: &'t mut TokenBuilder) -> &'t Token {
        let kind = loop {
            let step = match self.state {
                State::Default => self.scan_default(out),
                State::LineComment => self.line_comment(),
                State::QuotedString => self.quoted(out),
                State::BracketArgument => self.bracket(out),
                State::BracketClosing => Some(self.close_bracket(out)),
            };
            if let Some(kind) = step {
                break kind;
            }
        };
        let token = out.finish(kind);
        trace!(
            kind = %kind,
            line = token.line(),
            column = token.column(),
            len = token.text().len(),
            "token"
        );
        token
    }

    // ─── Position ──────────────────────────────────────────────────

    #[inline]
    fn advance(&mut self, n: usize) {
        let n = u32::try_from(n).unwrap_or(u32::MAX);
        self.column = self.column.saturating_add(n);
    }

    #[inline]
    fn newline(&mut self) {
        self.line = self.line.saturating_add(1);
        self.column = 1;
    }

    // ─── Default ───────────────────────────────────────────────────

    fn scan_default(&mut self, out: &mut TokenBuilder) -> Option<TokenKind> {
        let Some(byte) = self.reader.peek() else {
            out.start(self.line, self.column);
            return Some(TokenKind::None);
        };
        match byte {
            b' ' | b'\t' => self.blank(out),
            b'\n' => {
                let kind = self.single(out, byte, TokenKind::Newline);
                self.newline();
                Some(kind)
            }
            b'(' => {
                self.paren_depth = self.paren_depth.saturating_add(1);
                Some(self.single(out, byte, TokenKind::ParenLeft))
            }
            b')' => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                Some(self.single(out, byte, TokenKind::ParenRight))
            }
            b'#' => {
                self.hash(out);
                None
            }
            b'[' => self.left_bracket(out),
            b'"' => {
                out.start(self.line, self.column);
                self.reader.bump();
                self.advance(1);
                self.state = State::QuotedString;
                None
            }
            b'\\' => match self.reader.peek_at(1) {
                Some(escaped) if escaped != b'\n' => Some(self.bare_word(out)),
                _ => Some(self.single(out, byte, TokenKind::BadCharacter)),
            },
            _ if is_bare_byte(byte) => Some(self.bare_word(out)),
            _ => Some(self.single(out, byte, TokenKind::BadCharacter)),
        }
    }

    /// Emit the current byte as a one-byte token.
    fn single(&mut self, out: &mut TokenBuilder, byte: u8, kind: TokenKind) -> TokenKind {
        out.start(self.line, self.column);
        out.set(&[byte]);
        self.reader.bump();
        self.advance(1);
        kind
    }

    /// Consume a run of spaces and tabs; a token only when `emit_space`.
    fn blank(&mut self, out: &mut TokenBuilder) -> Option<TokenKind> {
        out.start(self.line, self.column);
        loop {
            let chunk = self.reader.chunk();
            let n = chunk
                .iter()
                .take_while(|&&b| b == b' ' || b == b'\t')
                .count();
            let run_continues = n > 0 && n == chunk.len();
            if self.emit_space {
                out.append(&chunk[..n]);
            }
            self.reader.consume(n);
            self.advance(n);
            if !run_continues {
                break;
            }
        }
        self.emit_space.then_some(TokenKind::Space)
    }

    /// `#` starts a bracket comment when followed by a bracket opener,
    /// otherwise a line comment.
    fn hash(&mut self, out: &mut TokenBuilder) {
        out.start(self.line, self.column);
        self.reader.bump();
        self.advance(1);
        if self.reader.peek() == Some(b'[') {
            if let Some(len) = self.bracket_open(out) {
                self.enter_bracket(len, TokenKind::CommentBracket);
                return;
            }
        }
        // Whatever `bracket_open` consumed is comment text.
        self.state = State::LineComment;
    }

    fn left_bracket(&mut self, out: &mut TokenBuilder) -> Option<TokenKind> {
        out.start(self.line, self.column);
        match self.bracket_open(out) {
            Some(len) => {
                self.enter_bracket(len, TokenKind::ArgumentBracket);
                None
            }
            // `[` and `=` are ordinary bare-word bytes outside an opener.
            None => Some(self.bare_word_rest(out)),
        }
    }

    /// Consume `[`, `=`* and, if present, the second `[`.
    ///
    /// Returns the `=` count for a complete opener, leaving `out` as it was.
    /// Otherwise the consumed `[=...` stays appended to `out`.
    fn bracket_open(&mut self, out: &mut TokenBuilder) -> Option<usize> {
        debug_assert_eq!(self.reader.peek(), Some(b'['));
        self.reader.bump();
        out.append(b"[");
        let mut eq = 0;
        while self.reader.peek() == Some(b'=') {
            self.reader.bump();
            out.append(b"=");
            eq += 1;
        }
        self.advance(1 + eq);
        if self.reader.peek() == Some(b'[') {
            self.reader.bump();
            self.advance(1);
            out.truncate_tail(1 + eq);
            Some(eq)
        } else {
            None
        }
    }

    fn enter_bracket(&mut self, len: usize, kind: TokenKind) {
        self.bracket_len = len;
        self.bracket_kind = kind;
        self.state = State::BracketArgument;
    }

    fn bare_word(&mut self, out: &mut TokenBuilder) -> TokenKind {
        out.start(self.line, self.column);
        self.bare_word_rest(out)
    }

    /// Accumulate bare-word bytes and escape pairs, then classify the word.
    fn bare_word_rest(&mut self, out: &mut TokenBuilder) -> TokenKind {
        loop {
            let chunk = self.reader.chunk();
            let available = chunk.len();
            let n = chunk.iter().take_while(|&&b| is_bare_byte(b)).count();
            out.append(&chunk[..n]);
            self.reader.consume(n);
            self.advance(n);
            if available == 0 {
                break;
            }
            if n == available {
                continue;
            }
            if self.reader.peek() == Some(b'\\') {
                if let Some(escaped) = self.reader.peek_at(1).filter(|&b| b != b'\n') {
                    out.append(&[b'\\', escaped]);
                    self.reader.consume(2);
                    self.advance(2);
                    continue;
                }
            }
            break;
        }
        if self.paren_depth == 0 && is_identifier(out.text()) {
            TokenKind::Identifier
        } else {
            TokenKind::ArgumentUnquoted
        }
    }

    // ─── LineComment ───────────────────────────────────────────────

    /// Discard through the next `\n`, which is swallowed with the comment.
    fn line_comment(&mut self) -> Option<TokenKind> {
        loop {
            let chunk = self.reader.chunk();
            if chunk.is_empty() {
                self.state = State::Default;
                return None;
            }
            if let Some(i) = memchr::memchr(b'\n', chunk) {
                self.reader.consume(i + 1);
                self.newline();
                self.state = State::Default;
                return None;
            }
            let n = chunk.len();
            self.reader.consume(n);
            self.advance(n);
        }
    }

    // ─── QuotedString ──────────────────────────────────────────────

    fn quoted(&mut self, out: &mut TokenBuilder) -> Option<TokenKind> {
        loop {
            let chunk = self.reader.chunk();
            if chunk.is_empty() {
                self.state = State::Default;
                return Some(TokenKind::BadString);
            }
            let Some(i) = memchr::memchr3(b'"', b'\\', b'\n', chunk) else {
                let n = chunk.len();
                out.append(chunk);
                self.reader.consume(n);
                self.advance(n);
                continue;
            };
            let stop = chunk[i];
            out.append(&chunk[..i]);
            self.reader.consume(i);
            self.advance(i);
            match stop {
                b'"' => {
                    self.reader.bump();
                    self.advance(1);
                    self.state = State::Default;
                    return Some(TokenKind::ArgumentQuoted);
                }
                b'\n' => {
                    out.append(b"\n");
                    self.reader.bump();
                    self.newline();
                }
                _ => match self.reader.peek_at(1) {
                    // Line continuation: neither byte is kept.
                    Some(b'\n') => {
                        self.reader.consume(2);
                        self.newline();
                    }
                    Some(escaped) => {
                        out.append(&[b'\\', escaped]);
                        self.reader.consume(2);
                        self.advance(2);
                    }
                    None => {
                        out.append(b"\\");
                        self.reader.bump();
                        self.advance(1);
                    }
                },
            }
        }
    }

    // ─── BracketArgument / BracketClosing ──────────────────────────

    fn bracket(&mut self, out: &mut TokenBuilder) -> Option<TokenKind> {
        loop {
            let chunk = self.reader.chunk();
            if chunk.is_empty() {
                self.state = State::Default;
                return Some(TokenKind::BadBracket);
            }
            let Some(i) = memchr::memchr2(b']', b'\n', chunk) else {
                let n = chunk.len();
                out.append(chunk);
                self.reader.consume(n);
                self.advance(n);
                continue;
            };
            let stop = chunk[i];
            out.append(&chunk[..=i]);
            self.reader.consume(i + 1);
            if stop == b'\n' {
                self.newline();
                continue;
            }
            self.advance(i + 1);

            // `]` appended; a closer needs exactly `bracket_len` `=` and `]`.
            let mut eq = 0;
            while self.reader.peek() == Some(b'=') {
                self.reader.bump();
                out.append(b"=");
                eq += 1;
            }
            self.advance(eq);
            if eq == self.bracket_len && self.reader.peek() == Some(b']') {
                self.reader.bump();
                out.append(b"]");
                self.advance(1);
                self.state = State::BracketClosing;
                return None;
            }
        }
    }

    /// Strip the appended closer and finish the bracket token.
    fn close_bracket(&mut self, out: &mut TokenBuilder) -> TokenKind {
        out.truncate_tail(self.bracket_len + 2);
        self.state = State::Default;
        self.bracket_kind
    }
}

/// Bytes allowed in a bare word: printable ASCII and every non-ASCII byte,
/// minus whitespace, parentheses, `#`, `"` and `\`.
#[inline]
const fn is_bare_byte(b: u8) -> bool {
    match b {
        b'(' | b')' | b'#' | b'"' | b'\\' => false,
        0x21..=0x7E | 0x80..=0xFF => true,
        _ => false,
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`.
fn is_identifier(text: &[u8]) -> bool {
    match text.split_first() {
        Some((first, rest)) => {
            (first.is_ascii_alphabetic() || *first == b'_')
                && rest.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
        }
        None => false,
    }
}
