//! Token kinds and the owned token value handed to the parser.

use std::borrow::Cow;
use std::fmt;

/// Kind of a scanned token.
///
/// Discriminants follow declaration order and are stable: downstream
/// tooling may store them as a single byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Terminal token produced once the input is exhausted. Carries no text.
    None = 0,
    /// Run of spaces and tabs. Only produced when
    /// [`LexerConfig::emit_space`](crate::LexerConfig) is enabled.
    Space = 1,
    /// `\n`.
    Newline = 2,
    /// Bare word matching `[A-Za-z_][A-Za-z0-9_]*` in command name position.
    Identifier = 3,
    /// `(`.
    ParenLeft = 4,
    /// `)`.
    ParenRight = 5,
    /// Bare word argument.
    ArgumentUnquoted = 6,
    /// `"..."` argument; text excludes the quotes.
    ArgumentQuoted = 7,
    /// `[==[...]==]` argument; text excludes both delimiters.
    ArgumentBracket = 8,
    /// `#[==[...]==]` comment; text excludes both delimiters.
    CommentBracket = 9,
    /// A byte that cannot start any token.
    BadCharacter = 10,
    /// Bracket argument or comment still open at end of input.
    BadBracket = 11,
    /// Quoted argument still open at end of input.
    BadString = 12,
}

impl TokenKind {
    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; 13] = [
        TokenKind::None,
        TokenKind::Space,
        TokenKind::Newline,
        TokenKind::Identifier,
        TokenKind::ParenLeft,
        TokenKind::ParenRight,
        TokenKind::ArgumentUnquoted,
        TokenKind::ArgumentQuoted,
        TokenKind::ArgumentBracket,
        TokenKind::CommentBracket,
        TokenKind::BadCharacter,
        TokenKind::BadBracket,
        TokenKind::BadString,
    ];

    /// Stable human-readable name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::None => "nothing",
            TokenKind::Space => "space",
            TokenKind::Newline => "newline",
            TokenKind::Identifier => "identifier",
            TokenKind::ParenLeft => "left paren",
            TokenKind::ParenRight => "right paren",
            TokenKind::ArgumentUnquoted => "unquoted argument",
            TokenKind::ArgumentQuoted => "quoted argument",
            TokenKind::ArgumentBracket => "bracket argument",
            TokenKind::CommentBracket => "bracket comment",
            TokenKind::BadCharacter => "bad character",
            TokenKind::BadBracket => "unterminated bracket",
            TokenKind::BadString => "unterminated string",
        }
    }

    /// Returns `true` for the lexical fault kinds.
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            TokenKind::BadCharacter | TokenKind::BadBracket | TokenKind::BadString
        )
    }

    /// Returns `true` for kinds a parser accepts as command arguments.
    pub const fn is_argument(self) -> bool {
        matches!(
            self,
            TokenKind::ArgumentUnquoted | TokenKind::ArgumentQuoted | TokenKind::ArgumentBracket
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token: kind, owned text, and 1-based start position.
///
/// Lines and columns count bytes, not characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) text: Vec<u8>,
    pub(crate) line: u32,
    pub(crate) column: u32,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Token text as raw bytes.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Token text decoded as UTF-8, replacing invalid sequences.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

impl Default for Token {
    fn default() -> Self {
        Self {
            kind: TokenKind::None,
            text: Vec::new(),
            line: 1,
            column: 1,
        }
    }
}
