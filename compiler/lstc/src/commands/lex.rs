//! `lex`: tokenize a file and print the token stream.

use lst_lexer::{Bom, Lexer, LexerConfig, Token};

/// Options accepted by `lst lex`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOptions {
    pub config: LexerConfig,
    /// Read the whole file up front and bind it as a memory source.
    pub memory: bool,
}

/// Parse the arguments following `lst lex <file>`.
pub fn parse_lex_options(args: &[String]) -> Result<LexOptions, String> {
    let mut options = LexOptions::default();
    for arg in args {
        if arg == "--emit-space" {
            options.config = options.config.with_emit_space(true);
        } else if arg == "--memory" {
            options.memory = true;
        } else if let Some(value) = arg.strip_prefix("--chunk-size=") {
            let size = value
                .parse::<usize>()
                .map_err(|_| format!("invalid chunk size '{value}'"))?;
            options.config = options.config.with_chunk_size(size);
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }
    Ok(options)
}

/// Lex `path`, printing one line per token.
///
/// Returns the process exit status: 1 when the file cannot be read or any
/// fault token was produced, 0 otherwise.
pub fn lex_file(path: &str, options: &LexOptions) -> i32 {
    tracing::debug!(path, memory = options.memory, "lexing file");
    let mut lexer = Lexer::with_config(options.config);
    if options.memory {
        match std::fs::read(path) {
            Ok(bytes) => lexer.open_memory(bytes),
            Err(e) => {
                eprintln!("error: cannot read '{path}': {e}");
                return 1;
            }
        }
    } else {
        match lexer.open(path) {
            Ok(Bom::None) => {}
            Ok(bom) => println!("Byte-order mark: {bom}"),
            Err(e) => {
                eprintln!("error: {e}");
                return 1;
            }
        }
    }

    println!("Tokens for '{path}':");
    let mut count = 0usize;
    let mut faults = 0usize;
    while let Some(token) = lexer.next_token() {
        count += 1;
        println!("  {}", format_token(token));
        if token.kind().is_error() {
            faults += 1;
            eprintln!(
                "error: {} at {}:{}",
                token.kind(),
                token.line(),
                token.column()
            );
        }
    }
    println!("{count} tokens, {faults} errors");

    i32::from(faults > 0)
}

/// `line:column kind "text"`, with the text escaped for display.
fn format_token(token: &Token) -> String {
    format!(
        "{}:{} {} \"{}\"",
        token.line(),
        token.column(),
        token.kind(),
        token.text_lossy().escape_debug()
    )
}
