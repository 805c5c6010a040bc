//! Listfile lexer CLI.
//!
//! Tokenizes listfile build scripts and prints the token stream.

mod commands;

use commands::{lex_file, list_kinds, parse_lex_options};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: lst lex <file> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --emit-space        Emit blank runs as space tokens");
                eprintln!("  --chunk-size=<n>    Bytes read per fill (minimum 16)");
                eprintln!("  --memory            Read the whole file before scanning");
                std::process::exit(1);
            }
            let options = match parse_lex_options(&args[3..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            };
            let status = lex_file(&args[2], &options);
            std::process::exit(status);
        }
        "kinds" => list_kinds(),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("lst {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Install a `tracing` subscriber when `RUST_LOG` is set.
///
/// Enable with `RUST_LOG=lst_lexer=debug` or `RUST_LOG=lst_lexer=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn print_usage() {
    println!("Listfile lexer");
    println!();
    println!("Usage: lst <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>           Tokenize a listfile and print its tokens");
    println!("  kinds                List token kind names");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Lex options:");
    println!("  --emit-space         Emit blank runs as space tokens");
    println!("  --chunk-size=<n>     Bytes read per fill (minimum 16)");
    println!("  --memory             Read the whole file before scanning");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=lst_lexer=trace) for scanner logs.");
}
