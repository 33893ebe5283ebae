// cfront: tokenize, parse and regenerate a tiny C subset

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;

use cfront::parser::lexer::{ScanOrder, Token};
use cfront::pipeline::{self, Options};

/// Program used when no input file is given
const SAMPLE_SOURCE: &str = "
int main() {
    int x = 10;
    return 0;
}
";

#[derive(Parser, Debug)]
#[command(name = "cfront", version, about = "Tokenize, parse and regenerate a tiny C subset")]
struct Cli {
    /// C source file; a built-in sample program is used when omitted
    file: Option<PathBuf>,

    /// Token emission order
    #[arg(long, value_enum, default_value_t = Order::Positional)]
    order: Order,

    /// Reject unknown characters and report grammar mismatches
    #[arg(long)]
    strict: bool,

    /// What to print
    #[arg(long, value_enum, default_value_t = Emit::Tokens)]
    emit: Emit,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    /// Left-to-right, one token per lexeme
    Positional,
    /// Legacy listing grouped by token category
    CategoryMajor,
}

impl From<Order> for ScanOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Positional => ScanOrder::Positional,
            Order::CategoryMajor => ScanOrder::CategoryMajor,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    Tokens,
    Ast,
    Code,
    All,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> cfront::Result<()> {
    let source = match &cli.file {
        Some(path) => pipeline::read_source(path)?,
        None => SAMPLE_SOURCE.to_string(),
    };

    let mut options = if cli.strict {
        Options::strict()
    } else {
        Options::default()
    };
    options = options.with_order(cli.order.into());

    // The token listing alone never needs the parser
    if cli.emit == Emit::Tokens {
        let tokens = pipeline::lex(&source, &options)?;
        print_tokens(&tokens);
        return Ok(());
    }

    let result = pipeline::compile(&source, &options)?;

    if cli.emit == Emit::All {
        print_tokens(&result.tokens);
    }
    if matches!(cli.emit, Emit::Ast | Emit::All) {
        heading("AST:");
        println!("{:#?}", result.program);
        if !result.unparsed.is_empty() {
            println!("({} tokens left unparsed)", result.unparsed.len());
        }
    }
    if matches!(cli.emit, Emit::Code | Emit::All) {
        heading("Code:");
        print!("{}", result.code);
    }

    Ok(())
}

fn print_tokens(tokens: &[Token]) {
    heading("Tokens:");
    for token in tokens {
        println!("Type: {}, Value: {}", token.kind, token.value);
    }
}

fn heading(text: &str) {
    if io::stdout().is_terminal() {
        println!("{}", text.bold());
    } else {
        println!("{}", text);
    }
}
