//! CLI tool to inspect, validate and format ESI expressions.

use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "esi-expr", about = "Inspect and format ESI expressions")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the syntax tree of each expression.
    Parse { expressions: Vec<String> },
    /// Print the token stream of each expression.
    Tokens {
        /// Include the raw source text of every token.
        #[arg(long)]
        source_map: bool,
        expressions: Vec<String>,
    },
    /// Print each expression in canonical form.
    Fmt { expressions: Vec<String> },
    /// Check whether each expression is already in canonical form.
    Check { expressions: Vec<String> },
}

#[derive(Clone, Copy)]
enum Action {
    Parse,
    Tokens { source_map: bool },
    Fmt,
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(io::stderr)
        .init();

    let (expressions, action) = match cli.command {
        Command::Parse { expressions } => (expressions, Action::Parse),
        Command::Tokens {
            source_map,
            expressions,
        } => (expressions, Action::Tokens { source_map }),
        Command::Fmt { expressions } => (expressions, Action::Fmt),
        Command::Check { expressions } => (expressions, Action::Check),
    };

    let expressions = if expressions.is_empty() {
        match read_stdin() {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("stdin: {e}");
                return ExitCode::from(2);
            }
        }
    } else {
        expressions
    };

    let mut had_error = false;
    for input in &expressions {
        let ok = match action {
            Action::Parse => run_parse(input),
            Action::Tokens { source_map } => run_tokens(input, source_map),
            Action::Fmt => run_fmt(input),
            Action::Check => run_check(input),
        };
        if !ok {
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

const fn directive_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "esi_expr=debug",
        _ => "esi_expr=trace",
    }
}

fn read_stdin() -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn run_parse(input: &str) -> bool {
    match esi_expr::parse_str(input) {
        Ok(node) => {
            println!("{node:#?}");
            true
        }
        Err(e) => {
            eprintln!("{input}: {e}");
            false
        }
    }
}

fn run_tokens(input: &str, source_map: bool) -> bool {
    match esi_expr::tokenize(input, source_map) {
        Ok(tokens) => {
            for token in &tokens {
                match &token.raw {
                    Some(raw) => println!(
                        "{}\t{:?}\t{}\t{raw:?}",
                        token.kind, token.cargo, token.position
                    ),
                    None => println!("{}\t{:?}\t{}", token.kind, token.cargo, token.position),
                }
            }
            true
        }
        Err(e) => {
            eprintln!("{input}: {e}");
            false
        }
    }
}

fn run_fmt(input: &str) -> bool {
    match esi_expr::parse_str(input) {
        Ok(node) => {
            println!("{}", esi_expr::format(&node));
            true
        }
        Err(e) => {
            eprintln!("{input}: {e}");
            false
        }
    }
}

fn run_check(input: &str) -> bool {
    match esi_expr::parse_str(input) {
        Ok(node) => {
            if esi_expr::format(&node) == input {
                eprintln!("{input}: formatted");
                true
            } else {
                eprintln!("{input}: not formatted");
                false
            }
        }
        Err(e) => {
            eprintln!("{input}: {e}");
            false
        }
    }
}
