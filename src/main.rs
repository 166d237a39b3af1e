use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::{Level, error};
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use infix_postfix::error::{ExpressionError, report};

#[derive(Parser, Debug)]
#[command(name = "infix_postfix", about = "Translate infix arithmetic expressions into postfix notation.")]
struct Options {
    /// Expressions to translate. Read one per line from stdin if none are given.
    expressions: Vec<String>,

    /// Print the scanned tokens instead of the postfix translation.
    #[arg(long)]
    tokens: bool,

    /// Print only the one-line error message.
    #[arg(short, long)]
    quiet: bool,

    /// Log pipeline stages to stderr. Repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let options = Options::parse();

    init_logger(options.verbose);

    let failed = if options.expressions.is_empty() {
        match translate_lines(io::stdin().lock(), &options) {
            Ok(failed) => failed,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                return ExitCode::FAILURE
            }
        }
    } else {
        let mut failed = false;
        for expression in &options.expressions {
            failed |= !translate(expression, &options);
        }
        failed
    };

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

/// Translates one non-empty line at a time as it is read. Returns whether any line failed.
fn translate_lines(input: impl BufRead, options: &Options) -> io::Result<bool> {
    let mut failed = false;
    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            failed |= !translate(&line, options);
        }
    }
    Ok(failed)
}

/// Prints the translation of `expression` or its error. Returns whether it succeeded.
fn translate(expression: &str, options: &Options) -> bool {
    match run(expression, options) {
        Ok(()) => true,
        Err(e) => {
            println!("{}", e.summary());
            if !options.quiet {
                if let Err(io_error) = report(expression, &e) {
                    error!("Failed to print error report: {}", io_error);
                }
            }
            false
        }
    }
}

fn run(source: &str, options: &Options) -> Result<(), ExpressionError> {
    if options.tokens {
        for token in infix_postfix::tokenize(source)? {
            println!("{}", token);
        }
    } else {
        let postfix = infix_postfix::evaluate_to_postfix(source)?;
        println!("{}", postfix.join(" "));
    }
    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let console_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(filter::filter_fn(move |metadata| {
            // For external crates, show only the error logs.
            metadata.level() <= &Level::ERROR
                || (metadata.level() <= &level
                    && metadata.module_path().unwrap_or_default().starts_with("infix_postfix"))
        }));
    tracing_subscriber::registry().with(console_log).init();
}
