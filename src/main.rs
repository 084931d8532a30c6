use std::{
    fs,
    io::{self, BufRead, ErrorKind, Write},
};

use brak::{Config, Context, interpreter::evaluator::core::DEFAULT_MAX_DEPTH};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// brak evaluates a small bracket-driven expression language with closures and
/// labeled loops.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the argument as a path to a script file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Deepest allowed nesting of evaluated expressions.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Most iterations any single loop may run.
    #[arg(long)]
    max_iterations: Option<u64>,

    /// The script, or a file path with `--file`. Without it, lines are read
    /// from stdin and evaluated one by one in a shared context.
    contents: Option<String>,
}

fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_target(true).with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

/// Evaluates `input` line by line in one context, writing one result per line.
///
/// A line that is not valid UTF-8 is reported like a failed line and the
/// session continues. Any other read error ends the session.
fn session(context: &mut Context, input: impl BufRead, output: &mut impl Write) -> io::Result<()> {
    for line in input.lines() {
        match line {
            Ok(line) => match context.run(&line) {
                Ok(value) => writeln!(output, "[ {line} ] => {value}")?,
                Err(e) => writeln!(output, "[ {line} ] => {e}")?,
            },
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                writeln!(output, "[ <unreadable> ] => {e}")?;
            },
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    let args = Args::parse();
    let mut context = Context::with_config(Config { max_depth:      args.max_depth,
                                                    max_iterations: args.max_iterations, });

    let Some(contents) = args.contents else {
        if let Err(e) = session(&mut context, io::stdin().lock(), &mut io::stdout().lock()) {
            eprintln!("Failed to read input: {e}");
            std::process::exit(1);
        }
        return;
    };

    let script = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
            std::process::exit(1);
        })
    } else {
        contents
    };

    match context.run(script.trim()) {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
