use clap::Parser;
use console::style;
use lars::lexer::Lexer;
use lars::Value;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

/// Evaluate Lars programs
#[derive(Parser, Debug)]
#[command(name = "lars")]
struct Args {
    /// Print every token before evaluating
    #[arg(long)]
    tokens: bool,

    /// Print the parsed program before evaluating
    #[arg(long)]
    ast: bool,

    /// Expression to evaluate (if not provided, starts a prompt reading from stdin)
    expression: Option<String>,
}

fn run(source: &str, args: &Args, out: &mut impl Write) -> io::Result<()> {
    if args.tokens {
        for tok in Lexer::new(source) {
            writeln!(out, "{}:{} {} {:?}", tok.line, tok.col, tok.kind, tok.literal)?;
        }
    }

    let (program, errors) = lars::parse(source);
    if !errors.has_no_errors() {
        writeln!(
            out,
            "{}",
            style(format!("parser has {} error(s)", errors.len())).red()
        )?;
        write!(out, "{}", style(&errors).red())?;
        return Ok(());
    }

    if args.ast {
        writeln!(out, "{}", program)?;
    }

    match lars::eval(&program) {
        Value::Error(err) => writeln!(
            out,
            "{}",
            style(format!("ERROR: {} at {}", err.message, err.position)).yellow()
        ),
        val => writeln!(out, "{}", val),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Use LARS_LOG to control the log level, defaults to WARN.
    let filter = EnvFilter::try_from_env("LARS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(expression) = &args.expression {
        return run(expression, &args, &mut out);
    }

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        write!(out, ">> ")?;
        out.flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(()); // end of input
        }
        run(&input, &args, &mut out)?;
    }
}
