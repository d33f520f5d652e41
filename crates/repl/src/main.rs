//! rpn - Reverse Polish Notation calculator
//!
//! Evaluates its arguments as one line, or reads lines interactively when
//! started without any. The stack is printed after each line, bottom to
//! top, in the current base and precision.
//!
//! Usage:
//!   rpn                     # Interactive session
//!   rpn 1 2 +               # Evaluate once and print the stack
//!   rpn --base 16 FF 1 +    # Start in hexadecimal
//!
//! In a session, `?` prints the operator list and `q` exits.

use clap::Parser as ClapParser;
use rpn_core::radix;
use rpn_core::{CalcConfig, CalcError, CalcResult, Calculator, Outcome, ops};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

/// Longest rendering of a single stack value
const OUTPUT_LIMIT: usize = 256;

#[derive(ClapParser)]
#[command(name = "rpn")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reverse Polish Notation calculator", long_about = None)]
struct Args {
    /// Expression to evaluate once (starts a session when omitted)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of stack slots
    #[arg(long, value_name = "N")]
    capacity: Option<usize>,

    /// Starting base, 2 to 36
    #[arg(long, value_name = "B")]
    base: Option<i64>,

    /// Starting output precision
    #[arg(long, value_name = "P")]
    precision: Option<i64>,
}

/// Status of the most recent line, which decides the exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStatus {
    Ok,
    Failed,
    Quit,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let mut calc = match build_calculator(&args) {
        Ok(calc) => calc,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let status = if args.expression.is_empty() {
        repl_loop(&mut calc)
    } else {
        run_line(&mut calc, &args.expression.join(" "))
    };

    match status {
        LineStatus::Failed => ExitCode::FAILURE,
        LineStatus::Ok | LineStatus::Quit => ExitCode::SUCCESS,
    }
}

/// Log to stderr so stack output on stdout stays clean; RUST_LOG overrides
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rpn=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration file (or embedded defaults) with command-line overrides
fn build_calculator(args: &Args) -> CalcResult<Calculator> {
    let mut config = match &args.config {
        Some(path) => CalcConfig::from_file(path)?,
        None => CalcConfig::default_config()?,
    };
    if let Some(capacity) = args.capacity {
        config.stack_capacity = capacity;
    }
    if let Some(base) = args.base {
        config.base = base;
    }
    if let Some(precision) = args.precision {
        config.precision = Some(precision);
    }
    debug!(?config, "configuration loaded");
    Calculator::with_config(&config)
}

/// Interactive loop; returns the status of the last line evaluated
fn repl_loop(calc: &mut Calculator) -> LineStatus {
    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error initializing readline: {}", e);
            return LineStatus::Failed;
        }
    };

    let history_file = dirs_history_file();
    if let Some(ref path) = history_file {
        let _ = rl.load_history(path);
    }

    let mut status = LineStatus::Ok;
    loop {
        match rl.readline("") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                status = run_line(calc, &line);
                if status == LineStatus::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Cancel the current input only
                println!("^C");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                status = LineStatus::Failed;
                break;
            }
        }
    }

    if let Some(ref path) = history_file
        && let Err(e) = rl.save_history(path)
    {
        warn!(path = %path.display(), error = %e, "could not save history");
    }
    status
}

/// Evaluate one line and print its outcome
fn run_line(calc: &mut Calculator, line: &str) -> LineStatus {
    match calc.eval(line) {
        Outcome::Ok => {
            println!("{}", render_stack(calc));
            LineStatus::Ok
        }
        Outcome::Error(e) => {
            println!("error: {}", e);
            LineStatus::Failed
        }
        Outcome::Help => {
            print_help();
            LineStatus::Ok
        }
        Outcome::Quit => LineStatus::Quit,
    }
}

/// Stack values bottom to top, or `(empty)`
fn render_stack(calc: &Calculator) -> String {
    let values = calc.stack().as_slice();
    if values.is_empty() {
        return "(empty)".to_string();
    }
    values
        .iter()
        .map(|&v| render_value(calc, v))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_value(calc: &Calculator, v: f64) -> String {
    match radix::format_bounded(v, calc.base(), calc.precision() as i32, OUTPUT_LIMIT) {
        Ok(text) => text,
        Err(CalcError::BufferTooSmall { partial }) => format!("{}...", partial),
        Err(e) => format!("error: {}", e),
    }
}

/// Get history file path
fn dirs_history_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("rpn_history"))
}

fn print_help() {
    println!("Use Reverse Polish Notation (RPN), 1 2 + instead of 1 + 2.");
    println!("Numbers are pushed onto the stack for use by operators.");
    println!("Operators are lower case; digits above 9 are upper case.");
    println!("The stack is shown after each line, left to right is bottom to top.");
    println!("X is the top of the stack and Y the value below it.");
    println!();
    for line in ops::help_lines() {
        println!("{}", line);
    }
    println!();
    println!("?        show this help");
    println!("q        quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("rpn").chain(list.iter().copied())).unwrap()
    }

    #[test]
    fn test_expression_keeps_negative_numbers() {
        let parsed = args(&["-3", "4", "+", "+-"]);
        assert_eq!(parsed.expression, vec!["-3", "4", "+", "+-"]);
    }

    #[test]
    fn test_flags_override_defaults() {
        let parsed = args(&["--base", "16", "--capacity", "4", "FF"]);
        let calc = build_calculator(&parsed).unwrap();
        assert_eq!(calc.base(), 16);
        assert_eq!(calc.stack().capacity(), 4);
        assert_eq!(parsed.expression, vec!["FF"]);
    }

    #[test]
    fn test_bad_base_flag() {
        let parsed = args(&["--base", "40"]);
        assert_eq!(build_calculator(&parsed).unwrap_err(), CalcError::InvalidBase(40));
    }

    #[test]
    fn test_huge_capacity_flag() {
        let parsed = args(&["--capacity", "18446744073709551615"]);
        assert_eq!(
            build_calculator(&parsed).unwrap_err(),
            CalcError::InvalidCapacity(usize::MAX)
        );
    }

    #[test]
    fn test_run_line_status() {
        let mut calc = Calculator::new(10).unwrap();
        assert_eq!(run_line(&mut calc, "1 2 +"), LineStatus::Ok);
        assert_eq!(run_line(&mut calc, "0 /"), LineStatus::Failed);
        assert_eq!(run_line(&mut calc, "q"), LineStatus::Quit);
    }

    #[test]
    fn test_render_stack() {
        let mut calc = Calculator::new(10).unwrap();
        assert_eq!(render_stack(&calc), "(empty)");
        calc.eval("3 =prec 1 3 / 2");
        assert_eq!(render_stack(&calc), "0.333 2");
    }

    #[test]
    fn test_render_marks_truncation() {
        let mut calc = Calculator::new(10).unwrap();
        calc.eval("2 600 pow bin");
        let text = render_stack(&calc);
        assert!(text.ends_with("..."));
        assert!(text.len() <= OUTPUT_LIMIT + 2);
    }
}
