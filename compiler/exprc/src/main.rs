use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use exprc::batch::run_batch;
use exprc::config::resolve_config;
use exprc::session::Session;
use exprc::{ParseStrategy, ParserConfig, Report};
use exprc_env::VarEnv;
use exprc_parser::parser::{render_snippet, Diagnostic};
use log::{debug, LevelFilter};

#[derive(Debug, Parser)]
#[command(
    name = "exprc",
    version,
    about = "Parse, render and evaluate arithmetic expressions",
    long_about = "exprc parses arithmetic expressions with variables, negation, + - * / and\n\
        parentheses, and prints each one fully parenthesized, minimally parenthesized\n\
        and evaluated.\n\n\
        EXAMPLES:\n\
        \n  exprc batch input.txt                     Run a batch file\n\
        \n  exprc eval '2 * (x - 1)' --var x=4        Evaluate one expression\n\
        \n  exprc session commands.txt                Run a command session\n\
        \n  exprc repl                                Start an interactive session\n\
        \n  cat input.txt | exprc                     Batch mode from stdin",
    after_help = "The default parse strategy can also be set with EXPRC_STRATEGY."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Tree-building strategy: sorted or climbing
    #[arg(long, value_name = "STRATEGY", global = true)]
    strategy: Option<ParseStrategy>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a batch of expressions
    #[command(
        about = "Evaluate a batch of expressions",
        long_about = "Reads a variable count, that many name/value pairs, an expression count\n\
            and that many expression lines. Prints the canonical form, the minimal\n\
            form and the value of every expression.\n\n\
            Reads from the given file, or stdin if no file is given."
    )]
    Batch(InputArgs),

    /// Run a command session from a file or stdin
    #[command(about = "Run a V/E/S/M/C/F command session from a file or stdin")]
    Session(InputArgs),

    /// Start an interactive session
    #[command(
        about = "Start an interactive command session",
        long_about = "Start an interactive session using the session command set.\n\n\
            Commands:\n\
            \n  V <name> <value>   Bind a variable\n\
            \n  E <expr>           Store an expression and print its index\n\
            \n  S <i> / M <i>      Print canonical / minimal form\n\
            \n  C <i>              Print the value\n\
            \n  F <i>              Print all three\n\
            \n  anything else      Quit"
    )]
    Repl,

    /// Parse and evaluate a single expression
    #[command(about = "Parse and evaluate a single expression")]
    Eval(EvalArgs),
}

#[derive(Debug, Args, Clone)]
struct InputArgs {
    /// Input file (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
struct EvalArgs {
    /// The expression to evaluate
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    expression: String,

    /// Bind a variable, e.g. --var x=2.5
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,

    /// Print the expression tree as JSON instead of evaluating it
    #[arg(long)]
    json: bool,
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let env = env_logger::Env::default().default_filter_or(level.as_str());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn read_source_from_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn run_batch_command(args: &InputArgs, config: ParserConfig) -> i32 {
    let source = match read_source_from_input(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    match run_batch(&source, config) {
        Ok(output) => {
            for line in &output.lines {
                println!("{line}");
            }
            i32::from(output.failures > 0)
        }
        Err(e) => {
            eprintln!("error: {e}");
            2
        }
    }
}

fn run_session_lines<I>(lines: I, config: ParserConfig) -> (Vec<String>, usize)
where
    I: IntoIterator<Item = String>,
{
    let mut session = Session::new(config);
    let mut out = Vec::new();
    for line in lines {
        let (lines, exit) = session.handle_line(&line);
        out.extend(lines);
        if exit {
            break;
        }
    }
    (out, session.errors())
}

fn run_session_command(args: &InputArgs, config: ParserConfig) -> i32 {
    let lines: Vec<String> = match &args.input {
        Some(_) => match read_source_from_input(&args.input) {
            Ok(s) => s.lines().map(str::to_string).collect(),
            Err(e) => {
                eprintln!("error: {e}");
                return 2;
            }
        },
        None => match io::stdin().lock().lines().collect::<Result<_, _>>() {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("error: failed to read from stdin: {e}");
                return 2;
            }
        },
    };

    let (out, errors) = run_session_lines(lines, config);
    for line in out {
        println!("{line}");
    }
    i32::from(errors > 0)
}

fn run_repl(config: ParserConfig) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    let mut session = Session::new(config);
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}

fn run_eval(args: &EvalArgs, config: ParserConfig) -> i32 {
    let expr = match exprc_parser::parse_line(&args.expression, config) {
        Ok(Some(expr)) => expr,
        Ok(None) => {
            eprintln!("error: empty expression");
            return 1;
        }
        Err(err) => {
            eprintln!(
                "{}",
                render_snippet(&Diagnostic::from(&err), &args.expression)
            );
            return 1;
        }
    };

    if args.json {
        return match exprc_ast::to_json(&expr) {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(e) => {
                eprintln!("error: failed to serialize expression: {e}");
                2
            }
        };
    }

    let env: VarEnv = args.vars.iter().cloned().collect();
    let unbound: Vec<String> = expr
        .free_variables()
        .into_iter()
        .filter(|name| !env.contains(name))
        .collect();
    if !unbound.is_empty() {
        debug!("unbound variables: {unbound:?}");
    }

    let report = Report::new(&expr, &env);
    for line in report.lines() {
        println!("{line}");
    }
    if report.is_ok() {
        0
    } else {
        eprintln!("note: unbound variables: {}", unbound.join(", "));
        1
    }
}

fn normalize_cli_args(args: Vec<OsString>) -> Vec<OsString> {
    if args.len() <= 1 {
        return args;
    }

    let is_known_subcommand = args.iter().skip(1).any(|a| {
        matches!(
            a.to_string_lossy().as_ref(),
            "batch"
                | "session"
                | "repl"
                | "eval"
                | "help"
                | "--help"
                | "-h"
                | "--version"
                | "-V"
        )
    });
    if is_known_subcommand {
        return args;
    }

    let mut out: Vec<OsString> = Vec::with_capacity(args.len() + 1);
    let mut iter = args.into_iter();
    out.extend(iter.next());
    out.push(OsString::from("batch"));
    out.extend(iter);
    out
}

fn normalized_cli_args() -> Vec<OsString> {
    normalize_cli_args(std::env::args_os().collect())
}

fn run_cli() -> i32 {
    let cli = Cli::parse_from(normalized_cli_args());
    init_logging(cli.verbose);

    let config = resolve_config(cli.strategy);
    debug!("parse strategy: {}", config.strategy);

    let cmd = cli
        .command
        .unwrap_or(Command::Batch(InputArgs { input: None }));

    match cmd {
        Command::Batch(args) => run_batch_command(&args, config),
        Command::Session(args) => run_session_command(&args, config),
        Command::Repl => run_repl(config),
        Command::Eval(args) => run_eval(&args, config),
    }
}

fn main() {
    std::process::exit(run_cli());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_file_argument_maps_to_batch() {
        let args = vec![OsString::from("exprc"), OsString::from("input.txt")];
        let out = normalize_cli_args(args);
        assert_eq!(out[1].to_string_lossy(), "batch");
        assert_eq!(out[2].to_string_lossy(), "input.txt");
    }

    #[test]
    fn global_flags_before_subcommand_are_kept() {
        let args = vec![
            OsString::from("exprc"),
            OsString::from("-v"),
            OsString::from("eval"),
            OsString::from("1"),
        ];
        let out = normalize_cli_args(args.clone());
        assert_eq!(out, args);
    }

    #[test]
    fn known_subcommands_are_not_normalized() {
        for subcmd in [
            "batch",
            "session",
            "repl",
            "eval",
            "help",
            "--help",
            "-h",
            "--version",
            "-V",
        ] {
            let args = vec![OsString::from("exprc"), OsString::from(subcmd)];
            let out = normalize_cli_args(args.clone());
            assert_eq!(
                out, args,
                "known subcommand '{subcmd}' should not be modified"
            );
        }
    }

    #[test]
    fn empty_args_are_not_modified() {
        let args = vec![OsString::from("exprc")];
        assert_eq!(normalize_cli_args(args.clone()), args);
    }

    #[test]
    fn cli_help_contains_expected_content() {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        cmd.write_long_help(&mut buf).unwrap();
        let help = String::from_utf8(buf).unwrap();

        assert!(help.contains("exprc"));
        assert!(help.contains("EXAMPLES"));
        assert!(help.contains("batch"));
        assert!(help.contains("repl"));
        assert!(help.contains("EXPRC_STRATEGY"));
        assert!(help.contains("--version"));
    }

    #[test]
    fn repl_subcommand_help_mentions_commands() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let repl_cmd = cmd
            .get_subcommands()
            .find(|c| c.get_name() == "repl")
            .expect("repl subcommand should exist");
        let long_about = repl_cmd
            .get_long_about()
            .map(|s| s.to_string())
            .unwrap_or_default();
        assert!(long_about.contains("V <name> <value>"));
    }

    #[test]
    fn cli_parses_verbose_and_strategy() {
        let cli = Cli::try_parse_from(["exprc", "-vvv", "--strategy", "climbing"]).unwrap();
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.strategy, Some(ParseStrategy::PrecedenceClimbing));
        assert!(Cli::try_parse_from(["exprc", "--strategy", "pratt"]).is_err());
    }

    #[test]
    fn cli_parses_eval_bindings() {
        let cli = Cli::try_parse_from([
            "exprc", "eval", "-x * y", "--var", "x=2", "--var", "y = 0.5", "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Eval(args)) => {
                assert_eq!(args.expression, "-x * y");
                assert_eq!(
                    args.vars,
                    vec![("x".to_string(), 2.0), ("y".to_string(), 0.5)]
                );
                assert!(args.json);
            }
            other => panic!("expected Eval command, got {other:?}"),
        }
    }

    #[test]
    fn binding_parser_rejects_garbage() {
        assert!(parse_binding("x").is_err());
        assert!(parse_binding("x=abc").is_err());
        assert_eq!(parse_binding("x=-1e3"), Ok(("x".to_string(), -1000.0)));
    }

    #[test]
    fn batch_and_session_read_files() {
        let dir = tempfile::tempdir().unwrap();
        let batch = dir.path().join("batch.txt");
        fs::write(&batch, "1\nx 2\n1\nx * x\n").unwrap();
        let rc = run_batch_command(
            &InputArgs {
                input: Some(batch.clone()),
            },
            ParserConfig::default(),
        );
        assert_eq!(rc, 0);

        let bad = dir.path().join("bad.txt");
        fs::write(&bad, "0\n1\n1 +\n").unwrap();
        let rc = run_batch_command(&InputArgs { input: Some(bad) }, ParserConfig::default());
        assert_eq!(rc, 1);

        let missing = dir.path().join("missing.txt");
        let rc = run_batch_command(
            &InputArgs {
                input: Some(missing),
            },
            ParserConfig::default(),
        );
        assert_eq!(rc, 2);
    }

    #[test]
    fn session_stops_at_unknown_command() {
        let lines = ["V x 2", "E x * 3", "F 0", "Q", "S 0"].map(String::from);
        let (out, errors) = run_session_lines(lines, ParserConfig::default());
        assert_eq!(out, vec!["0", "(x * 3)", "x * 3", "6"]);
        assert_eq!(errors, 0);
    }
}
