//! Purpose: `japi` CLI entry point and command parsing.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Envelopes and forward results are the only stdout payloads.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Logging goes to stderr and defaults to `warn` so stdout stays parseable.
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint,
    error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod command_dispatch;
mod render;

use japi::api::{Config, Error, ErrorKind, Japi, to_exit_code};
use japi::json::parse;
use render::render_json;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `japi --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    let japi = build_registry(cli.config, cli.strict).map_err(|err| (err, color_mode))?;

    command_dispatch::dispatch_command(cli.command, japi, color_mode)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

fn build_registry(config_path: Option<PathBuf>, strict: bool) -> Result<Japi, Error> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    // `--strict` can only tighten what the file says.
    let config = config.strict(config.strict || strict);
    tracing::debug!(strict = config.strict, "registry configured");
    Ok(Japi::new(config))
}

#[derive(Parser)]
#[command(
    name = "japi",
    version,
    about = "Validate, build, and forward JSend-style response envelopes",
    long_about = None,
    after_help = r#"ENVELOPES
  {"status":"success","data":<any>,"meta"?:<any>}
  {"status":"fail","data":<any>}
  {"status":"error","message":<string>,"code"?:<any>,"data"?:<any>}

EXAMPLES
  $ japi success '{"id": 7}'
  $ japi canonicalize --error 'disk full'
  $ japi canonicalize --pair '[null, [1, 2, 3]]'
  $ curl -s https://example.test/api | japi forward -
  $ japi --strict validate '{"status":"fail","data":null,"meta":{}}'

JSON arguments accept `-` to read from stdin, at most one per command."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Reject envelopes with keys outside their status's allowed set"
    )]
    strict: bool,
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "JSON config file, e.g. {\"strict\": true}",
        value_hint = ValueHint::FilePath
    )]
    config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize pretty output"
    )]
    color: ColorMode,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Check whether a value is a well-formed envelope (exit 4 if not)")]
    Validate {
        #[arg(value_name = "JSON", help = "Value to check (default: stdin)")]
        input: Option<String>,
    },
    #[command(about = "Coerce an (error, data, meta) triple or an [error, data] pair into an envelope")]
    Canonicalize(CanonicalizeArgs),
    #[command(about = "Build a success envelope")]
    Success {
        #[arg(value_name = "DATA", help = "Payload JSON")]
        data: Option<String>,
        #[arg(long, value_name = "JSON", help = "Metadata attached when truthy")]
        meta: Option<String>,
    },
    #[command(about = "Build a fail envelope")]
    Fail {
        #[arg(value_name = "DATA", help = "Payload JSON")]
        data: Option<String>,
    },
    #[command(about = "Build an error envelope from a message or a {message, code?, data?} object")]
    Error {
        #[arg(
            value_name = "MESSAGE",
            help = "Message text, a JSON string, or a JSON {message, code?, data?} object"
        )]
        message: Option<String>,
    },
    #[command(about = "Convert an envelope into an {error, data} pair (exit 4 on error)")]
    Forward {
        #[arg(value_name = "JSON", help = "Envelope to forward (default: stdin)")]
        input: Option<String>,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct CanonicalizeArgs {
    #[arg(
        long,
        value_name = "JSON",
        help = "Error indicator, JSON or plain text; falsy JSON means no error"
    )]
    error: Option<String>,
    #[arg(long, value_name = "JSON", help = "Payload; omitted means no data")]
    data: Option<String>,
    #[arg(long, value_name = "JSON", help = "Metadata attached to wrapped payloads when truthy")]
    meta: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        conflicts_with_all = ["error", "data", "meta"],
        help = "Single value; a two-element array is read as [error, data]"
    )]
    pair: Option<String>,
}

fn read_stdin() -> Result<String, Error> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read stdin")
            .with_source(err)
    })?;
    Ok(text)
}

fn parse_json_text(text: &str, context: &str) -> Result<Value, Error> {
    parse::from_str(text).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message(format!("invalid json for {context}"))
            .with_hint(parse::hint_for_error(&err, context))
            .with_source(err)
    })
}

/// Inline JSON, or stdin when the argument is `-`. `None` stays `None`.
fn json_arg(arg: Option<&str>, context: &str) -> Result<Option<Value>, Error> {
    match arg {
        None => Ok(None),
        Some("-") => parse_json_text(&read_stdin()?, context).map(Some),
        Some(text) => parse_json_text(text, context).map(Some),
    }
}

/// Like `json_arg`, but a missing argument falls back to piped stdin.
fn required_json_input(arg: Option<&str>, context: &str) -> Result<Value, Error> {
    if arg.is_none() && io::stdin().is_terminal() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("missing json input")
            .with_hint("Provide JSON inline, or pipe it to stdin."));
    }
    match arg {
        None | Some("-") => parse_json_text(&read_stdin()?, context),
        Some(text) => parse_json_text(text, context),
    }
}

fn emit_json(value: Value, color_mode: ColorMode) {
    let is_tty = io::stdout().is_terminal();
    let use_color = color_mode.use_color(is_tty);
    let text = if is_tty || use_color {
        render_json(&value, use_color)
    } else {
        serde_json::to_string(&value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{text}");
}

const RED: &str = "31";
const YELLOW: &str = "33";

fn paint(label: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("\u{1b}[{code}m{label}\u{1b}[0m")
    } else {
        label.to_string()
    }
}

// Terminals get readable lines; pipes and scripts get one JSON object.
fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    let text = if is_tty {
        error_text(err, color_mode.use_color(is_tty))
    } else {
        error_json(err).to_string()
    };
    eprintln!("{text}");
}

fn error_json(err: &Error) -> Value {
    let mut body = Map::new();
    body.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    body.insert("message".to_string(), json!(err.summary()));
    if let Some(hint) = err.hint() {
        body.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        body.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = err.causes();
    if !causes.is_empty() {
        body.insert("causes".to_string(), json!(causes));
    }
    json!({ "error": body })
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut text = format!("{} {}", paint("error:", RED, use_color), err.summary());
    let path = err.path().map(|path| path.display().to_string());
    let detail = [
        ("hint:", err.hint().map(str::to_string)),
        ("path:", path),
        ("caused by:", err.causes().into_iter().next()),
    ];
    for (label, value) in detail {
        if let Some(value) = value {
            text.push_str(&format!("\n{} {value}", paint(label, YELLOW, use_color)));
        }
    }
    text
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint("Unexpected internal failure. Retry with RUST_LOG=debug and share the input if it persists.")
}

// First non-blank line of clap's rendering, minus its `error:` prefix.
fn clap_error_summary(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.strip_prefix("error:").unwrap_or(line).trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}
