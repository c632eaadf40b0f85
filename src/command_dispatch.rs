//! Purpose: Hold top-level CLI command dispatch for `japi`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Each command writes exactly one JSON document to stdout on success.
//! Invariants: Constructor argument errors surface as errors, never as envelopes.

use super::*;
use japi::api::{Indicator, envelope_status};

pub(super) fn dispatch_command(
    command: Command,
    japi: Japi,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "japi", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Validate { input } => {
            let value = required_json_input(input.as_deref(), "validate")?;
            let valid = japi.is_valid(&value);
            let status = envelope_status(&value).map(|status| status.tag());
            emit_json(
                json!({
                    "valid": valid,
                    "strict": japi.config().strict,
                    "status": status,
                }),
                color_mode,
            );
            Ok(rejected_unless(valid))
        }
        Command::Canonicalize(args) => {
            let envelope = match args.pair.as_deref() {
                Some(pair) => {
                    let value = parse_json_text(&stdin_or(pair)?, "--pair")?;
                    japi.from_value(value)
                }
                None => {
                    ensure_single_stdin(&[
                        ("--error", args.error.as_deref()),
                        ("--data", args.data.as_deref()),
                        ("--meta", args.meta.as_deref()),
                    ])?;
                    let indicator = match args.error.as_deref() {
                        Some(text) => Indicator::from(json_or_text(&stdin_or(text)?)),
                        None => Indicator::Absent,
                    };
                    let data = json_arg(args.data.as_deref(), "--data")?;
                    let meta = json_arg(args.meta.as_deref(), "--meta")?;
                    japi.from_arguments(indicator, data, meta)
                }
            };
            emit_json(envelope.into_value(), color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Success { data, meta } => {
            ensure_single_stdin(&[("DATA", data.as_deref()), ("--meta", meta.as_deref())])?;
            let data = json_arg(data.as_deref(), "DATA")?;
            let meta = json_arg(meta.as_deref(), "--meta")?;
            let envelope = japi.success(data, meta)?;
            emit_json(envelope.into_value(), color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Fail { data } => {
            let envelope = japi.fail(json_arg(data.as_deref(), "DATA")?)?;
            emit_json(envelope.into_value(), color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Error { message } => {
            let message = match message.as_deref() {
                Some(text) => Some(message_value(&stdin_or(text)?)),
                None => None,
            };
            let envelope = japi.error(message)?;
            emit_json(envelope.into_value(), color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Forward { input } => {
            let value = required_json_input(input.as_deref(), "forward")?;
            let (output, delivered) = japi.forward(value, |err, data| {
                let delivered = err.is_none();
                let err = err.map(|err| err.to_value());
                (json!({ "error": err, "data": data }), delivered)
            });
            emit_json(output, color_mode);
            Ok(rejected_unless(delivered))
        }
    }
}

fn rejected_unless(ok: bool) -> RunOutcome {
    if ok {
        RunOutcome::ok()
    } else {
        RunOutcome::with_code(to_exit_code(ErrorKind::Rejected))
    }
}

fn stdin_or(arg: &str) -> Result<String, Error> {
    if arg == "-" {
        return read_stdin();
    }
    Ok(arg.to_string())
}

// Stdin can only be consumed once per invocation.
fn ensure_single_stdin(args: &[(&str, Option<&str>)]) -> Result<(), Error> {
    let readers: Vec<&str> = args
        .iter()
        .filter(|(_, value)| *value == Some("-"))
        .map(|(name, _)| *name)
        .collect();
    if readers.len() > 1 {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("only one argument can read stdin, got {}", readers.join(", ")))
            .with_hint("Pass all but one of them inline."));
    }
    Ok(())
}

// Text that is not JSON is taken verbatim.
fn json_or_text(text: &str) -> Value {
    let text = text.trim_end_matches(['\r', '\n']);
    parse::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

// Only a JSON object or string means something other than its raw text, so
// `japi error 404` reports "404" rather than rejecting a numeric message.
fn message_value(text: &str) -> Value {
    match json_or_text(text) {
        value @ (Value::Object(_) | Value::String(_)) => value,
        _ => Value::String(text.trim_end_matches(['\r', '\n']).to_string()),
    }
}
