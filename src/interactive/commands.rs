use super::printers::{print_help_text, print_method_list, print_value};
use super::Session;
use crate::rpc::envelope::parse_params;
use crate::rpc::{Result, RpcClient};
use regex::Regex;
use serde_json::Value;
use std::io::Write;
use std::sync::OnceLock;

static CALL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn call_pattern() -> &'static Regex {
    // Anchored at the start only: text after the last ')' is ignored.
    CALL_PATTERN.get_or_init(|| Regex::new(r"^(.*?)\((.*)\)").expect("call pattern compiles"))
}

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Blank,
    Call { method: String, params: Vec<Value> },
    Command { word: String, params: Vec<String> },
}

pub enum CommandOutcome {
    Continue,
    Quit,
}

/// `name(args)` becomes a call with `args` parsed as a JSON array body;
/// anything else is a whitespace-separated local command.
pub fn classify(line: &str) -> Result<Input> {
    if let Some(caps) = call_pattern().captures(line) {
        let method = caps[1].to_string();
        let params = parse_params(&caps[2])?;
        return Ok(Input::Call { method, params });
    }
    let mut words = line.split_whitespace().map(str::to_string);
    match words.next() {
        Some(word) => Ok(Input::Command {
            word,
            params: words.collect(),
        }),
        None => Ok(Input::Blank),
    }
}

pub fn execute<C: RpcClient>(
    input: Input,
    session: &mut Session<C>,
    out: &mut dyn Write,
) -> Result<CommandOutcome> {
    match input {
        Input::Blank => {}
        Input::Call { method, params } => {
            let result = session.client.call(&method, &params)?;
            print_value(out, &session.printer, &result)?;
        }
        Input::Command { word, params } => match word.as_str() {
            "help" if params.is_empty() => print_method_list(out, session.catalog.names())?,
            "help" => {
                let help = session.client.method_help(&params)?;
                print_help_text(out, &session.printer, &help)?;
            }
            "exit" => return Ok(CommandOutcome::Quit),
            _ => writeln!(out, "No such command: {}", word)?,
        },
    }
    Ok(CommandOutcome::Continue)
}
