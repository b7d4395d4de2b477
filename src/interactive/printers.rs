use crate::rpc::{CallError, Fault};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::io::{self, Write};

const HELP_PLACEHOLDER: &str = "(help not available)";

/// How results are rendered: indented JSON by default, compact with `--raw`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    raw: bool,
}

impl Printer {
    pub fn new(raw: bool) -> Self {
        Self { raw }
    }

    pub fn render(&self, value: &Value) -> String {
        if self.raw {
            value.to_string()
        } else {
            dump_json(value)
        }
    }
}

/// JSON with 4-space indentation and `": "` between keys and values.
pub fn dump_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

pub fn print_value(out: &mut dyn Write, printer: &Printer, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", printer.render(value))
}

pub fn print_fault(out: &mut dyn Write, printer: &Printer, fault: &Fault) -> io::Result<()> {
    writeln!(out, "{}: {}", fault.kind(), fault.message)?;
    if let Some(data) = &fault.data {
        writeln!(out, "{}", printer.render(data))?;
    }
    Ok(())
}

pub fn print_error(out: &mut dyn Write, printer: &Printer, err: &CallError) -> io::Result<()> {
    match err {
        CallError::Fault(fault) => print_fault(out, printer, fault),
        other => writeln!(out, "{}: {}", other.kind(), other.message()),
    }
}

pub fn print_method_list(out: &mut dyn Write, names: &[String]) -> io::Result<()> {
    writeln!(out, "{}", names.join("\n"))
}

pub fn print_help_text(out: &mut dyn Write, printer: &Printer, help: &Value) -> io::Result<()> {
    let empty = match help {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if empty {
        return writeln!(out, "{}", HELP_PLACEHOLDER);
    }
    match help {
        Value::String(s) => writeln!(out, "{}", s),
        other => print_value(out, printer, other),
    }
}
