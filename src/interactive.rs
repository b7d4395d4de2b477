mod commands;
pub mod completion;
pub mod history;
pub mod printers;

use crate::rpc::{CallError, Result, RpcClient};
use anyhow::anyhow;
use commands::CommandOutcome;
use completion::{MethodCatalog, MethodCompleter};
use printers::{print_error, print_fault, Printer};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor, Helper};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Everything the REPL owns: the endpoint client, its method list and the output style.
pub struct Session<C> {
    pub client: C,
    pub catalog: MethodCatalog,
    pub printer: Printer,
}

impl<C: RpcClient> Session<C> {
    /// Fetch the method list up front. A failure is reported and leaves the list empty.
    pub fn bootstrap(mut client: C, printer: Printer, out: &mut dyn Write) -> io::Result<Self> {
        let methods = match client.list_methods() {
            Ok(methods) => {
                debug!("endpoint lists {} methods", methods.len());
                methods
            }
            Err(err) => {
                warn!("system.listMethods failed: {}", err);
                print_error(out, &printer, &err)?;
                Vec::new()
            }
        };
        Ok(Self {
            client,
            catalog: MethodCatalog::new(methods),
            printer,
        })
    }
}

/// Run one line. Faults are printed and swallowed; any other error is printed
/// and handed back so the caller can terminate.
pub fn process_line<C: RpcClient>(
    session: &mut Session<C>,
    line: &str,
    out: &mut dyn Write,
) -> Result<CommandOutcome> {
    let outcome =
        commands::classify(line).and_then(|input| commands::execute(input, session, out));
    match outcome {
        Err(CallError::Fault(fault)) => {
            print_fault(out, &session.printer, &fault)?;
            Ok(CommandOutcome::Continue)
        }
        Err(err) => {
            print_error(out, &session.printer, &err)?;
            Err(err)
        }
        ok => ok,
    }
}

pub fn line_editor(
    catalog: MethodCatalog,
) -> rustyline::Result<Editor<MethodCompleter, DefaultHistory>> {
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();
    let mut editor = Editor::with_config(config)?;
    editor.set_helper(Some(MethodCompleter::new(catalog)));
    Ok(editor)
}

/// One read from the line source.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadLine {
    Line(String),
    Eof,
    Interrupted,
}

/// Where the REPL gets its input. The line editor in practice; scripted in tests.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<ReadLine>;

    /// Record a non-blank line in the history.
    fn remember(&mut self, line: &str);
}

impl<H: Helper> LineSource for Editor<H, DefaultHistory> {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<ReadLine> {
        match self.readline(prompt) {
            Ok(line) => Ok(ReadLine::Line(line)),
            Err(ReadlineError::Eof) => Ok(ReadLine::Eof),
            Err(ReadlineError::Interrupted) => Ok(ReadLine::Interrupted),
            Err(e) => Err(anyhow!("failed to read input: {}", e)),
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(e) = self.add_history_entry(line) {
            debug!("history entry not added: {}", e);
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEnd {
    Exit,
    EndOfInput,
    Interrupted,
}

/// Read lines until `exit`, end of input or Ctrl-C.
///
/// `interrupted` is set from the SIGINT handler. It is checked before every
/// read and again once a line has been read, so an interrupt that lands while
/// a request is in flight ends the loop as soon as that request returns.
pub fn repl<C: RpcClient, L: LineSource>(
    session: &mut Session<C>,
    lines: &mut L,
    prompt: &str,
    out: &mut dyn Write,
    interrupted: &AtomicBool,
) -> anyhow::Result<LoopEnd> {
    loop {
        if interrupted.load(Ordering::SeqCst) {
            debug!("interrupted");
            return Ok(LoopEnd::Interrupted);
        }
        let line = match lines.read_line(prompt)? {
            ReadLine::Line(line) => line,
            ReadLine::Eof => {
                debug!("end of input");
                return Ok(LoopEnd::EndOfInput);
            }
            ReadLine::Interrupted => {
                debug!("interrupted at the prompt");
                return Ok(LoopEnd::Interrupted);
            }
        };
        if interrupted.load(Ordering::SeqCst) {
            debug!("interrupted while reading; dropping {:?}", line);
            return Ok(LoopEnd::Interrupted);
        }
        if !line.trim().is_empty() {
            lines.remember(&line);
        }
        let outcome = process_line(session, &line, out);
        out.flush()?;
        if let CommandOutcome::Quit = outcome? {
            return Ok(LoopEnd::Exit);
        }
    }
}
