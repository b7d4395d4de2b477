mod cli;
mod interactive;
mod logger;
mod rpc;
#[cfg(test)]
mod testsupport;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use crossterm::tty::IsTty;
use interactive::printers::Printer;
use interactive::{history, Session};
use rpc::RpcSession;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

fn main() -> Result<()> {
    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => usage_exit(),
    };
    let Some(endpoint) = args.endpoint() else {
        usage_exit();
    };
    logger::init(args.log_file.as_deref(), args.verbose)?;

    // Ctrl-C only raises a flag; the REPL winds down at its next check.
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("failed to install Ctrl-C handler")?;

    let client = RpcSession::connect(&endpoint.url, Duration::from_secs(args.timeout))
        .context("failed to set up HTTP client")?;
    info!("endpoint: {}", client.url());

    let mut stdout = io::stdout();
    let mut session = Session::bootstrap(client, Printer::new(args.raw), &mut stdout)?;

    // Scripted input gets no prompt so output can be piped.
    let prompt = if io::stdin().is_tty() {
        format!("{}> ", endpoint.label)
    } else {
        String::new()
    };

    let mut editor =
        interactive::line_editor(session.catalog.clone()).context("failed to set up line editor")?;
    let history_path = args.history_path();
    if let Some(path) = &history_path {
        history::load(&mut editor, path);
    }

    let end = interactive::repl(&mut session, &mut editor, &prompt, &mut stdout, &interrupted)?;
    info!("session ended: {:?}", end);

    if let Some(path) = &history_path {
        history::save(&mut editor, path);
    }
    println!();
    Ok(())
}

fn usage_exit() -> ! {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "jsonrpc-netcat".to_string());
    println!("{}", cli::usage(&program));
    std::process::exit(1);
}
