use crate::interactive::history;
use clap::Parser;
use std::path::PathBuf;

/// Interactive JSON-RPC over HTTP client.
///
/// Type `method(arg1, arg2, ...)` with JSON arguments to call a method, or
/// `help`, `help <method>` and `exit`.
#[derive(Debug, Parser)]
#[command(name = "jsonrpc-netcat", version)]
pub struct Args {
    /// Endpoint URL, or the host name when followed by a port.
    #[arg(value_name = "URL|HOST")]
    pub target: Option<String>,

    /// Endpoint port when the first argument is a host name.
    #[arg(value_name = "PORT")]
    pub port: Option<String>,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    pub timeout: u64,

    /// Print results as compact JSON instead of indented JSON.
    #[arg(long)]
    pub raw: bool,

    /// Line history file (default: $HOME/.jsonrpc_history).
    #[arg(long, env = "JSONRPC_HISTORY", value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Neither read nor write the history file.
    #[arg(long)]
    pub no_history: bool,

    /// Log JSON-RPC traffic at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Append log output to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Where requests go, and how the prompt names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub label: String,
}

impl Args {
    /// `<url>` or `<host> <port>`; `None` means the usage message should be shown.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match (self.target.as_deref(), self.port.as_deref()) {
            (Some(url), None) if url.contains("://") => Some(Endpoint {
                url: url.to_string(),
                label: url.to_string(),
            }),
            (Some(host), Some(port)) if !host.is_empty() => {
                let port: u16 = port.parse().ok().filter(|p| *p != 0)?;
                Some(Endpoint {
                    url: format!("http://{}:{}/", host, port),
                    label: format!("{}:{}", host, port),
                })
            }
            _ => None,
        }
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        if self.no_history {
            return None;
        }
        self.history.clone().or_else(history::default_path)
    }
}

pub fn usage(program: &str) -> String {
    format!("Usage:\n{} <url>\n{} <host> <port>", program, program)
}
