use anyhow::{anyhow, Context, Result};
use std::{fs::OpenOptions, io, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

const QUIET_FILTER: &str = "jsonrpc_netcat=warn";
const VERBOSE_FILTER: &str = "jsonrpc_netcat=debug";

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// With a log file the output is appended there without colors, otherwise it
/// goes to stderr so it never mixes with results on stdout.
pub fn init(log_file: Option<&Path>, verbose: bool) -> Result<()> {
    let default = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow!("failed to install logger: {}", e))
}
