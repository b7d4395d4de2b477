use serde_json::Value;
use std::error::Error;
use std::fmt;

pub type Result<T> = std::result::Result<T, CallError>;

/// Classification of a JSON-RPC error object by its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError,
    JsonRpcError,
}

impl FaultKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            -32700 => FaultKind::ParseError,
            -32600 => FaultKind::InvalidRequest,
            -32601 => FaultKind::MethodNotFound,
            -32602 => FaultKind::InvalidParams,
            -32603 => FaultKind::InternalError,
            -32099..=-32000 => FaultKind::ServerError,
            _ => FaultKind::JsonRpcError,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FaultKind::ParseError => "ParseError",
            FaultKind::InvalidRequest => "InvalidRequest",
            FaultKind::MethodNotFound => "MethodNotFound",
            FaultKind::InvalidParams => "InvalidParams",
            FaultKind::InternalError => "InternalError",
            FaultKind::ServerError => "ServerError",
            FaultKind::JsonRpcError => "JsonRpcError",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error object returned by the endpoint in place of a result.
///
/// `code` is `None` when the endpoint sent something other than an integer.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub code: Option<i64>,
    pub message: String,
    pub data: Option<Value>,
}

impl Fault {
    pub fn kind(&self) -> FaultKind {
        self.code.map_or(FaultKind::JsonRpcError, FaultKind::from_code)
    }
}

/// Everything that can go wrong between typing a call and printing its result.
///
/// Only [`CallError::Fault`] is recoverable; the REPL terminates on the rest.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("{}: {}", .0.kind(), .0.message)]
    Fault(Fault),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("{0}")]
    Protocol(String),
    #[error("{0}")]
    InvalidArguments(#[source] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl CallError {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CallError::Fault(_))
    }

    /// Name printed in front of the message, e.g. `MethodNotFound` or `TransportError`.
    pub fn kind(&self) -> &'static str {
        match self {
            CallError::Fault(fault) => fault.kind().name(),
            CallError::Transport(_) => "TransportError",
            CallError::HttpStatus { .. } => "HttpError",
            CallError::Protocol(_) => "ProtocolError",
            CallError::InvalidArguments(_) => "InvalidArguments",
            CallError::Io(_) => "IOError",
        }
    }

    pub fn message(&self) -> String {
        match self {
            CallError::Fault(fault) => fault.message.clone(),
            CallError::Transport(e) => with_causes(e),
            other => other.to_string(),
        }
    }
}

/// `err` followed by each of its sources, joined with `": "`.
fn with_causes(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !msg.ends_with(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = cause.source();
    }
    msg
}

impl From<Fault> for CallError {
    fn from(fault: Fault) -> Self {
        CallError::Fault(fault)
    }
}
