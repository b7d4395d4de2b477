use crate::rpc::envelope::{build_request, decode_response, method_names};
use crate::rpc::models::{CallError, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("jsonrpc-netcat/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY: usize = 512;

/// Anything that can carry a method call to an endpoint and bring back its result.
pub trait RpcClient {
    fn call(&mut self, method: &str, params: &[Value]) -> Result<Value>;

    /// Ask the endpoint which methods it exposes via `system.listMethods`.
    fn list_methods(&mut self) -> Result<Vec<String>> {
        self.call("system.listMethods", &[]).map(method_names)
    }

    /// Fetch the documentation text of a method via `system.methodHelp`.
    fn method_help(&mut self, params: &[String]) -> Result<Value> {
        let params: Vec<Value> = params.iter().cloned().map(Value::String).collect();
        self.call("system.methodHelp", &params)
    }
}

/// JSON-RPC over HTTP, one blocking POST per call.
#[derive(Debug)]
pub struct RpcSession {
    http: reqwest::blocking::Client,
    url: String,
    next_id: u64,
}

impl RpcSession {
    pub fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            url: url.to_string(),
            next_id: 1,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RpcClient for RpcSession {
    fn call(&mut self, method: &str, params: &[Value]) -> Result<Value> {
        let id = self.take_id();
        let request = build_request(method, params, id);
        if let Ok(text) = serde_json::to_string(&request) {
            debug!("[rpc->] {}", text);
        }
        let resp = self.http.post(&self.url).json(&request).send()?;
        let status = resp.status();
        let body = resp.text()?;
        debug!("[rpc<-] {} {}", status.as_u16(), body.trim_end());

        // Faults often arrive with a 4xx/5xx status, so try the body first.
        let parsed: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(_) if !status.is_success() => {
                return Err(CallError::HttpStatus {
                    status: status.as_u16(),
                    body: truncate(body.trim(), MAX_ERROR_BODY),
                });
            }
            Err(e) => {
                return Err(CallError::Protocol(format!(
                    "response is not valid JSON: {}",
                    e
                )));
            }
        };
        decode_response(parsed, id)
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
