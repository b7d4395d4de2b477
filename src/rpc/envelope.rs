use crate::rpc::models::{CallError, Fault, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

const JSONRPC_VERSION: &str = "2.0";
const DEFAULT_FAULT_CODE: i64 = -32603;

#[derive(Debug, Serialize)]
pub(crate) struct Request<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a [Value],
    id: u64,
}

pub(crate) fn build_request<'a>(method: &'a str, params: &'a [Value], id: u64) -> Request<'a> {
    Request {
        jsonrpc: JSONRPC_VERSION,
        method,
        params,
        id,
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
}

/// Turn a decoded response body into the call result, or the fault it carries.
pub(crate) fn decode_response(body: Value, expected_id: u64) -> Result<Value> {
    if !body.is_object() {
        return Err(CallError::Protocol(format!(
            "invalid JSON-RPC response: expected an object, got {}",
            body
        )));
    }
    let resp: Response = serde_json::from_value(body)
        .map_err(|e| CallError::Protocol(format!("invalid JSON-RPC response: {}", e)))?;
    if let Some(id) = &resp.id {
        if id.as_u64() != Some(expected_id) && !id.is_null() {
            warn!("response id {} does not match request id {}", id, expected_id);
        }
    }
    match resp.error {
        None | Some(Value::Null) => Ok(resp.result.unwrap_or(Value::Null)),
        Some(err) => Err(CallError::Fault(fault_from(err))),
    }
}

/// Read an error member leniently: a missing or null code means -32603, a
/// code that is not an integer has no code at all, and a missing or null
/// message is empty.
fn fault_from(err: Value) -> Fault {
    let mut obj = match err {
        Value::Object(obj) => obj,
        Value::String(message) => {
            return Fault {
                code: Some(DEFAULT_FAULT_CODE),
                message,
                data: None,
            }
        }
        other => {
            warn!("error member is not an object: {}", other);
            return Fault {
                code: Some(DEFAULT_FAULT_CODE),
                message: other.to_string(),
                data: None,
            };
        }
    };
    let code = match obj.remove("code") {
        None | Some(Value::Null) => Some(DEFAULT_FAULT_CODE),
        Some(code) => {
            let int = code.as_i64();
            if int.is_none() {
                warn!("error code {} is not an integer", code);
            }
            int
        }
    };
    let message = match obj.remove("message") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(message)) => message,
        Some(other) => other.to_string(),
    };
    let data = obj.remove("data").filter(|d| !d.is_null());
    Fault {
        code,
        message,
        data,
    }
}

/// Parse the text between the call parentheses as the body of a JSON array.
pub(crate) fn parse_params(raw: &str) -> Result<Vec<Value>> {
    serde_json::from_str(&format!("[{}]", raw)).map_err(CallError::InvalidArguments)
}

/// Keep the string entries of a `system.listMethods` result, in order.
pub(crate) fn method_names(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                other => {
                    warn!("skipping non-string method name {}", other);
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            warn!("system.listMethods returned {} instead of a list", other);
            Vec::new()
        }
    }
}
