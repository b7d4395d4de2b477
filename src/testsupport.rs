//! In-memory endpoint and input used by the REPL tests.

use crate::interactive::{LineSource, ReadLine};
use crate::rpc::{Result, RpcClient};
use serde_json::Value;
use std::collections::VecDeque;

/// Replies with scripted results in order and records every call it receives.
pub struct ScriptedClient {
    replies: VecDeque<Result<Value>>,
    pub calls: Vec<(String, Vec<Value>)>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<Value>>) -> Self {
        Self {
            replies: replies.into(),
            calls: Vec::new(),
        }
    }
}

impl RpcClient for ScriptedClient {
    fn call(&mut self, method: &str, params: &[Value]) -> Result<Value> {
        self.calls.push((method.to_string(), params.to_vec()));
        self.replies
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for {}", method))
    }
}

/// Hands out scripted reads, then end of input. Records prompts and history entries.
pub struct ScriptedLines {
    reads: VecDeque<ReadLine>,
    pub prompts: Vec<String>,
    pub remembered: Vec<String>,
}

impl ScriptedLines {
    pub fn new(reads: Vec<ReadLine>) -> Self {
        Self {
            reads: reads.into(),
            prompts: Vec::new(),
            remembered: Vec::new(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<ReadLine> {
        self.prompts.push(prompt.to_string());
        Ok(self.reads.pop_front().unwrap_or(ReadLine::Eof))
    }

    fn remember(&mut self, line: &str) {
        self.remembered.push(line.to_string());
    }
}
