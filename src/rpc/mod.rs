pub mod envelope;
pub mod models;
pub mod session;

pub use models::{CallError, Fault, Result};
pub use session::{RpcClient, RpcSession};
