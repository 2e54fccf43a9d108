//! Highspot MCP - addition and knowledge-base search for AI agents
//!
//! Exposes an addition-expression evaluator and Highspot search as MCP tools
//! and prompts over stdio.

pub mod calc;
pub mod error;
pub mod mcp;
pub mod search;

pub use error::{Result, ServerError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
