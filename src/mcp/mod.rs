//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC over stdio exposing tools and prompts from a single registry.

pub mod handler;
pub mod operations;
pub mod outcome;
pub mod protocol;
pub mod registry;
pub mod schema;

pub use handler::RegistryHandler;
pub use operations::{build_registry, names, SearchContext};
pub use outcome::{normalize, Outcome};
pub use protocol::{
    methods, ContentBlock, Envelope, GetPromptResult, InitializeResult, McpHandler, McpRequest,
    McpResponse, McpServer,
};
pub use registry::{OperationDescriptor, OperationKind, Registry};
pub use schema::{Arguments, FieldError, InputSchema, ParamType};
