//! JSON-RPC method dispatch onto the operation registry

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::protocol::{
    methods, GetPromptResult, InitializeResult, McpHandler, McpRequest, McpResponse,
};
use super::registry::{OperationKind, Registry};
use crate::error::ServerError;

/// MCP request handler backed by a [`Registry`]
#[derive(Clone)]
pub struct RegistryHandler {
    registry: Arc<Registry>,
}

impl RegistryHandler {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Name and arguments of a `tools/call` or `prompts/get` request
    fn call_params(params: &Value) -> (&str, Value) {
        let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
        (name, arguments)
    }

    /// The registry shares one namespace; reject names of the wrong kind
    fn check_kind(&self, name: &str, kind: OperationKind) -> Result<(), ServerError> {
        match self.registry.get(name) {
            Some(d) if d.kind == kind => Ok(()),
            _ => Err(ServerError::UnknownOperation(name.to_string())),
        }
    }

    async fn call_tool(&self, id: Option<Value>, params: &Value) -> McpResponse {
        let (name, arguments) = Self::call_params(params);
        if let Err(e) = self.check_kind(name, OperationKind::Tool) {
            return McpResponse::from_error(id, e);
        }

        match self.registry.call(name, arguments).await {
            Ok(envelope) => McpResponse::success(id, json!(envelope)),
            Err(e) => McpResponse::from_error(id, e),
        }
    }

    async fn get_prompt(&self, id: Option<Value>, params: &Value) -> McpResponse {
        let (name, arguments) = Self::call_params(params);
        if let Err(e) = self.check_kind(name, OperationKind::Prompt) {
            return McpResponse::from_error(id, e);
        }

        let description = self.registry.get(name).map(|d| d.description.clone());
        match self.registry.call(name, arguments).await {
            Ok(envelope) => McpResponse::success(
                id,
                json!(GetPromptResult::from_envelope(description, envelope)),
            ),
            Err(e) => McpResponse::from_error(id, e),
        }
    }
}

#[async_trait]
impl McpHandler for RegistryHandler {
    async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            // notifications/initialized and friends need no reply
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        let response = match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::default();
                McpResponse::success(request.id, json!(result))
            }
            methods::PING => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                let tools = self.registry.tools();
                McpResponse::success(request.id, json!({"tools": tools}))
            }
            methods::LIST_PROMPTS => {
                let prompts = self.registry.prompts();
                McpResponse::success(request.id, json!({"prompts": prompts}))
            }
            methods::CALL_TOOL => self.call_tool(request.id, &request.params).await,
            methods::GET_PROMPT => self.get_prompt(request.id, &request.params).await,
            _ => McpResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::operations::{build_registry, SearchContext};
    use crate::search::{HighspotClient, SearchConfig, StaticCredentials};

    fn handler() -> RegistryHandler {
        let client =
            HighspotClient::new(SearchConfig::with_base_url("http://127.0.0.1:9/search")).unwrap();
        let ctx = SearchContext::new(client, Arc::new(StaticCredentials::default()));
        RegistryHandler::new(Arc::new(build_registry(Arc::new(ctx)).unwrap()))
    }

    fn request(method: &str, params: Value) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    async fn result_of(method: &str, params: Value) -> Value {
        let response = handler()
            .handle_request(request(method, params))
            .await
            .unwrap();
        assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
        response.result.unwrap()
    }

    #[tokio::test]
    async fn test_initialize_advertises_prompts() {
        let result = result_of("initialize", json!({})).await;
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert!(result["capabilities"]["prompts"].is_object());
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call() {
        let result = result_of(
            "tools/call",
            json!({"name": "add", "arguments": {"expression": "2+3+4"}}),
        )
        .await;
        assert_eq!(result, json!({"content": [{"type": "text", "text": "9"}]}));
    }

    #[tokio::test]
    async fn test_prompts_get() {
        let result = result_of(
            "prompts/get",
            json!({"name": "math_addition_example_prompt", "arguments": {"expression": "1+1"}}),
        )
        .await;
        assert_eq!(
            result["messages"][0]["content"]["text"],
            "Okay, the sum of 1+1 is 2."
        );
        assert_eq!(result["messages"][0]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_rpc_error() {
        let response = handler()
            .handle_request(request("tools/call", json!({"name": "subtract"})))
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Unknown operation: subtract");
    }

    #[tokio::test]
    async fn test_prompt_name_not_callable_as_tool() {
        let response = handler()
            .handle_request(request(
                "tools/call",
                json!({"name": "guidedAdditionHelp", "arguments": {}}),
            ))
            .await
            .unwrap();
        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = handler()
            .handle_request(request("resources/list", json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let mut req = request("notifications/initialized", Value::Null);
        req.id = None;
        assert!(handler().handle_request(req).await.is_none());
    }
}
