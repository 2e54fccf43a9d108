//! Error types for the Highspot MCP server

use thiserror::Error;

use crate::mcp::schema::FieldError;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Main error type for the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid expression '{expression}': {reason}. Expected numbers separated by '+', like '2+3+4'")]
    InvalidExpression { expression: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Highspot API error: {status} {status_text}")]
    Remote { status: u16, status_text: String },

    #[error("Invalid arguments: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Operation already registered: {0}")]
    DuplicateName(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ServerError {
    pub(crate) fn invalid_expression(expression: &str, reason: impl Into<String>) -> Self {
        ServerError::InvalidExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }

    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            ServerError::InvalidExpression { .. } => -32602,
            ServerError::Validation(_) => -32602,
            ServerError::UnknownOperation(_) => -32602,
            _ => -32000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::schema::ParamType;

    #[test]
    fn test_error_codes() {
        assert_eq!(ServerError::UnknownOperation("x".into()).code(), -32602);
        assert_eq!(ServerError::Configuration("x".into()).code(), -32000);
        assert_eq!(
            ServerError::Remote {
                status: 401,
                status_text: "Unauthorized".into()
            }
            .code(),
            -32000
        );
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let err = ServerError::Validation(vec![
            FieldError::missing("expression"),
            FieldError::wrong_type("query", ParamType::String, "array"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("expression: required"));
        assert!(msg.contains("query: expected string, got array"));
    }

    #[test]
    fn test_invalid_expression_has_hint() {
        let err = ServerError::invalid_expression("5++3", "empty operand");
        assert_eq!(
            err.to_string(),
            "Invalid expression '5++3': empty operand. Expected numbers separated by '+', like '2+3+4'"
        );
    }
}
