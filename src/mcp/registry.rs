//! Operation registry
//!
//! Tools and prompts share one namespace and one pipeline:
//! resolve name, validate arguments, run handler, normalize. The registry is
//! built once at startup and only read afterwards.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{Map, Value};

use super::outcome::{normalize, Outcome};
use super::protocol::{Envelope, PromptDefinition, ToolDefinition};
use super::schema::{Arguments, InputSchema};
use crate::error::{Result, ServerError};

pub type HandlerFuture = BoxFuture<'static, Result<Outcome>>;

/// Operation handler; receives validated arguments
pub type Handler = Arc<dyn Fn(Arguments) -> HandlerFuture + Send + Sync>;

/// How an operation is exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Invoked directly with schema-shaped arguments
    Tool,
    /// Templated, conversational invocation
    Prompt,
}

/// A registered operation
#[derive(Clone)]
pub struct OperationDescriptor {
    pub name: String,
    pub description: String,
    pub kind: OperationKind,
    pub schema: InputSchema,
    handler: Handler,
}

impl OperationDescriptor {
    pub fn new<F, Fut>(
        kind: OperationKind,
        name: &str,
        description: &str,
        schema: InputSchema,
        handler: F,
    ) -> Self
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Outcome>> + Send + 'static,
    {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            schema,
            handler: Arc::new(move |args| handler(args).boxed()),
        }
    }

    pub fn tool<F, Fut>(name: &str, description: &str, schema: InputSchema, handler: F) -> Self
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Outcome>> + Send + 'static,
    {
        Self::new(OperationKind::Tool, name, description, schema, handler)
    }

    pub fn prompt<F, Fut>(name: &str, description: &str, schema: InputSchema, handler: F) -> Self
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Outcome>> + Send + 'static,
    {
        Self::new(OperationKind::Prompt, name, description, schema, handler)
    }

    /// Prompts accept a bare value in place of a single-field object
    fn prepare_arguments(&self, raw: Value) -> Value {
        if self.kind != OperationKind::Prompt {
            return raw;
        }
        let bare = matches!(raw, Value::String(_) | Value::Number(_) | Value::Bool(_));
        match self.schema.single_param() {
            Some(param) if bare => {
                let mut wrapped = Map::new();
                wrapped.insert(param.name.clone(), raw);
                Value::Object(wrapped)
            }
            _ => raw,
        }
    }
}

impl std::fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Registry of tools and prompts
#[derive(Debug, Default)]
pub struct Registry {
    operations: Vec<OperationDescriptor>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation; names must be unique
    pub fn register(&mut self, descriptor: OperationDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.name) {
            return Err(ServerError::DuplicateName(descriptor.name));
        }
        self.index
            .insert(descriptor.name.clone(), self.operations.len());
        self.operations.push(descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&OperationDescriptor> {
        self.index.get(name).map(|&i| &self.operations[i])
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Resolve, validate and run an operation
    ///
    /// Handler errors are folded into [`Outcome::Failure`]; only an unknown
    /// name or invalid arguments come back as `Err`.
    pub async fn invoke(&self, name: &str, raw_args: Value) -> Result<Outcome> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| ServerError::UnknownOperation(name.to_string()))?;

        let raw_args = descriptor.prepare_arguments(raw_args);
        let args = descriptor
            .schema
            .validate(&raw_args, descriptor.kind == OperationKind::Prompt)?;

        tracing::debug!(operation = name, kind = ?descriptor.kind, "Invoking operation");
        let outcome = match (descriptor.handler)(args).await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::from(e),
        };

        if let Outcome::Failure(ref message) = outcome {
            tracing::warn!(operation = name, "Operation failed: {}", message);
        }
        Ok(outcome)
    }

    /// Invoke and normalize into an envelope
    ///
    /// Invalid arguments become an error envelope that includes the expected
    /// argument shape. Unknown names stay an `Err` for the protocol layer.
    pub async fn call(&self, name: &str, raw_args: Value) -> Result<Envelope> {
        match self.invoke(name, raw_args).await {
            Ok(outcome) => Ok(normalize(outcome)),
            Err(e @ ServerError::Validation(_)) => {
                let usage = self
                    .get(name)
                    .map(|d| d.schema.usage())
                    .unwrap_or_default();
                tracing::warn!(operation = name, "Rejected arguments: {}", e);
                Ok(normalize(Outcome::failure(format!(
                    "{}. Expected arguments: {}",
                    e, usage
                ))))
            }
            Err(e) => Err(e),
        }
    }

    fn of_kind(&self, kind: OperationKind) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.iter().filter(move |d| d.kind == kind)
    }

    /// Tool definitions in registration order
    pub fn tools(&self) -> Vec<ToolDefinition> {
        self.of_kind(OperationKind::Tool)
            .map(|d| ToolDefinition {
                name: d.name.clone(),
                description: d.description.clone(),
                input_schema: d.schema.to_json_schema(),
            })
            .collect()
    }

    /// Prompt definitions in registration order
    pub fn prompts(&self) -> Vec<PromptDefinition> {
        self.of_kind(OperationKind::Prompt)
            .map(|d| PromptDefinition {
                name: d.name.clone(),
                description: Some(d.description.clone()),
                arguments: d.schema.prompt_arguments(),
            })
            .collect()
    }
}
