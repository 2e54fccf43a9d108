//! Tool and prompt catalogue
//!
//! Operation names are part of the host-facing contract and must not change.

use std::sync::Arc;

use serde_json::Value;

use super::outcome::Outcome;
use super::registry::{OperationDescriptor, Registry};
use super::schema::{Arguments, InputSchema, ParamType};
use crate::calc::{evaluate, format_number};
use crate::error::Result;
use crate::search::{CredentialSource, HighspotClient};

/// Registered operation names
pub mod names {
    pub const ADD: &str = "add";
    pub const MATH_ADDITION_EXAMPLE: &str = "mathAdditionExample";
    pub const SEARCH_HIGHSPOT: &str = "searchHighspot";

    pub const MATH_ADDITION_EXAMPLE_PROMPT: &str = "math_addition_example_prompt";
    pub const SEARCH_HIGHSPOT_PROMPT: &str = "search_highspot_prompt";
    pub const REQUEST_EXPRESSION_FOR_ADDITION: &str = "requestExpressionForAddition";
    pub const GUIDED_ADDITION_HELP: &str = "guidedAdditionHelp";
}

const EXPRESSION_DESCRIPTION: &str = "Numbers separated by '+', e.g. 2+3+4";
const QUERY_DESCRIPTION: &str = "Text to search for in Highspot";

const EXPRESSION_FORMAT_HELP: &str = "To add numbers, write them separated by '+' signs, \
for example 2+3+4 or 1.5 + 2.5. At least two numbers are needed and every '+' must \
have a number on both sides.";

/// Search client plus the credential source consulted on each call
pub struct SearchContext {
    client: HighspotClient,
    credentials: Arc<dyn CredentialSource>,
}

impl SearchContext {
    pub fn new(client: HighspotClient, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Resolve credentials, then search; missing credentials fail before any request
    pub async fn search(&self, query: &str) -> Result<Value> {
        let credentials = self.credentials.credentials()?;
        self.client.search(query, &credentials).await
    }
}

fn expression_schema() -> InputSchema {
    InputSchema::new().required("expression", ParamType::String, EXPRESSION_DESCRIPTION)
}

fn query_schema() -> InputSchema {
    InputSchema::new().required("query", ParamType::String, QUERY_DESCRIPTION)
}

async fn add_tool(args: Arguments) -> Result<Outcome> {
    let sum = evaluate(args.require_str("expression")?)?;
    Ok(Outcome::text(format_number(sum)))
}

async fn search_tool(ctx: Arc<SearchContext>, args: Arguments) -> Result<Outcome> {
    let results = ctx.search(args.require_str("query")?).await?;
    Outcome::json(&results)
}

async fn math_addition_prompt(args: Arguments) -> Result<Outcome> {
    let expression = args.require_str("expression")?;
    let sum = evaluate(expression)?;
    Ok(Outcome::text(format!(
        "Okay, the sum of {} is {}.",
        expression,
        format_number(sum)
    )))
}

async fn search_prompt(ctx: Arc<SearchContext>, args: Arguments) -> Result<Outcome> {
    let query = args.require_str("query")?;
    let results = ctx.search(query).await?;
    Ok(Outcome::texts([
        format!("Here are the Highspot search results for \"{}\":", query),
        serde_json::to_string_pretty(&results)?,
    ]))
}

async fn request_expression_prompt(_args: Arguments) -> Result<Outcome> {
    Ok(Outcome::text(
        "Please provide the numbers you would like to add as an expression, \
with each number separated by '+', for example 2+3+4.",
    ))
}

async fn guided_addition_prompt(args: Arguments) -> Result<Outcome> {
    match args.str("expression") {
        None => Ok(Outcome::text(EXPRESSION_FORMAT_HELP)),
        Some(expression) => {
            let sum = evaluate(expression)?;
            Ok(Outcome::texts([
                EXPRESSION_FORMAT_HELP.to_string(),
                format!(
                    "Working through {}: the numbers add up to {}.",
                    expression,
                    format_number(sum)
                ),
            ]))
        }
    }
}

/// Build the registry with every tool and prompt
pub fn build_registry(search: Arc<SearchContext>) -> Result<Registry> {
    let mut registry = Registry::new();

    registry.register(OperationDescriptor::tool(
        names::ADD,
        "Add numbers given as an expression like 2+3+4 and return the sum",
        expression_schema(),
        add_tool,
    ))?;
    registry.register(OperationDescriptor::tool(
        names::MATH_ADDITION_EXAMPLE,
        "Example addition tool: sums an expression like 2+3+4",
        expression_schema(),
        add_tool,
    ))?;
    let ctx = search.clone();
    registry.register(OperationDescriptor::tool(
        names::SEARCH_HIGHSPOT,
        "Search the Highspot knowledge base and return the raw results",
        query_schema(),
        move |args| search_tool(ctx.clone(), args),
    ))?;

    registry.register(OperationDescriptor::prompt(
        names::MATH_ADDITION_EXAMPLE_PROMPT,
        "Add the numbers in an expression and explain the result",
        expression_schema(),
        math_addition_prompt,
    ))?;
    let ctx = search;
    registry.register(OperationDescriptor::prompt(
        names::SEARCH_HIGHSPOT_PROMPT,
        "Search Highspot and present the results",
        query_schema(),
        move |args| search_prompt(ctx.clone(), args),
    ))?;
    registry.register(OperationDescriptor::prompt(
        names::REQUEST_EXPRESSION_FOR_ADDITION,
        "Ask the user for an addition expression",
        InputSchema::new(),
        request_expression_prompt,
    ))?;
    registry.register(OperationDescriptor::prompt(
        names::GUIDED_ADDITION_HELP,
        "Explain how to write an addition expression, optionally working one through",
        InputSchema::new().optional("expression", ParamType::String, EXPRESSION_DESCRIPTION),
        guided_addition_prompt,
    ))?;

    Ok(registry)
}
