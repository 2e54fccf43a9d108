//! Handler outcomes and their normalization into envelopes
//!
//! Handlers produce an [`Outcome`]; [`normalize`] is the single place where
//! an outcome, success or failure, becomes the [`Envelope`] sent to the host.

use serde_json::Value;

use super::protocol::{ContentBlock, Envelope};
use crate::error::{Result, ServerError};

/// Result of running an operation handler
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Vec<ContentBlock>),
    Failure(String),
}

impl Outcome {
    /// Single text block
    pub fn text(text: impl Into<String>) -> Self {
        Outcome::Success(vec![ContentBlock::text(text)])
    }

    /// Several text blocks, in order
    pub fn texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Outcome::Success(texts.into_iter().map(|t| ContentBlock::text(t)).collect())
    }

    /// Pretty-printed JSON in one block
    pub fn json(value: &Value) -> Result<Self> {
        Ok(Self::text(serde_json::to_string_pretty(value)?))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure(message.into())
    }
}

impl From<ServerError> for Outcome {
    fn from(err: ServerError) -> Self {
        Outcome::Failure(err.to_string())
    }
}

/// Convert an outcome into the host-facing envelope
pub fn normalize(outcome: Outcome) -> Envelope {
    match outcome {
        Outcome::Success(content) => Envelope {
            content,
            is_error: None,
        },
        Outcome::Failure(message) => Envelope::error(message),
    }
}
