//! Classifying and checking decoded invocation results.
//!
//! The invocation layer hands back each result as a JSON value. An object
//! with an `error` member is a failure whatever that member holds; everything
//! else is a success value.

use crate::error::{AssertionError, AssertionResult};
use serde_json::Value;

/// Name the service uses for an invocation on a space it has never seen.
pub const SPACE_UNKNOWN: &str = "SpaceUnknown";

/// Name of a failure raised inside a capability handler.
pub const HANDLER_EXECUTION_ERROR: &str = "HandlerExecutionError";

/// A decoded invocation result.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome {
    Success(Value),
    Failure {
        name: Option<String>,
        message: String,
        raw: Value,
    },
}

impl InvocationOutcome {
    pub fn from_value(value: Value) -> Self {
        if value.get("error").is_none() {
            return InvocationOutcome::Success(value);
        }

        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        InvocationOutcome::Failure {
            name,
            message,
            raw: value,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, InvocationOutcome::Failure { .. })
    }

    /// The failure name, if this is a named failure.
    pub fn error_name(&self) -> Option<&str> {
        match self {
            InvocationOutcome::Failure { name, .. } => name.as_deref(),
            InvocationOutcome::Success(_) => None,
        }
    }
}

impl From<Value> for InvocationOutcome {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Log a failure outcome at warn level. Successes are ignored.
pub fn warn_if_error(outcome: &InvocationOutcome) {
    if let InvocationOutcome::Failure { raw, .. } = outcome {
        tracing::warn!("error result {}", raw);
    }
}

/// Take the only result of a single-invocation batch.
pub fn single_outcome(results: Vec<Value>) -> AssertionResult<InvocationOutcome> {
    let count = results.len();
    let mut iter = results.into_iter();
    match (iter.next(), count) {
        (Some(value), 1) => Ok(InvocationOutcome::from_value(value)),
        _ => Err(AssertionError::UnexpectedValue(format!(
            "invocation should only return one result, got {}",
            count
        ))),
    }
}

fn named_failure(outcome: &InvocationOutcome) -> AssertionResult<Option<&str>> {
    match outcome {
        InvocationOutcome::Success(_) => Ok(None),
        InvocationOutcome::Failure { name: None, .. } => Err(AssertionError::UnnamedError),
        InvocationOutcome::Failure {
            name: Some(name), ..
        } if name == "Error" => Err(AssertionError::GenericErrorName),
        InvocationOutcome::Failure {
            name: Some(name), ..
        } => Ok(Some(name.as_str())),
    }
}

/// Check a `space/info` result for `space_did`.
///
/// A failure must carry a specific name, and must be [`SPACE_UNKNOWN`] when
/// `expect_unknown` is set. A success must report `did == space_did`.
pub fn check_space_info(
    outcome: &InvocationOutcome,
    space_did: &str,
    expect_unknown: bool,
) -> AssertionResult<()> {
    let result = named_failure(outcome).and_then(|named| match named {
        Some(name) if expect_unknown && name != SPACE_UNKNOWN => {
            Err(AssertionError::UnexpectedErrorName {
                expected: SPACE_UNKNOWN.to_string(),
                actual: name.to_string(),
            })
        }
        Some(_) => Ok(()),
        None => {
            let did = match outcome {
                InvocationOutcome::Success(value) => value.get("did").and_then(Value::as_str),
                InvocationOutcome::Failure { .. } => None,
            };
            if did == Some(space_did) {
                Ok(())
            } else {
                Err(AssertionError::UnexpectedValue(format!(
                    "space/info success result did {:?} does not match {}",
                    did, space_did
                )))
            }
        }
    });

    if result.is_err() {
        tracing::warn!("unexpected result from space/info invocation: {:?}", outcome);
    }
    result
}

/// Check that a `store/list` result is the success value of an empty space.
pub fn check_store_list_empty(outcome: &InvocationOutcome) -> AssertionResult<()> {
    let value = match outcome {
        InvocationOutcome::Success(value) => value,
        InvocationOutcome::Failure { name, message, .. } => {
            return Err(AssertionError::UnexpectedFailure {
                name: name.clone().unwrap_or_default(),
                message: message.clone(),
            })
        }
    };

    if value.get("name").and_then(Value::as_str) == Some(HANDLER_EXECUTION_ERROR) {
        return Err(AssertionError::UnexpectedFailure {
            name: HANDLER_EXECUTION_ERROR.to_string(),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        });
    }

    let size = value.get("size").and_then(Value::as_u64);
    let empty_results = value
        .get("results")
        .and_then(Value::as_array)
        .map(Vec::is_empty);

    match (size, empty_results) {
        (Some(0), Some(true)) => Ok(()),
        _ => Err(AssertionError::UnexpectedValue(format!(
            "store/list result is not an empty listing: {}",
            value
        ))),
    }
}
