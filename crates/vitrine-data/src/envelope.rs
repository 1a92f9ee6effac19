//! Decoding of the cart endpoints' JSON replies.

use serde::Deserialize;
use serde_json::{Map, Value};
use vitrine_core::{Currency, Money};

use crate::{FetchError, Response};

/// The decoded envelope `{success, message?, total?}` of a cart mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// `success: true`.
    Applied {
        /// Server message, absent or blank treated as `None`.
        message: Option<String>,
        /// New cart total. `None` means "leave the displayed total alone".
        total: Option<Money>,
    },
    /// `success` false or missing.
    Rejected {
        /// Server message, absent or blank treated as `None`.
        message: Option<String>,
    },
}

impl MutationOutcome {
    /// Decode a response, whatever its status. Anything but a JSON object is
    /// a parse error.
    pub fn from_response(response: &Response, currency: Currency) -> Result<Self, FetchError> {
        let Value::Object(fields) = response.json::<Value>()? else {
            return Err(FetchError::Parse("envelope is not a JSON object".to_string()));
        };

        let message = message_field(&fields);
        let success = matches!(fields.get("success"), Some(Value::Bool(true)));

        Ok(if success {
            MutationOutcome::Applied {
                message,
                total: total_field(&fields, currency),
            }
        } else {
            MutationOutcome::Rejected { message }
        })
    }

    /// Whether the server applied the mutation.
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }

    /// The server message, if one was sent.
    pub fn message(&self) -> Option<&str> {
        match self {
            MutationOutcome::Applied { message, .. } | MutationOutcome::Rejected { message } => {
                message.as_deref()
            }
        }
    }

    /// The server message, or `fallback` when none was sent.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message().unwrap_or(fallback)
    }

    /// The new cart total, if the server applied the mutation and sent one.
    pub fn total(&self) -> Option<Money> {
        match self {
            MutationOutcome::Applied { total, .. } => *total,
            MutationOutcome::Rejected { .. } => None,
        }
    }
}

fn message_field(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("message") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn total_field(fields: &Map<String, Value>, currency: Currency) -> Option<Money> {
    let amount = match fields.get("total")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Money::from_decimal(amount, currency)
}

/// Reply of the cart count endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CountReply {
    /// Number of line items in the cart.
    pub count: u64,
}

impl CountReply {
    /// Decode a response.
    pub fn from_response(response: &Response) -> Result<Self, FetchError> {
        response.json()
    }
}
