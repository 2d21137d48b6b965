//! Classification of endpoint responses into success or failure.
//!
//! A response is a success only when all of these hold:
//!
//! 1. the HTTP status is 2xx,
//! 2. the body was decoded as JSON (`Content-Type` starts with `application/json`),
//! 3. the body has no truthy `errors` field,
//! 4. the body has a truthy `data` field.
//!
//! Anything else is a failure, including `200 OK` with an `errors` array or
//! with `data: null`.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::clients::graphql::types::{is_truthy, GraphqlResponse, GraphqlResponseError, RawResult};
use crate::clients::HttpResponse;

/// The two ways a received response can be read.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Clean success with usable data.
    Success(RawResult),
    /// Non-2xx status, structured errors, or no usable data.
    Failure(GraphqlResponse),
}

/// Interprets a response received from the transport.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if the response claims a JSON content type
/// but its body is not valid JSON.
pub fn interpret(response: HttpResponse) -> Result<Outcome, serde_json::Error> {
    let is_ok = response.is_ok();
    let decoded = if response.is_json() {
        Some(response.json()?)
    } else {
        None
    };

    let HttpResponse {
        status,
        headers,
        body,
    } = response;

    let outcome = match decoded {
        Some(Value::Object(fields)) if is_ok && is_clean_success(&fields) => {
            Outcome::Success(success(fields, status, headers))
        }
        Some(Value::Object(fields)) => Outcome::Failure(structured_failure(fields, status, headers)),
        Some(Value::String(text)) => Outcome::Failure(text_failure(text, status, headers)),
        Some(_) | None => Outcome::Failure(text_failure(body, status, headers)),
    };

    Ok(outcome)
}

fn is_clean_success(fields: &Map<String, Value>) -> bool {
    !fields.get("errors").is_some_and(is_truthy) && fields.get("data").is_some_and(is_truthy)
}

fn success(
    mut fields: Map<String, Value>,
    status: u16,
    headers: HashMap<String, Vec<String>>,
) -> RawResult {
    let data = fields.remove("data").unwrap_or_default();
    let extensions = fields.remove("extensions");
    // Only a falsy `errors` can reach this point
    fields.remove("errors");
    fields.remove("status");
    fields.remove("headers");

    RawResult {
        data,
        extensions,
        errors: None,
        headers,
        status,
        other: fields,
    }
}

fn structured_failure(
    mut fields: Map<String, Value>,
    status: u16,
    headers: HashMap<String, Vec<String>>,
) -> GraphqlResponse {
    let data = fields.remove("data");
    let extensions = fields.remove("extensions");

    let errors = match fields.remove("errors") {
        Some(raw @ Value::Array(_)) => {
            match serde_json::from_value::<Vec<GraphqlResponseError>>(raw.clone()) {
                Ok(errors) => Some(errors),
                Err(_) => {
                    fields.insert("errors".to_string(), raw);
                    None
                }
            }
        }
        Some(Value::Null) | None => None,
        Some(raw) => {
            fields.insert("errors".to_string(), raw);
            None
        }
    };

    let error = match fields.remove("error") {
        Some(Value::String(text)) => Some(text),
        Some(Value::Null) | None => None,
        Some(raw) => {
            fields.insert("error".to_string(), raw);
            None
        }
    };

    // The HTTP response is authoritative for these
    fields.remove("status");
    fields.remove("headers");

    GraphqlResponse {
        data,
        errors,
        extensions,
        error,
        status,
        headers,
        other: fields,
    }
}

fn text_failure(text: String, status: u16, headers: HashMap<String, Vec<String>>) -> GraphqlResponse {
    GraphqlResponse {
        error: Some(text),
        status,
        headers,
        ..GraphqlResponse::default()
    }
}
