//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response carrying a JSON document.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Parse the response body as JSON, whatever the status.
    ///
    /// The cart endpoints answer refusals with 4xx/5xx and a JSON envelope,
    /// so the status alone says nothing about whether the body is usable.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            FetchError::Parse(format!("HTTP {} with non-JSON body: {}", self.status, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_json_ignores_status() {
        let resp = make_response(404, br#"{"success": false}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["success"], false);
    }

    #[test]
    fn test_response_json_invalid() {
        let resp = make_response(200, b"<!doctype html>");
        let result: Result<serde_json::Value, _> = resp.json();
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }
}
