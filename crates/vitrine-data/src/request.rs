//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::BTreeMap;

/// HTTP methods used by the cart endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// An outbound request, built fluently and handed to a `Transport`.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    url: String,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl Request {
    /// Create a new request.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Set the request body as `application/x-www-form-urlencoded` pairs.
    pub fn form(mut self, pairs: &[(&str, &str)]) -> Self {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        self.body = Some(encoded.into_bytes());
        self
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Full URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Path component of the URL (everything after scheme and authority).
    pub fn path(&self) -> &str {
        match self.url.find("://") {
            Some(scheme_end) => {
                let rest = &self.url[scheme_end + 3..];
                rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
            }
            None => &self.url,
        }
    }

    /// Headers, sorted by name.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Header value by exact name.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Body bytes, if any.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Body as UTF-8 text, if any.
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body() {
        let req = Request::post("/adicionar-carrinho/42").form(&[("quantidade", "2")]);
        assert_eq!(req.body_text().as_deref(), Some("quantidade=2"));
        assert_eq!(
            req.header_value("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn test_form_body_is_encoded() {
        let req = Request::post("/x").form(&[("nota", "a b&c")]);
        assert_eq!(req.body_text().as_deref(), Some("nota=a+b%26c"));
    }

    #[test]
    fn test_json_body() {
        let req = Request::post("/atualizar-carrinho/7")
            .json(&serde_json::json!({"quantidade": 3}))
            .unwrap();
        assert_eq!(req.body_text().as_deref(), Some(r#"{"quantidade":3}"#));
        assert_eq!(req.header_value("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_path_of_absolute_url() {
        let req = Request::get("http://localhost:5000/api/carrinho/count");
        assert_eq!(req.path(), "/api/carrinho/count");

        let req = Request::get("https://loja.example");
        assert_eq!(req.path(), "/");
    }

    #[test]
    fn test_path_of_relative_url() {
        let req = Request::get("/api/carrinho/count");
        assert_eq!(req.path(), "/api/carrinho/count");
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
    }
}
