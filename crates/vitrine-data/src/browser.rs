//! Fetch API transport for the browser build.

use std::collections::HashMap;

use async_trait::async_trait;
use js_sys::{Promise, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestCredentials, RequestInit};

use crate::{FetchError, Request, Response, Transport};

/// Sends requests with `window.fetch`, same-origin credentials included so
/// the session cookie travels with every cart call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let window =
            web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;

        let headers = Headers::new().map_err(js_error)?;
        for (key, value) in request.headers() {
            headers.append(key, value).map_err(js_error)?;
        }

        let init = RequestInit::new();
        init.set_method(request.method().as_str());
        init.set_headers(&headers);
        init.set_credentials(RequestCredentials::SameOrigin);
        if let Some(body) = request.body_bytes() {
            init.set_body(&Uint8Array::from(body));
        }

        let js_request = web_sys::Request::new_with_str_and_init(request.url(), &init)
            .map_err(|e| FetchError::InvalidUrl(describe(&e)))?;

        let value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(js_error)?;
        let js_response: web_sys::Response = value.dyn_into().map_err(js_error)?;

        let mut response_headers = HashMap::new();
        if let Ok(Some(content_type)) = js_response.headers().get("content-type") {
            response_headers.insert("Content-Type".to_string(), content_type);
        }

        let buffer: Promise = js_response.array_buffer().map_err(js_error)?;
        let bytes = JsFuture::from(buffer).await.map_err(js_error)?;
        let body = Uint8Array::new(&bytes).to_vec();

        Ok(Response::new(js_response.status(), response_headers, body))
    }
}

fn js_error(value: JsValue) -> FetchError {
    FetchError::Network(describe(&value))
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
