//! Client for the storefront's cart endpoints.

use std::collections::BTreeMap;

use serde::Serialize;
use vitrine_core::{CartItemId, Currency, EndpointConfig, ProductId, Quantity, StorefrontConfig};

use crate::envelope::{CountReply, MutationOutcome};
use crate::{FetchError, Request, Transport};

#[derive(Serialize)]
struct QuantityBody {
    quantidade: u64,
}

/// Cart API client.
///
/// Each call maps to one endpoint of the server contract. Application-level
/// refusals come back as `Ok(MutationOutcome::Rejected)`; only transport
/// failures are `Err`.
pub struct CartApi<T> {
    transport: T,
    endpoints: EndpointConfig,
    currency: Currency,
    default_headers: BTreeMap<String, String>,
}

impl<T: Transport> CartApi<T> {
    /// Create a client over `transport`.
    pub fn new(transport: T, endpoints: EndpointConfig, currency: Currency) -> Self {
        Self {
            transport,
            endpoints,
            currency,
            default_headers: BTreeMap::new(),
        }
    }

    /// Create a client from the storefront configuration.
    pub fn from_config(transport: T, config: &StorefrontConfig) -> Self {
        Self::new(transport, config.endpoints.clone(), config.currency)
    }

    /// Add a header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// POST `quantidade=N` (form-encoded) to the add-item endpoint.
    pub async fn add_item(
        &self,
        product: &ProductId,
        quantity: Quantity,
    ) -> Result<MutationOutcome, FetchError> {
        let quantity = quantity.to_string();
        let request = self
            .request_post(&self.endpoints.add_item_path(product))
            .form(&[("quantidade", quantity.as_str())]);
        self.mutate(request).await
    }

    /// POST `{"quantidade": N}` to the update endpoint.
    pub async fn update_quantity(
        &self,
        item: &CartItemId,
        quantity: Quantity,
    ) -> Result<MutationOutcome, FetchError> {
        let request = self
            .request_post(&self.endpoints.update_item_path(item))
            .json(&QuantityBody {
                quantidade: quantity.get(),
            })?;
        self.mutate(request).await
    }

    /// POST with no body to the remove endpoint.
    pub async fn remove_item(&self, item: &CartItemId) -> Result<MutationOutcome, FetchError> {
        let request = self.request_post(&self.endpoints.remove_item_path(item));
        self.mutate(request).await
    }

    /// GET the number of line items in the cart.
    pub async fn count(&self) -> Result<u64, FetchError> {
        let request = self.request(Request::get(self.url(&self.endpoints.cart_count)));
        let response = self.transport.send(request).await?;
        Ok(CountReply::from_response(&response)?.count)
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Currency totals are decoded in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    async fn mutate(&self, request: Request) -> Result<MutationOutcome, FetchError> {
        let response = self.transport.send(request).await?;
        MutationOutcome::from_response(&response, self.currency)
    }

    fn request_post(&self, path: &str) -> Request {
        self.request(Request::post(self.url(path)))
    }

    fn request(&self, request: Request) -> Request {
        self.default_headers
            .iter()
            .fold(request.accept("application/json"), |req, (k, v)| {
                req.header(k.clone(), v.clone())
            })
    }

    fn url(&self, path: &str) -> String {
        match &self.endpoints.base_url {
            Some(base) if !(path.starts_with("http://") || path.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), path)
            }
            _ => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use crate::Method;
    use futures::executor::block_on;
    use serde_json::json;
    use vitrine_core::Money;

    fn api() -> CartApi<MockTransport> {
        CartApi::new(MockTransport::new(), EndpointConfig::default(), Currency::BRL)
    }

    #[test]
    fn test_add_item_posts_form() {
        let api = api();
        api.transport().reply_json(
            Method::Post,
            "/adicionar-carrinho/42",
            200,
            json!({"success": true, "message": "Added"}),
        );

        let outcome = block_on(api.add_item(&ProductId::new("42"), Quantity::new(2).unwrap()))
            .unwrap();
        assert_eq!(outcome.message(), Some("Added"));

        let sent = api.transport().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method(), Method::Post);
        assert_eq!(sent[0].url(), "/adicionar-carrinho/42");
        assert_eq!(sent[0].body_text().as_deref(), Some("quantidade=2"));
        assert_eq!(sent[0].header_value("Accept"), Some("application/json"));
    }

    #[test]
    fn test_update_quantity_posts_json() {
        let api = api();
        api.transport().reply_json(
            Method::Post,
            "/atualizar-carrinho/7",
            200,
            json!({"success": true, "message": "", "total": 59.8}),
        );

        let outcome =
            block_on(api.update_quantity(&CartItemId::new("7"), Quantity::new(3).unwrap()))
                .unwrap();
        assert_eq!(outcome.total(), Some(Money::new(5980, Currency::BRL)));

        let sent = &api.transport().requests()[0];
        assert_eq!(sent.body_text().as_deref(), Some(r#"{"quantidade":3}"#));
        assert_eq!(sent.header_value("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_remove_item_has_no_body() {
        let api = api();
        api.transport().reply_json(
            Method::Post,
            "/remover-carrinho/7",
            404,
            json!({"success": false, "message": "Item not found"}),
        );

        let outcome = block_on(api.remove_item(&CartItemId::new("7"))).unwrap();
        assert_eq!(
            outcome,
            MutationOutcome::Rejected {
                message: Some("Item not found".to_string())
            }
        );
        assert_eq!(api.transport().requests()[0].body_bytes(), None);
    }

    #[test]
    fn test_count() {
        let api = api();
        api.transport()
            .reply_json(Method::Get, "/api/carrinho/count", 200, json!({"count": 3}));
        assert_eq!(block_on(api.count()).unwrap(), 3);
    }

    #[test]
    fn test_html_reply_is_transport_failure() {
        let api = api();
        api.transport().reply_text(
            Method::Post,
            "/remover-carrinho/7",
            302,
            "<html>Redirecting</html>",
        );
        let result = block_on(api.remove_item(&CartItemId::new("7")));
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_network_failure_propagates() {
        let api = api();
        api.transport().fail(
            Method::Get,
            "/api/carrinho/count",
            FetchError::Network("offline".to_string()),
        );
        assert_eq!(
            block_on(api.count()),
            Err(FetchError::Network("offline".to_string()))
        );
    }

    #[test]
    fn test_base_url_and_default_headers() {
        let endpoints = EndpointConfig {
            base_url: Some("http://localhost:5000/".to_string()),
            ..EndpointConfig::default()
        };
        let api = CartApi::new(MockTransport::new(), endpoints, Currency::BRL)
            .with_default_header("Cookie", "session=abc");
        api.transport()
            .reply_json(Method::Get, "/api/carrinho/count", 200, json!({"count": 0}));

        block_on(api.count()).unwrap();

        let sent = &api.transport().requests()[0];
        assert_eq!(sent.url(), "http://localhost:5000/api/carrinho/count");
        assert_eq!(sent.header_value("Cookie"), Some("session=abc"));
    }
}
