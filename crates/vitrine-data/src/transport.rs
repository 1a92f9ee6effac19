//! The seam between the cart client and the network.

use std::rc::Rc;

use async_trait::async_trait;

use crate::{FetchError, Request, Response};

/// Sends one request and returns the raw response.
///
/// Futures are not `Send`: in the browser everything runs on the page's
/// event loop, and the native CLI drives a single request at a time.
#[async_trait(?Send)]
pub trait Transport {
    /// Send `request`. Only failures to obtain a response are errors; any
    /// HTTP status is returned as a `Response`.
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}
