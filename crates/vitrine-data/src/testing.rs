//! Scripted transport for tests.
//!
//! Replies are queued per `(method, path)` and consumed in order, so a test
//! can script "first call succeeds, second call fails" for the same endpoint.
//! `defer` hands back a [`DeferredReply`] that settles a pending request from
//! the outside, which is how in-flight state is observed.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use crate::{FetchError, Method, Request, Response, Transport};

enum Scripted {
    Ready(Result<Response, FetchError>),
    Pending(oneshot::Receiver<Result<Response, FetchError>>),
}

struct Route {
    method: Method,
    path: String,
    reply: Scripted,
}

/// In-memory `Transport` driven by scripted replies.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<VecDeque<Route>>,
    sent: RefCell<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply.
    pub fn reply_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, Scripted::Ready(Ok(Response::json_body(status, &body))));
    }

    /// Queue a raw text reply, e.g. an HTML redirect page.
    pub fn reply_text(&self, method: Method, path: &str, status: u16, body: &str) {
        let response = Response::new(status, Default::default(), body.as_bytes().to_vec());
        self.push(method, path, Scripted::Ready(Ok(response)));
    }

    /// Queue a transport failure.
    pub fn fail(&self, method: Method, path: &str, error: FetchError) {
        self.push(method, path, Scripted::Ready(Err(error)));
    }

    /// Queue a reply that stays pending until the returned handle settles it.
    pub fn defer(&self, method: Method, path: &str) -> DeferredReply {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Scripted::Pending(rx));
        DeferredReply { tx }
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.sent.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.sent.borrow().len()
    }

    /// Requests sent to `path`.
    pub fn requests_to(&self, path: &str) -> Vec<Request> {
        self.sent
            .borrow()
            .iter()
            .filter(|r| r.path() == path)
            .cloned()
            .collect()
    }

    fn push(&self, method: Method, path: &str, reply: Scripted) {
        self.routes.borrow_mut().push_back(Route {
            method,
            path: path.to_string(),
            reply,
        });
    }

    fn take(&self, request: &Request) -> Option<Scripted> {
        let mut routes = self.routes.borrow_mut();
        let index = routes
            .iter()
            .position(|r| r.method == request.method() && r.path == request.path())?;
        routes.remove(index).map(|r| r.reply)
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        self.sent.borrow_mut().push(request.clone());

        match self.take(&request) {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Pending(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("deferred reply dropped".to_string()))),
            None => Err(FetchError::Network(format!(
                "no scripted reply for {} {}",
                request.method().as_str(),
                request.path()
            ))),
        }
    }
}

/// Settles a request queued with [`MockTransport::defer`].
pub struct DeferredReply {
    tx: oneshot::Sender<Result<Response, FetchError>>,
}

impl DeferredReply {
    /// Complete with a JSON body.
    pub fn json(self, status: u16, body: Value) {
        let _ = self.tx.send(Ok(Response::json_body(status, &body)));
    }

    /// Complete with a transport failure.
    pub fn fail(self, error: FetchError) {
        let _ = self.tx.send(Err(error));
    }
}
