//! Cart API client and HTTP transports for the vitrine storefront.
//!
//! `CartApi` knows the four cart endpoints and how to decode their JSON
//! replies; a `Transport` knows how to move bytes. The browser build sends
//! through the Fetch API, native hosts through `reqwest` (feature `native`),
//! and tests through a scripted `MockTransport` (feature `testing`).
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_core::{ProductId, Quantity, StorefrontConfig};
//! use vitrine_data::{BrowserTransport, CartApi, MutationOutcome};
//!
//! let config = StorefrontConfig::default();
//! let api = CartApi::from_config(BrowserTransport, &config);
//!
//! match api.add_item(&ProductId::new("42"), Quantity::ONE).await? {
//!     MutationOutcome::Applied { message, .. } => show_success(message),
//!     MutationOutcome::Rejected { message } => show_danger(message),
//! }
//! ```

mod api;
mod envelope;
mod error;
mod request;
mod response;
mod transport;

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
mod native;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::CartApi;
pub use envelope::{CountReply, MutationOutcome};
pub use error::FetchError;
pub use request::{Method, Request};
pub use response::Response;
pub use transport::Transport;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserTransport;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use native::ReqwestTransport;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartApi, FetchError, Method, MutationOutcome, Request, Response, Transport};
}
