//! Vitrine storefront interactivity.
//!
//! Wires the server-rendered storefront pages:
//! - product gallery thumbnails
//! - quantity steppers
//! - add to cart, cart quantity update and item removal
//! - cart count badge and icon pulse
//! - the shared toast
//! - confirmation links and form validation
//!
//! In the browser the module starts itself (see `entry`). Elsewhere, build a
//! [`Storefront`] over a [`MemoryDocument`] and the headless platform.

mod app;
mod cart;
pub mod dom;
mod gallery;
mod guards;
pub mod platform;
mod runtime;
mod stepper;
mod toast;

#[cfg(target_arch = "wasm32")]
mod entry;

pub use app::{Bindings, Storefront, StorefrontBuilder};
pub use cart::MutationStatus;
pub use dom::{Document, Element, MemoryDocument, MemoryElement};
pub use platform::Platform;
pub use toast::Severity;
