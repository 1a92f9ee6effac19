//! Core types for the vitrine storefront.
//!
//! This crate provides the fundamental types shared by the data layer, the
//! browser runtime and the CLI:
//! - `ProductId` / `CartItemId` - Newtype identifiers from the DOM contract
//! - `Money` / `Currency` - Cents-based totals with storefront formatting
//! - `Quantity` - Stepper arithmetic with a floor of one
//! - `StorefrontConfig` - Endpoints, selectors, timings and texts
//! - `EventBus` - In-page publish/subscribe for `StorefrontEvent`s

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod money;
pub mod quantity;

pub use config::*;
pub use error::ConfigError;
pub use events::{EventBus, StorefrontEvent};
pub use ids::{CartItemId, ProductId};
pub use money::{Currency, Money};
pub use quantity::{parse_lenient, Quantity, Step};
