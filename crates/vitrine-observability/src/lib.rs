//! Structured diagnostics for the vitrine storefront runtime.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with component and interaction context
//! - `LogSink` - Where rendered entries go (browser console, stderr, memory)
//! - `InteractionId` - Correlates the log lines of one handler invocation
//! - `LoggingConfig` - Level and format settings, deserializable from config files

mod interaction;
mod logging;
mod sink;

pub use interaction::*;
pub use logging::*;
pub use sink::*;
