//! Structured logging with component and interaction context.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::interaction::{now_ms, InteractionId};
use crate::sink::{ConsoleSink, LogSink};

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for log collection).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// Logging settings as they appear in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level that reaches the sink.
    pub level: LogLevel,
    /// Rendering of each entry.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Component that emitted the entry (e.g. `cart.add`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Handler invocation this entry belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Wall-clock time in milliseconds since the Unix epoch.
    pub timestamp_ms: f64,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}]", self.level);

        if let Some(component) = &self.component {
            s.push_str(&format!(" {}:", component));
        }
        s.push(' ');
        s.push_str(&self.message);

        if let Some(interaction) = &self.interaction {
            s.push_str(&format!(" ({})", interaction));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }
}

/// Structured logger with component and interaction context.
///
/// Cloning is cheap; clones share the sink. Each entry is rendered in the
/// configured format, handed to the sink, and mirrored as a `tracing` event.
#[derive(Clone)]
pub struct StructuredLogger {
    component: Option<String>,
    interaction: Option<InteractionId>,
    min_level: LogLevel,
    format: LogFormat,
    sink: Rc<dyn LogSink>,
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("component", &self.component)
            .field("interaction", &self.interaction)
            .field("min_level", &self.min_level)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new(Rc::new(ConsoleSink))
    }
}

impl StructuredLogger {
    /// Create a logger writing to `sink`.
    pub fn new(sink: Rc<dyn LogSink>) -> Self {
        Self {
            component: None,
            interaction: None,
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink,
        }
    }

    /// Create a logger from configuration.
    pub fn from_config(config: &LoggingConfig, sink: Rc<dyn LogSink>) -> Self {
        Self::new(sink)
            .with_min_level(config.level)
            .with_format(config.format)
    }

    /// Set the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Derive a logger for a fresh handler invocation.
    pub fn for_interaction(&self) -> Self {
        let mut logger = self.clone();
        logger.interaction = Some(InteractionId::next());
        logger
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Log at trace level.
    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message, BTreeMap::new());
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    /// Log at error level with fields.
    pub fn error_with(&self, message: &str, fields: &[(&str, &dyn fmt::Display)]) {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::json!(v.to_string())))
            .collect();
        self.log(LogLevel::Error, message, fields);
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            component: self.component.clone(),
            interaction: self.interaction.map(|id| id.to_string()),
            fields,
            timestamp_ms: now_ms(),
        };

        let rendered = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };

        forward_to_tracing(&entry);
        self.sink.write(&entry, &rendered);
    }

    /// The interaction this logger is bound to, if any.
    pub fn interaction(&self) -> Option<InteractionId> {
        self.interaction
    }
}

fn forward_to_tracing(entry: &LogEntry) {
    let component = entry.component.as_deref().unwrap_or("vitrine");
    match entry.level {
        LogLevel::Trace => tracing::trace!(component, "{}", entry.message),
        LogLevel::Debug => tracing::debug!(component, "{}", entry.message),
        LogLevel::Info => tracing::info!(component, "{}", entry.message),
        LogLevel::Warn => tracing::warn!(component, "{}", entry.message),
        LogLevel::Error => tracing::error!(component, "{}", entry.message),
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a boolean field.
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    /// Start building a warn log entry.
    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }

    /// Start building an error log entry.
    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Error, message)
    }

    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }
}
