//! Destinations for rendered log entries.

use std::cell::RefCell;

use crate::logging::{LogEntry, LogLevel};

/// Receives every entry that passed the level filter.
pub trait LogSink {
    /// Write one entry. `rendered` is the entry in the logger's format.
    fn write(&self, entry: &LogEntry, rendered: &str);
}

/// Browser console in WebAssembly, stderr everywhere else.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    #[cfg(target_arch = "wasm32")]
    fn write(&self, entry: &LogEntry, rendered: &str) {
        let value = wasm_bindgen::JsValue::from_str(rendered);
        match entry.level {
            LogLevel::Error => web_sys::console::error_1(&value),
            LogLevel::Warn => web_sys::console::warn_1(&value),
            LogLevel::Info => web_sys::console::info_1(&value),
            LogLevel::Debug | LogLevel::Trace => web_sys::console::debug_1(&value),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write(&self, _entry: &LogEntry, rendered: &str) {
        // stdout belongs to command output
        eprintln!("{}", rendered);
    }
}

/// Keeps entries in memory. Used by tests and by hosts that ship logs elsewhere.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<(LogEntry, String)>>,
}

impl MemorySink {
    /// All recorded entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().iter().map(|(e, _)| e.clone()).collect()
    }

    /// Rendered lines, oldest first.
    pub fn rendered(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|(_, r)| r.clone()).collect()
    }

    /// Messages only, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(e, _)| e.message.clone())
            .collect()
    }

    /// Number of entries at exactly `level`.
    pub fn count_at(&self, level: LogLevel) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(e, _)| e.level == level)
            .count()
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, rendered: &str) {
        self.entries
            .borrow_mut()
            .push((entry.clone(), rendered.to_string()));
    }
}
