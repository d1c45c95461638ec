use serde::{Deserialize, Serialize};

/// Settings for a [`ThreadDispatcher`](super::ThreadDispatcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Name of the dispatcher thread.
    pub thread_name: String,
    /// Run batches still queued when the dispatcher is stopped.
    pub drain_on_stop: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            thread_name: "bus-dispatcher".to_string(),
            drain_on_stop: true,
        }
    }
}

impl DispatcherConfig {
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_drain_on_stop(mut self, drain: bool) -> Self {
        self.drain_on_stop = drain;
        self
    }
}
