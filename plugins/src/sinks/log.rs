use tentacles_core::api::{AnalyticsSink, RawEvent};

/// Emits every event as an `info` record on the `tentacles.events` target.
pub struct LogSink {
    name: String,
}

impl LogSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new("log")
    }
}

impl AnalyticsSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn report(&self, event: &RawEvent) {
        let attributes = serde_json::to_string(&event.attributes).unwrap_or_default();
        tracing::info!(
            target: "tentacles.events",
            sink = %self.name,
            event = %event.name,
            attributes = %attributes,
            "analytics event"
        );
    }
}
