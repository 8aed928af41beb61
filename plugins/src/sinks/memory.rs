use std::sync::{Mutex, MutexGuard, PoisonError};

use tentacles_core::api::{AnalyticsSink, RawEvent};

/// Keeps every delivered event in memory. Handy in tests and for
/// inspecting what a pipeline produced.
pub struct MemorySink {
    name: String,
    events: Mutex<Vec<RawEvent>>,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<RawEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns and forgets everything captured so far.
    pub fn take(&self) -> Vec<RawEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RawEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl AnalyticsSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn report(&self, event: &RawEvent) {
        self.lock().push(event.clone());
    }
}
