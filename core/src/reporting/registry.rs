//! 注册表

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{AnalyticsSink, ErrorReporter};
use crate::middleware::Middleware;

/// A registered sink and its own middleware chain.
pub struct SinkEntry {
    pub sink: Arc<dyn AnalyticsSink>,
    pub middlewares: Vec<Middleware>,
}

/// Immutable view of everything registered at one point in time.
#[derive(Default)]
pub struct RegistrySnapshot {
    pub global: Vec<Middleware>,
    pub sinks: Vec<Arc<SinkEntry>>,
    pub error_reporters: Vec<Arc<dyn ErrorReporter>>,
}

impl RegistrySnapshot {
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.iter().map(|e| e.sink.name().to_string()).collect()
    }
}

/// Sinks, global middleware and error reporters.
///
/// Copy-on-write: every change publishes a new [`RegistrySnapshot`], and
/// readers hold on to the snapshot they took. Delivering to a snapshot never
/// blocks registration.
#[derive(Default)]
pub struct Registry {
    current: Mutex<Arc<RegistrySnapshot>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.lock().clone()
    }

    pub fn add_sink(&self, sink: Arc<dyn AnalyticsSink>, middlewares: Vec<Middleware>) {
        self.update(|next| next.sinks.push(Arc::new(SinkEntry { sink, middlewares })));
    }

    pub fn add_global_middleware(&self, middleware: Middleware) {
        self.update(|next| next.global.push(middleware));
    }

    pub fn add_error_reporter(&self, reporter: Arc<dyn ErrorReporter>) {
        self.update(|next| next.error_reporters.push(reporter));
    }

    pub fn clear(&self) {
        *self.lock() = Arc::new(RegistrySnapshot::default());
    }

    fn update(&self, f: impl FnOnce(&mut RegistrySnapshot)) {
        let mut current = self.lock();
        let mut next = RegistrySnapshot {
            global: current.global.clone(),
            sinks: current.sinks.clone(),
            error_reporters: current.error_reporters.clone(),
        };
        f(&mut next);
        *current = Arc::new(next);
    }

    fn lock(&self) -> MutexGuard<'_, Arc<RegistrySnapshot>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
