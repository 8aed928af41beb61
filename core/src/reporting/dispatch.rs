//! 事件分发：全局中间件 -> 每个 sink 的中间件 -> sink

use super::RegistrySnapshot;
use crate::error::TentaclesError;
use crate::event::RawEvent;
use crate::middleware::{apply_chain, ChainOutcome};

/// One event handed to one sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub sink: String,
    pub event: RawEvent,
}

/// What happened to one event on its way to the sinks.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeliveryReport {
    pub delivered: Vec<Delivery>,
    /// Sinks whose own chain skipped the event.
    pub skipped: Vec<String>,
    /// Global middleware that skipped the event before any sink saw it.
    pub global_skip: Option<String>,
    /// Middleware failures; each also went to the error reporters.
    pub failures: Vec<TentaclesError>,
}

impl DeliveryReport {
    pub fn delivered_to(&self, sink: &str) -> Option<&RawEvent> {
        self.delivered
            .iter()
            .find(|d| d.sink == sink)
            .map(|d| &d.event)
    }
}

/// Runs the global tier once, then each sink's tier on its own copy, and
/// reports survivors. A skip or failure on one sink never affects another.
pub fn dispatch(registry: &RegistrySnapshot, event: RawEvent) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    let event = match apply_chain(&registry.global, event) {
        ChainOutcome::Forwarded(event) => event,
        ChainOutcome::Skipped { by } => {
            tracing::debug!(middleware = %by, "event skipped by global middleware");
            report.global_skip = Some(by);
            return report;
        }
        ChainOutcome::Failed { by, error } => {
            report.failures.push(middleware_failure(registry, by, error, None));
            return report;
        }
    };

    for entry in &registry.sinks {
        let sink = entry.sink.name();
        match apply_chain(&entry.middlewares, event.clone()) {
            ChainOutcome::Forwarded(out) => {
                entry.sink.report(&out);
                report.delivered.push(Delivery {
                    sink: sink.to_string(),
                    event: out,
                });
            }
            ChainOutcome::Skipped { by } => {
                tracing::debug!(sink = %sink, middleware = %by, "event skipped for sink");
                report.skipped.push(sink.to_string());
            }
            ChainOutcome::Failed { by, error } => {
                report
                    .failures
                    .push(middleware_failure(registry, by, error, Some(sink)));
            }
        }
    }

    report
}

/// Forwards an error to every registered reporter.
pub fn report_error(registry: &RegistrySnapshot, error: &(dyn std::error::Error + 'static)) {
    for reporter in &registry.error_reporters {
        reporter.report_error(error);
    }
}

fn middleware_failure(
    registry: &RegistrySnapshot,
    middleware: String,
    error: anyhow::Error,
    sink: Option<&str>,
) -> TentaclesError {
    tracing::warn!(
        middleware = %middleware,
        sink = sink.unwrap_or("*"),
        error = %error,
        "middleware failed, event dropped"
    );
    let err = TentaclesError::Middleware {
        middleware,
        reason: format!("{error:#}"),
    };
    report_error(registry, &err);
    err
}
