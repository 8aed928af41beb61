//! # 上报
//!
//! Sink and error-reporter seams plus the registry that holds them. Concrete
//! sinks live in `tentacles-plugins`.

pub mod dispatch;
pub mod registry;

pub use dispatch::{dispatch, report_error, Delivery, DeliveryReport};
pub use registry::{Registry, RegistrySnapshot, SinkEntry};

use crate::event::RawEvent;

/// Receives events that survived the middleware pipeline.
pub trait AnalyticsSink: Send + Sync {
    /// Name used in logs and delivery reports.
    fn name(&self) -> &str;

    /// Called once when the sink is registered.
    fn setup(&self) {}

    fn report(&self, event: &RawEvent);
}

/// Receives non-fatal errors: rejected actions, failed middleware, and
/// anything the application forwards with `track_error`.
pub trait ErrorReporter: Send + Sync {
    fn report_error(&self, error: &(dyn std::error::Error + 'static));
}
