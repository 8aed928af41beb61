//! # 中间件
//!
//! Named stages that transform a [`RawEvent`] or drop it before delivery.
//! Stages are composed in two tiers by [`pipeline`]: a global tier applied
//! once per event, then one tier per sink.

pub mod builtin;
pub mod pipeline;

pub use pipeline::{apply_chain, ChainOutcome};

use std::fmt;
use std::sync::Arc;

use crate::event::RawEvent;

/// Result of a single stage.
#[derive(Debug, Clone, PartialEq)]
pub enum MiddlewareAction {
    /// Continue with this (possibly rewritten) event.
    Forward(RawEvent),
    /// Stop; the event is not delivered on this path.
    Skip,
}

type Stage = dyn Fn(RawEvent) -> anyhow::Result<MiddlewareAction> + Send + Sync;

/// 命名的事件处理阶段
#[derive(Clone)]
pub struct Middleware {
    name: String,
    stage: Arc<Stage>,
}

impl Middleware {
    /// A stage that cannot fail.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(RawEvent) -> MiddlewareAction + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            stage: Arc::new(move |event| Ok(f(event))),
        }
    }

    /// A stage that may fail. A failure drops the event on the current path
    /// and is reported as [`crate::TentaclesError::Middleware`].
    pub fn fallible<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(RawEvent) -> anyhow::Result<MiddlewareAction> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            stage: Arc::new(f),
        }
    }

    /// Rewrites the event name and always forwards.
    pub fn map_name<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(name, move |mut event| {
            event.name = f(&event.name);
            MiddlewareAction::Forward(event)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, event: RawEvent) -> anyhow::Result<MiddlewareAction> {
        (self.stage)(event)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").field("name", &self.name).finish()
    }
}
