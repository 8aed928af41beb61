//! 会话 ID 生成

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Produces opaque session identities.
pub trait SessionIdGenerator: Send + Sync {
    fn next_id(&self) -> String;

    /// Forget any counter state. Called from `reset()`.
    fn reset(&self) {}
}

/// Random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl SessionIdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `{prefix}-{n}` with a per-generator counter starting at 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl SessionIdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }

    fn reset(&self) {
        self.counter.store(0, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

impl IdStrategy {
    pub fn build(self, prefix: &str) -> Box<dyn SessionIdGenerator> {
        match self {
            IdStrategy::Uuid => Box::new(UuidIdGenerator),
            IdStrategy::Sequential => Box::new(SequentialIdGenerator::new(prefix)),
        }
    }
}
