use thiserror::Error;

use crate::state::{ActionStatus, SessionStatus, TransitionError};

/// Errors surfaced by a single `track` call, a lifecycle reconciliation or a
/// pipeline stage. None of them leaves the session table partially mutated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TentaclesError {
    #[error("initial action for `{activity}` must be open, got {action}")]
    InitialActionNotOpen {
        activity: String,
        action: ActionStatus,
    },
    #[error("prohibited transition for `{activity}` from {from} via {action}")]
    ProhibitedTransition {
        activity: String,
        from: SessionStatus,
        action: ActionStatus,
    },
    #[error("failed to serialize {scope} attributes: {reason}")]
    AttributeSerialization { scope: &'static str, reason: String },
    #[error("middleware `{middleware}` failed: {reason}")]
    Middleware { middleware: String, reason: String },
    #[error("attribute `{key}` is missing")]
    MissingAttribute { key: String },
    #[error("attribute `{key}` has unexpected type: {reason}")]
    AttributeType { key: String, reason: String },
}

impl TentaclesError {
    pub fn prohibited(activity: impl Into<String>, err: TransitionError) -> Self {
        Self::ProhibitedTransition {
            activity: activity.into(),
            from: err.from_status(),
            action: err.action(),
        }
    }

    /// Short machine-readable label, used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InitialActionNotOpen { .. } => "initial_action_not_open",
            Self::ProhibitedTransition { .. } => "prohibited_transition",
            Self::AttributeSerialization { .. } => "attribute_serialization",
            Self::Middleware { .. } => "middleware",
            Self::MissingAttribute { .. } => "missing_attribute",
            Self::AttributeType { .. } => "attribute_type",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io error: {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
