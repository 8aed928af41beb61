//! Stable re-exports for consumers (`plugins` and external crates).
//!
//! Prefer importing from `tentacles_core::api` instead of reaching into internal modules.

pub use crate::activity::{Action, Activity, DomainActivity, RawAction, ValueProposition};
pub use crate::attributes::{
    serialize_attributes, AttributeMap, AttributeValue, EmptyAttributes, KeyAttributes,
    KeyValueAttribute,
};
pub use crate::config::{
    load_default, load_from_path, load_from_str, LifecycleConfig, LoggingConfig, MiddlewareSpec,
    SinkKind, SinkSpec, TentaclesConfig,
};
pub use crate::error::{ConfigError, TentaclesError};
pub use crate::event::{
    AnalyticsEvent, EventCategory, EventTrigger, RawEvent, TentaclesEventCategory,
    TentaclesEventTrigger,
};
pub use crate::middleware::{builtin, Middleware, MiddlewareAction};
pub use crate::reporting::{AnalyticsSink, DeliveryReport, ErrorReporter};
pub use crate::state::{
    ActionStatus, Clock, IdStrategy, ManualClock, Session, SessionStatus, SystemClock,
};
pub use crate::tentacles::{LifecycleReport, Tentacles, TentaclesOptions, TrackReport};
