use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::{ActionStatus, IdStrategy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TentaclesConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    #[serde(default)]
    pub middleware: MiddlewareConfig,

    /// Sinks registered in order, each with its own middleware chain.
    #[serde(default)]
    pub sinks: Vec<SinkSpec>,
}

impl TentaclesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lifecycle.suspend_trigger.trim().is_empty()
            || self.lifecycle.resume_trigger.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "lifecycle trigger names must not be empty".to_string(),
            ));
        }
        for (index, sink) in self.sinks.iter().enumerate() {
            if sink.kind == SinkKind::Jsonl
                && sink.path.as_deref().map(str::trim).unwrap_or("").is_empty()
            {
                return Err(ConfigError::Invalid(format!(
                    "sinks[{index}]: jsonl sink requires `path`"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "tentacles_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// `uuid` (default) or `sequential` (`da-1`, `vp-1`, ...).
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// When false, suspend/resume notifications are ignored.
    #[serde(default = "default_lifecycle_enabled")]
    pub enabled: bool,

    #[serde(default = "default_suspend_trigger")]
    pub suspend_trigger: String,

    #[serde(default = "default_resume_trigger")]
    pub resume_trigger: String,
}

fn default_lifecycle_enabled() -> bool {
    true
}

fn default_suspend_trigger() -> String {
    "suspend".to_string()
}

fn default_resume_trigger() -> String {
    "resume".to_string()
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            enabled: default_lifecycle_enabled(),
            suspend_trigger: default_suspend_trigger(),
            resume_trigger: default_resume_trigger(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Applied once to every event, before any sink chain.
    #[serde(default)]
    pub global: Vec<MiddlewareSpec>,
}

/// A built-in middleware, by name and parameters.
///
/// ```toml
/// [[middleware.global]]
/// kind = "skip_event_for_names"
/// names = ["promo"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MiddlewareSpec {
    LowercaseEventName,
    CamelCaseToSnakeCaseEventName,
    ReplaceSpaceWithUnderscore,
    CleanUpMultipleUnderscores,
    StandardizeForSnakeCase,
    CapitalisedAttributeKeys,
    SkipEventForNames {
        names: Vec<String>,
    },
    SkipEventForCategory {
        category: String,
    },
    CalculateDomainActivityDuration {
        from: ActionStatus,
        to: ActionStatus,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Emits each event through `tracing`.
    Log,
    /// One JSON object per line, to a file or `stdout:`.
    Jsonl,
    /// Keeps events in memory.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkSpec {
    pub kind: SinkKind,

    /// Display name; defaults to the kind.
    #[serde(default)]
    pub name: Option<String>,

    /// Output path for `jsonl`.
    #[serde(default)]
    pub path: Option<String>,

    /// Per-sink middleware chain.
    #[serde(default)]
    pub middleware: Vec<MiddlewareSpec>,
}
