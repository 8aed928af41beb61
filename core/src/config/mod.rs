mod load;
mod types;

pub use load::{apply_overrides, load_default, load_from_path, load_from_str, DEFAULT_CONFIG_FILE};
pub use types::{
    LifecycleConfig, LoggingConfig, MiddlewareConfig, MiddlewareSpec, SessionConfig, SinkKind,
    SinkSpec, TentaclesConfig,
};
