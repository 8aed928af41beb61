use std::path::Path;

use super::types::TentaclesConfig;
use crate::error::ConfigError;
use crate::state::IdStrategy;

pub const DEFAULT_CONFIG_FILE: &str = "tentacles.toml";

pub fn load_from_str(s: &str) -> Result<TentaclesConfig, ConfigError> {
    let cfg = toml::from_str::<TentaclesConfig>(s)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<TentaclesConfig, ConfigError> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&s)
}

/// `./tentacles.toml` if present, otherwise defaults; environment overrides
/// applied on top.
pub fn load_default() -> Result<TentaclesConfig, ConfigError> {
    let local_config = Path::new(DEFAULT_CONFIG_FILE);

    let mut cfg = if local_config.exists() {
        load_from_path(local_config)?
    } else {
        TentaclesConfig::default()
    };

    apply_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

/// Environment variable overrides (highest priority):
/// - `TENTACLES_LOG_LEVEL`: logging level filter
/// - `TENTACLES_SESSION_IDS`: `uuid` or `sequential`
pub fn apply_overrides(
    cfg: &mut TentaclesConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(v) = lookup("TENTACLES_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v.trim().to_string();
        }
    }

    if let Some(v) = lookup("TENTACLES_SESSION_IDS") {
        cfg.session.id_strategy = match v.trim().to_ascii_lowercase().as_str() {
            "" => cfg.session.id_strategy,
            "uuid" => IdStrategy::Uuid,
            "sequential" => IdStrategy::Sequential,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "TENTACLES_SESSION_IDS: unknown id strategy `{other}`"
                )))
            }
        };
    }

    Ok(())
}
