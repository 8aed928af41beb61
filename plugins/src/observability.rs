//! tracing 初始化：控制台 + 可选文件输出

use std::sync::OnceLock;

use tentacles_core::api::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Installs the global subscriber described by `logging`. `RUST_LOG`, when
/// set, replaces the configured level.
pub fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&logging.level)
            .map_err(|e| anyhow::anyhow!("invalid log level `{}`: {e}", logging.level))?,
    };

    let mut maybe_writer = None;

    if logging.file {
        if LOG_GUARD.get().is_some() {
            anyhow::bail!("file logging already initialised");
        }
        let dir = log_directory(logging);
        std::fs::create_dir_all(&dir)
            .map_err(|e| anyhow::anyhow!("create log dir failed: {e}"))?;
        let file_name = format!("tentacles.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        LOG_GUARD
            .set(guard)
            .map_err(|_| anyhow::anyhow!("file logging already initialised"))?;
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        anyhow::bail!("logging disabled for both console and file");
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing already initialised: {e}"))?;

    Ok(())
}

/// Configured directory, or `<tmp>/tentacles` when unset or blank.
pub fn log_directory(logging: &LoggingConfig) -> std::path::PathBuf {
    match logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(d) => std::path::PathBuf::from(d),
        None => std::env::temp_dir().join("tentacles"),
    }
}
