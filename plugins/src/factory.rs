use std::sync::Arc;

use anyhow::Result;

use tentacles_core::api::{
    builtin, AnalyticsSink, Middleware, SinkKind, SinkSpec, Tentacles, TentaclesConfig,
};

use crate::errors::TracingErrorReporter;
use crate::sinks::{JsonlSink, LogSink, MemorySink};

pub fn build_sink(spec: &SinkSpec) -> Result<Arc<dyn AnalyticsSink>> {
    let name = spec.name.clone().unwrap_or_else(|| sink_kind_name(spec.kind).to_string());
    match spec.kind {
        SinkKind::Log => Ok(Arc::new(LogSink::new(name))),
        SinkKind::Memory => Ok(Arc::new(MemorySink::new(name))),
        SinkKind::Jsonl => {
            let path = spec
                .path
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .ok_or_else(|| anyhow::anyhow!("jsonl sink `{name}` requires a path"))?;
            Ok(Arc::new(JsonlSink::open(name, path)?))
        }
    }
}

pub fn build_middlewares(spec: &SinkSpec) -> Vec<Middleware> {
    spec.middleware.iter().map(builtin::from_spec).collect()
}

/// A ready-to-use instance: config-driven sessions, lifecycle and global
/// middleware, every configured sink with its chain, and a
/// [`TracingErrorReporter`].
pub fn build_tentacles(cfg: &TentaclesConfig) -> Result<Tentacles> {
    cfg.validate()?;
    let tentacles = Tentacles::from_config(cfg);
    tentacles.register_error_reporter(Arc::new(TracingErrorReporter));
    for spec in &cfg.sinks {
        tentacles.register_sink(build_sink(spec)?, build_middlewares(spec));
    }
    Ok(tentacles)
}

fn sink_kind_name(kind: SinkKind) -> &'static str {
    match kind {
        SinkKind::Log => "log",
        SinkKind::Jsonl => "jsonl",
        SinkKind::Memory => "memory",
    }
}
