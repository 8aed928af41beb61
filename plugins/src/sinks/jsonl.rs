use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use serde_json::json;
use tentacles_core::api::{AnalyticsSink, RawEvent};

/// Path value that selects standard output instead of a file.
pub const STDOUT_TARGET: &str = "stdout:";

/// Appends one JSON object per event:
/// `{"v":1,"ts":"<rfc3339>","name":"...","attributes":{...}}`.
pub struct JsonlSink {
    name: String,
    writer: Mutex<Box<dyn Write + Send>>,
    dropped: AtomicU64,
}

impl JsonlSink {
    /// Opens `path` for appending, creating it if needed. `stdout:` writes to
    /// standard output.
    pub fn open(name: impl Into<String>, path: &str) -> anyhow::Result<Self> {
        let writer: Box<dyn Write + Send> = if path == STDOUT_TARGET {
            Box::new(std::io::stdout())
        } else {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("open jsonl sink {path}: {e}"))?;
            Box::new(file)
        };
        Ok(Self::from_writer(name, writer))
    }

    pub fn from_writer(name: impl Into<String>, writer: Box<dyn Write + Send>) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
            dropped: AtomicU64::new(0),
        }
    }

    /// Events that could not be written.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn write_line(&self, event: &RawEvent) -> std::io::Result<()> {
        let line = json!({
            "v": 1,
            "ts": Local::now().to_rfc3339(),
            "name": event.name,
            "attributes": event.attributes,
        })
        .to_string();
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl AnalyticsSink for JsonlSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn report(&self, event: &RawEvent) {
        if let Err(e) = self.write_line(event) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(sink = %self.name, error = %e, "jsonl write failed");
        }
    }
}
