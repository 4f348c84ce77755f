//! Structured event logger.
//!
//! Every event is rendered once into a single JSON line and handed to each
//! registered sink. A failing sink is reported through `tracing` and skipped;
//! `StructuredLogger::log` never returns an error to the caller.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rrdemo_core::error::{DemoError, Result};
use rrdemo_core::record::{LogEvent, RecordTemplate};

use crate::obs::metrics::NodeMetrics;

/// Destination for serialized log lines.
pub trait LogSink: Send + Sync {
    fn name(&self) -> &'static str;
    /// Write one line. `line` carries no trailing newline.
    fn write_line(&self, line: &str) -> Result<()>;
}

/// Process stdout (picked up by `docker logs`).
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}

/// Append-only file under the shipper's mount. No rotation.
pub struct FileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSink {
    /// `<root>/<app>/<app>.log`
    pub fn for_app(root: impl AsRef<Path>, app_name: &str) -> Self {
        let path = root
            .as_ref()
            .join(app_name)
            .join(format!("{app_name}.log"));
        Self::new(path)
    }

    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the containing directory. Idempotent.
    pub fn prepare(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl LogSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| DemoError::Internal("file sink lock poisoned".into()))?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        f.write_all(format!("{line}\n").as_bytes())?;
        Ok(())
    }
}

/// Collects lines in memory. Used by tests and local tooling.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn write_line(&self, line: &str) -> Result<()> {
        self.lines
            .lock()
            .map_err(|_| DemoError::Internal("memory sink lock poisoned".into()))?
            .push(line.to_string());
        Ok(())
    }
}

pub struct StructuredLogger {
    template: RecordTemplate,
    sinks: Vec<Arc<dyn LogSink>>,
    metrics: Arc<NodeMetrics>,
}

impl StructuredLogger {
    pub fn new(template: RecordTemplate, metrics: Arc<NodeMetrics>) -> Self {
        Self {
            template,
            sinks: Vec::new(),
            metrics,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Render `event` with the given counter value and write it everywhere.
    pub fn log(&self, event: LogEvent, request_counter: u32) {
        let record = self.template.render(event, request_counter, Utc::now());
        let line = match record.to_line() {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize log record");
                self.metrics.log_write_failures.inc(&[("sink", "serialize")]);
                return;
            }
        };

        for sink in &self.sinks {
            if let Err(e) = sink.write_line(&line) {
                tracing::warn!(sink = sink.name(), kind = e.kind(), error = %e, "failed to write log");
                self.metrics.log_write_failures.inc(&[("sink", sink.name())]);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rrdemo_core::ServiceIdentity;

    struct BrokenSink;

    impl LogSink for BrokenSink {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn write_line(&self, _line: &str) -> Result<()> {
            Err(DemoError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only mount",
            )))
        }
    }

    fn template() -> RecordTemplate {
        RecordTemplate {
            identity: ServiceIdentity {
                app_name: "app2".into(),
                color: "#28a745".into(),
                container_number: 2,
                container_id: "container-2".into(),
                cluster_size: 3,
            },
            max_requests: 3,
            service: "rrdemo-node".into(),
            environment: "test".into(),
            tags: vec![],
        }
    }

    #[test]
    fn failing_sink_does_not_block_others() {
        let metrics = Arc::new(NodeMetrics::default());
        let mem = Arc::new(MemorySink::default());
        let logger = StructuredLogger::new(template(), Arc::clone(&metrics))
            .with_sink(Arc::new(BrokenSink))
            .with_sink(mem.clone());

        logger.log(LogEvent::info("Request counter reset"), 0);

        let lines = mem.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"message\":\"Request counter reset\""));
        assert_eq!(metrics.log_write_failures.get(&[("sink", "broken")]), 1);
    }

    #[test]
    fn file_sink_appends_identical_lines() {
        let dir = std::env::temp_dir().join(format!("rrdemo-sink-{}", std::process::id()));
        let file = Arc::new(FileSink::for_app(&dir, "app2"));
        file.prepare().unwrap();
        file.prepare().unwrap();

        let mem = Arc::new(MemorySink::default());
        let logger = StructuredLogger::new(template(), Arc::new(NodeMetrics::default()))
            .with_sink(mem.clone())
            .with_sink(file.clone());
        logger.log(LogEvent::info("one"), 1);
        logger.log(LogEvent::info("two"), 2);

        let on_disk = fs::read_to_string(file.path()).unwrap();
        let disk_lines: Vec<&str> = on_disk.lines().collect();
        assert_eq!(disk_lines, mem.lines());
        assert!(file.path().ends_with("app2/app2.log"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
