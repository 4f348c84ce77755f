//! Shared application state for the demo node.
//!
//! Built once in `main` and cloned into every handler. Identity and config
//! are immutable; the request counter is the only mutable piece and is an
//! atomic, so handlers need no extra locking.

use std::sync::Arc;

use rrdemo_core::error::Result;
use rrdemo_core::record::{LogEvent, RecordTemplate};
use rrdemo_core::{RequestCounter, ServiceIdentity};

use crate::config::NodeConfig;
use crate::obs::{FileSink, LogSink, NodeMetrics, StdoutSink, StructuredLogger};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    identity: ServiceIdentity,
    counter: RequestCounter,
    logger: StructuredLogger,
    metrics: Arc<NodeMetrics>,
}

impl AppState {
    /// Build state with the production sinks (stdout + log file).
    ///
    /// The log directory is created here. If that fails the file sink is
    /// still registered and each write reports its own failure.
    pub fn new(cfg: NodeConfig, hostname: Option<String>) -> Result<Self> {
        let file = FileSink::for_app(&cfg.logging.root, &cfg.service.app_name);
        if let Err(e) = file.prepare() {
            tracing::warn!(path = %file.path().display(), error = %e, "failed to create log directory");
        }
        let sinks: Vec<Arc<dyn LogSink>> = vec![Arc::new(StdoutSink), Arc::new(file)];
        Self::with_sinks(cfg, hostname, sinks)
    }

    /// Build state with caller-provided sinks.
    pub fn with_sinks(
        cfg: NodeConfig,
        hostname: Option<String>,
        sinks: Vec<Arc<dyn LogSink>>,
    ) -> Result<Self> {
        cfg.validate()?;

        let svc = &cfg.service;
        let identity = ServiceIdentity {
            app_name: svc.app_name.clone(),
            color: svc.color.clone(),
            container_number: svc.container_number,
            container_id: ServiceIdentity::resolve_container_id(hostname, svc.container_number),
            cluster_size: svc.cluster_size,
        };

        let template = RecordTemplate {
            identity: identity.clone(),
            max_requests: svc.max_requests,
            service: cfg.logging.service.clone(),
            environment: cfg.logging.environment.clone(),
            tags: cfg.logging.tags.clone(),
        };

        let counter = RequestCounter::new(svc.max_requests);
        let metrics = Arc::new(NodeMetrics::default());
        let logger = sinks
            .into_iter()
            .fold(StructuredLogger::new(template, Arc::clone(&metrics)), |l, s| {
                l.with_sink(s)
            });

        Ok(Self {
            inner: Arc::new(AppStateInner {
                counter,
                identity,
                logger,
                metrics,
            }),
        })
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.inner.identity
    }

    pub fn counter(&self) -> &RequestCounter {
        &self.inner.counter
    }

    pub fn metrics(&self) -> &NodeMetrics {
        &self.inner.metrics
    }

    /// Emit a structured record stamped with `request_counter`.
    pub fn log_with_counter(&self, event: LogEvent, request_counter: u32) {
        self.inner.logger.log(event, request_counter);
    }

    /// Emit a structured record stamped with the current counter value.
    pub fn log(&self, event: LogEvent) {
        self.log_with_counter(event, self.inner.counter.current());
    }
}
