//! Structured log record (Kibana-oriented flat JSON).
//!
//! Several keys are written twice under different names (`@timestamp` and
//! `timestamp`, `appname` and `application`, `log_level` and `level`) so that
//! different log consumers find the field they expect. Key order is stable.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::identity::ServiceIdentity;

/// UTC ISO-8601 without offset, microsecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Request-derived fields. Absent for events outside a request (startup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    pub client_ip: Option<String>,
    pub path: String,
    pub method: String,
}

/// One loggable event before it is stamped with node state.
#[derive(Debug, Clone, Default)]
pub struct LogEvent {
    pub message: String,
    pub level: LogLevel,
    pub request: Option<RequestMeta>,
    pub extra: Map<String, Value>,
}

impl LogEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn request(mut self, meta: RequestMeta) -> Self {
        self.request = Some(meta);
        self
    }

    /// Add an extra field. Extras overwrite base keys on collision.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Fixed per-process fields shared by every record.
#[derive(Debug, Clone)]
pub struct RecordTemplate {
    pub identity: ServiceIdentity,
    pub max_requests: u32,
    pub service: String,
    pub environment: String,
    pub tags: Vec<String>,
}

impl RecordTemplate {
    /// Stamp `event` with node state at `now`.
    pub fn render(&self, event: LogEvent, request_counter: u32, now: DateTime<Utc>) -> LogRecord {
        let id = &self.identity;
        let ts = format_timestamp(now);
        let app = id.display_name();
        let level = event.level.as_str();
        let (client_ip, path, method) = match event.request {
            Some(r) => (
                r.client_ip.map(Value::String).unwrap_or(Value::Null),
                Value::String(r.path),
                Value::String(r.method),
            ),
            None => (Value::Null, Value::Null, Value::Null),
        };

        let mut m = Map::new();
        m.insert("@timestamp".into(), Value::String(ts.clone()));
        m.insert("timestamp".into(), Value::String(ts));
        m.insert("appname".into(), Value::String(app.clone()));
        m.insert("application".into(), Value::String(app));
        m.insert("log_level".into(), level.into());
        m.insert("level".into(), level.into());
        m.insert("message".into(), Value::String(event.message));
        m.insert("color".into(), Value::String(id.color.clone()));
        m.insert("container_number".into(), id.container_number.into());
        m.insert("container_id".into(), Value::String(id.container_id.clone()));
        m.insert("request_counter".into(), request_counter.into());
        m.insert("max_requests".into(), self.max_requests.into());
        m.insert("client_ip".into(), client_ip);
        m.insert("path".into(), path);
        m.insert("http_method".into(), method);
        m.insert("service".into(), Value::String(self.service.clone()));
        m.insert("environment".into(), Value::String(self.environment.clone()));
        m.insert("host".into(), Value::String(id.container_id.clone()));
        m.insert(
            "tags".into(),
            Value::Array(self.tags.iter().cloned().map(Value::String).collect()),
        );

        m.extend(event.extra);

        let node_tags = [
            Value::String(format!("container-{}", id.container_number)),
            Value::String(format!("app-{}", id.app_name)),
        ];
        match m.get_mut("tags") {
            Some(Value::Array(tags)) => tags.extend(node_tags),
            _ => {
                m.insert("tags".into(), Value::Array(node_tags.to_vec()));
            }
        }

        LogRecord(m)
    }
}

/// A rendered record, ready to be written to sinks.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord(Map<String, Value>);

impl LogRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Single-line JSON, no trailing newline.
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}
