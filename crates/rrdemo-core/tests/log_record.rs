//! Structured log record shape tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use rrdemo_core::record::{LogEvent, LogLevel, RecordTemplate, RequestMeta};
use rrdemo_core::ServiceIdentity;

fn template() -> RecordTemplate {
    RecordTemplate {
        identity: ServiceIdentity {
            app_name: "app2".into(),
            color: "#28a745".into(),
            container_number: 2,
            container_id: "node-a".into(),
            cluster_size: 3,
        },
        max_requests: 3,
        service: "rrdemo-node".into(),
        environment: "development".into(),
        tags: vec!["rust".into(), "axum".into(), "microservice".into()],
    }
}

fn at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap()
}

#[test]
fn base_fields_in_stable_order() {
    let rec = template().render(LogEvent::info("hello"), 1, at());
    let keys: Vec<&str> = rec.keys().collect();
    assert_eq!(
        keys,
        [
            "@timestamp",
            "timestamp",
            "appname",
            "application",
            "log_level",
            "level",
            "message",
            "color",
            "container_number",
            "container_id",
            "request_counter",
            "max_requests",
            "client_ip",
            "path",
            "http_method",
            "service",
            "environment",
            "host",
            "tags",
        ]
    );
    assert_eq!(rec.get("@timestamp"), Some(&json!("2024-05-01T12:30:45.000000")));
    assert_eq!(rec.get("timestamp"), rec.get("@timestamp"));
    assert_eq!(rec.get("appname"), Some(&json!("APP2")));
    assert_eq!(rec.get("application"), Some(&json!("APP2")));
    assert_eq!(rec.get("level"), Some(&json!("INFO")));
    assert_eq!(rec.get("host"), Some(&json!("node-a")));
    assert_eq!(rec.get("request_counter"), Some(&json!(1)));
    assert_eq!(rec.get("client_ip"), Some(&Value::Null));
    assert_eq!(
        rec.get("tags"),
        Some(&json!(["rust", "axum", "microservice", "container-2", "app-app2"]))
    );
}

#[test]
fn request_meta_and_level() {
    let ev = LogEvent::info("boom")
        .level(LogLevel::Error)
        .request(RequestMeta {
            client_ip: Some("10.0.0.7".into()),
            path: "/health".into(),
            method: "GET".into(),
        });
    let rec = template().render(ev, 0, at());
    assert_eq!(rec.get("log_level"), Some(&json!("ERROR")));
    assert_eq!(rec.get("client_ip"), Some(&json!("10.0.0.7")));
    assert_eq!(rec.get("path"), Some(&json!("/health")));
    assert_eq!(rec.get("http_method"), Some(&json!("GET")));
}

#[test]
fn extras_overwrite_and_tags_still_appended() {
    let ev = LogEvent::info("home")
        .field("request_number", 4)
        .field("status", "redirecting")
        .field("service", "override")
        .field("tags", json!(["custom"]));
    let rec = template().render(ev, 4, at());
    assert_eq!(rec.get("request_number"), Some(&json!(4)));
    assert_eq!(rec.get("status"), Some(&json!("redirecting")));
    assert_eq!(rec.get("service"), Some(&json!("override")));
    assert_eq!(rec.get("tags"), Some(&json!(["custom", "container-2", "app-app2"])));
}

#[test]
fn non_array_tags_are_replaced() {
    let ev = LogEvent::info("x").field("tags", "oops");
    let rec = template().render(ev, 0, at());
    assert_eq!(rec.get("tags"), Some(&json!(["container-2", "app-app2"])));
}

#[test]
fn line_is_single_line_json() {
    let rec = template().render(LogEvent::info("multi\nline message"), 2, at());
    let line = rec.to_line().unwrap();
    assert!(!line.contains('\n'));
    let back: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(back["message"], json!("multi\nline message"));
    assert!(line.starts_with("{\"@timestamp\":"));
}
