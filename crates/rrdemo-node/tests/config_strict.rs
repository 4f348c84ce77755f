#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rrdemo_core::DemoError;
use rrdemo_node::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
service:
  app_name: app2
  max_request: 3 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DemoError::Config(_)));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.service.app_name, "app2");
    assert_eq!(cfg.service.container_number, 2);
    assert_eq!(cfg.service.max_requests, 3);
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 5001);
    assert_eq!(cfg.logging.root, "/fluent-bit/logs");
}

#[test]
fn overrides_apply() {
    let ok = r##"
version: 1
service:
  app_name: app3
  color: "#dc3545"
  container_number: 3
  max_requests: 5
server:
  listen: "127.0.0.1:5002"
logging:
  root: /tmp/logs
  tags: [demo]
"##;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.service.app_name, "app3");
    assert_eq!(cfg.service.color, "#dc3545");
    assert_eq!(cfg.service.max_requests, 5);
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 5002);
    assert_eq!(cfg.logging.tags, vec!["demo".to_string()]);
}

#[test]
fn rejects_bad_values() {
    for bad in [
        "version: 2\n",
        "version: 1\nservice:\n  max_requests: 0\n",
        "version: 1\nservice:\n  max_requests: 4294967295\n",
        "version: 1\nservice:\n  cluster_size: 0\n",
        "version: 1\nservice:\n  app_name: \"  \"\n",
        "version: 1\nserver:\n  listen: \"not-an-addr\"\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert!(matches!(err, DemoError::Config(_)), "{bad}: {err}");
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("rrdemo-does-not-exist.yaml");
    let cfg = config::load_or_default(&path).expect("defaults");
    assert_eq!(cfg.service.app_name, "app2");
}
