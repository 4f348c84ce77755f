//! Node config loader (strict parsing).
//!
//! A missing file is not an error: the node then runs with the built-in
//! `app2` defaults. A file that exists but does not parse or validate is.

pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rrdemo_core::error::{DemoError, Result};

pub use schema::{LoggingSection, NodeConfig, ServerSection, ServiceSection};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "RRDEMO_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "rrdemo.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<NodeConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        DemoError::Config(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<NodeConfig> {
    let cfg: NodeConfig = serde_yaml::from_str(s)
        .map_err(|e| DemoError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path`, or defaults when it does not exist.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<NodeConfig> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => load_from_file(path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            let cfg = NodeConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
        Err(e) => Err(DemoError::Config(format!(
            "stat config failed ({}): {e}",
            path.display()
        ))),
    }
}
