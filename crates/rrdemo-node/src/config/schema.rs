use std::net::SocketAddr;

use rrdemo_core::error::{DemoError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    pub version: u32,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            service: ServiceSection::default(),
            server: ServerSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl NodeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DemoError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.service.validate()?;
        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_container_number")]
    pub container_number: u32,

    #[serde(default = "default_cluster_size")]
    pub cluster_size: u32,

    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            color: default_color(),
            container_number: default_container_number(),
            cluster_size: default_cluster_size(),
            max_requests: default_max_requests(),
        }
    }
}

impl ServiceSection {
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(DemoError::Config("service.app_name must not be empty".into()));
        }
        if self.max_requests == 0 || self.max_requests == u32::MAX {
            return Err(DemoError::Config(
                "service.max_requests must be between 1 and 4294967294".into(),
            ));
        }
        if self.cluster_size == 0 {
            return Err(DemoError::Config("service.cluster_size must be at least 1".into()));
        }
        Ok(())
    }
}

fn default_app_name() -> String {
    "app2".into()
}
fn default_color() -> String {
    "#28a745".into()
}
fn default_container_number() -> u32 {
    2
}
fn default_cluster_size() -> u32 {
    3
}
fn default_max_requests() -> u32 {
    3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            DemoError::Config(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:5001".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Mount point shared with the log shipper.
    #[serde(default = "default_log_root")]
    pub root: String,

    #[serde(default = "default_service_tag")]
    pub service: String,

    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            root: default_log_root(),
            service: default_service_tag(),
            environment: default_environment(),
            tags: default_tags(),
        }
    }
}

fn default_log_root() -> String {
    "/fluent-bit/logs".into()
}
fn default_service_tag() -> String {
    "rrdemo-node".into()
}
fn default_environment() -> String {
    "development".into()
}
fn default_tags() -> Vec<String> {
    vec!["rust".into(), "axum".into(), "microservice".into()]
}
