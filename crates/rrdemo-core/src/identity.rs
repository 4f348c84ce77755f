//! Node identity: who this container is inside the demo ring.

/// Immutable metadata fixed at process start.
#[derive(Debug, Clone)]
pub struct ServiceIdentity {
    /// Application name, e.g. `app2`.
    pub app_name: String,
    /// Display color used for the landing page background.
    pub color: String,
    /// Position of this container in the ring (1-based).
    pub container_number: u32,
    /// Runtime instance name (usually `HOSTNAME`).
    pub container_id: String,
    /// Number of containers in the ring.
    pub cluster_size: u32,
}

impl ServiceIdentity {
    /// Resolve the container id from an optional host name, falling back to
    /// `container-<n>`.
    pub fn resolve_container_id(hostname: Option<String>, container_number: u32) -> String {
        match hostname {
            Some(h) if !h.trim().is_empty() => h,
            _ => format!("container-{container_number}"),
        }
    }

    /// Uppercased application name, as shown on the page and in log records.
    pub fn display_name(&self) -> String {
        self.app_name.to_uppercase()
    }

    /// Ordinal the caller should try next.
    ///
    /// Ordinals outside `1..=cluster_size` are treated as container 1.
    pub fn next_container(&self) -> u32 {
        next_in_ring(self.container_number, self.cluster_size)
    }
}

/// Cyclic successor of `n` in a ring of `size` containers.
pub fn next_in_ring(n: u32, size: u32) -> u32 {
    let size = size.max(1);
    let n = if (1..=size).contains(&n) { n } else { 1 };
    if n == size {
        1
    } else {
        n + 1
    }
}
