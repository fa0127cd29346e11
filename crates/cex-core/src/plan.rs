//! Launch plan: the fully resolved container configuration for one task.
use std::path::{Path, PathBuf};

use cex_model::{Env, INGEST_MOUNT_PATH, Labels, ProcessorSpec};

/// Container configuration derived from a task. Built fresh per task.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPlan {
    pub image: String,
    /// Requested CPU share. Carried for logs; not applied to the container.
    pub cpu: f64,
    /// Memory limit in bytes; `0` means no limit.
    pub memory_bytes: i64,
    /// Ordered `KEY=VALUE` entries. Later duplicates win inside the container.
    pub env: Env,
    pub mounts: Vec<Mount>,
}

/// One bind mount of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub host_path: PathBuf,
    pub container_path: String,
    pub writable: bool,
}

impl Mount {
    pub fn read_only(host_path: impl Into<PathBuf>, container_path: impl Into<String>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: container_path.into(),
            writable: false,
        }
    }
}

/// Build the launch plan for a decoded processor.
///
/// Environment: every label in label order, then the processor's own entries
/// verbatim. Mounts: the artifact read-only at the fixed ingest path, then each
/// processor volume in order.
pub fn build_plan(processor: &ProcessorSpec, labels: &Labels, artifact: &Path) -> LaunchPlan {
    let mut env = Env::new();
    env.extend(labels.iter().map(|l| l.to_env_entry()));
    env.extend(processor.env.iter().cloned());

    let mut mounts = Vec::with_capacity(processor.volumes.len() + 1);
    mounts.push(Mount::read_only(artifact, INGEST_MOUNT_PATH));
    mounts.extend(processor.volumes.iter().map(|v| Mount {
        host_path: PathBuf::from(&v.host_path),
        container_path: v.container_path.clone(),
        writable: v.is_writable(),
    }));

    LaunchPlan {
        image: processor.image.clone(),
        cpu: processor.cpu,
        memory_bytes: processor.memory_bytes(),
        env,
        mounts,
    }
}
