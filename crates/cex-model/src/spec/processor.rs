use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{BYTES_PER_MB, ModelError, ModelResult};

/// Declarative description of the container a task runs.
///
/// Carried as JSON in the `processor` label. The schema is owned by this agent,
/// so unknown fields are rejected instead of silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorSpec {
    /// Human-readable processor name.
    #[serde(default)]
    pub name: String,
    /// Image reference (e.g. `"alpine"`, `"registry:5000/team/parser:1.2"`).
    #[serde(rename = "docker")]
    pub image: String,
    /// Requested CPU share. Informational only.
    #[serde(rename = "cpus", default)]
    pub cpu: f64,
    /// Memory limit in megabytes; `0` means no limit.
    #[serde(rename = "mem")]
    pub memory_mb: i64,
    /// Informational paths declared by the processor.
    #[serde(rename = "input", default)]
    pub input_path: String,
    #[serde(rename = "output", default)]
    pub output_path: String,
    #[serde(rename = "error", default)]
    pub error_path: String,
    /// Additional host bind mounts.
    #[serde(default)]
    pub volumes: Vec<VolumeBinding>,
    /// Raw `KEY=VALUE` entries appended after the label-derived environment.
    #[serde(default)]
    pub env: Vec<String>,
}

impl ProcessorSpec {
    /// Check the constraints serde cannot express.
    ///
    /// Rules:
    /// - `docker` is not empty or whitespace-only;
    /// - `mem` is not negative and converts to bytes without overflow.
    pub fn validate(&self) -> ModelResult<()> {
        if self.image.trim().is_empty() {
            return Err(ModelError::Invalid("processor image ('docker') is empty".into()));
        }
        if self.memory_mb < 0 {
            return Err(ModelError::Invalid(format!(
                "processor memory ('mem') is negative: {}",
                self.memory_mb
            )));
        }
        if self.memory_mb.checked_mul(BYTES_PER_MB).is_none() {
            return Err(ModelError::Invalid(format!(
                "processor memory ('mem') is too large: {} MB",
                self.memory_mb
            )));
        }
        Ok(())
    }

    /// Memory limit in bytes.
    ///
    /// Saturates instead of overflowing; [`ProcessorSpec::validate`] rejects
    /// values where that would matter.
    pub fn memory_bytes(&self) -> i64 {
        self.memory_mb.saturating_mul(BYTES_PER_MB)
    }
}

/// One extra bind mount requested by a processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeBinding {
    #[serde(rename = "host-path")]
    pub host_path: String,
    #[serde(rename = "container-path")]
    pub container_path: String,
    #[serde(default)]
    pub mode: VolumeMode,
}

impl VolumeBinding {
    pub fn is_writable(&self) -> bool {
        self.mode == VolumeMode::ReadWrite
    }
}

/// Access mode of a [`VolumeBinding`].
///
/// Wire values are `RO` and `RW`; parsing is case-insensitive and also accepts
/// the long names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VolumeMode {
    #[default]
    ReadOnly,
    ReadWrite,
}

impl FromStr for VolumeMode {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "ro" | "readonly" | "read-only" => Ok(Self::ReadOnly),
            "rw" | "readwrite" | "read-write" => Ok(Self::ReadWrite),
            _ => Err(ModelError::Invalid(format!("unknown volume mode: {s}"))),
        }
    }
}

impl TryFrom<String> for VolumeMode {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<VolumeMode> for String {
    fn from(m: VolumeMode) -> Self {
        m.to_string()
    }
}

impl fmt::Display for VolumeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VolumeMode::ReadOnly => "RO",
            VolumeMode::ReadWrite => "RW",
        })
    }
}
