use serde::{Deserialize, Serialize};

use crate::FILE_SCHEME;

/// Message envelope describing the task's input artifact.
///
/// Produced by the upstream catalog; extra fields are tolerated, but every
/// field that is present must have the expected type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    #[serde(default)]
    pub metadata: ArtifactMetadata,
    #[serde(default)]
    pub locations: Vec<LocationCandidate>,
}

/// Descriptive metadata about the artifact. Not used for selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactMetadata {
    pub filename: String,
    pub datatype: String,
    pub size: i64,
    #[serde(rename = "hasha")]
    pub content_hash: String,
}

/// One place the artifact can be read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCandidate {
    /// Scheme-qualified url (`file:///…`, `s3://…`).
    pub url: String,
    /// Location class: `ingest`, `archive`, `cache`, or absent.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub compressed: bool,
    #[serde(rename = "processing", default, skip_serializing_if = "Option::is_none")]
    pub processing_state: Option<String>,
}

impl LocationCandidate {
    pub fn new(url: impl Into<String>, kind: Option<&str>) -> Self {
        Self {
            url: url.into(),
            kind: kind.map(str::to_string),
            compressed: false,
            processing_state: None,
        }
    }

    /// `true` if the candidate has the given location class.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }

    /// Local filesystem path, if the url uses the `file://` scheme and names a path.
    pub fn local_path(&self) -> Option<&str> {
        self.url
            .strip_prefix(FILE_SCHEME)
            .filter(|path| !path.is_empty())
    }
}
