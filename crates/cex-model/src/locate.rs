use std::path::PathBuf;

use crate::{ArtifactDescriptor, LocationCandidate, ModelError, ModelResult};

/// Location classes tried in order before falling back to any local candidate.
pub const LOCATION_PRIORITY: [&str; 3] = ["ingest", "archive", "cache"];

/// Pick the local path to mount as the task's input artifact.
///
/// Scans `locations` once per class in [`LOCATION_PRIORITY`], then once more
/// accepting any class. Only `file://` urls with a non-empty path qualify; the
/// scheme is stripped from the result.
pub fn locate_artifact(descriptor: &ArtifactDescriptor) -> ModelResult<PathBuf> {
    let locations = &descriptor.locations;

    let by_kind = LOCATION_PRIORITY.iter().find_map(|kind| {
        locations
            .iter()
            .filter(|c| c.is_kind(kind))
            .find_map(LocationCandidate::local_path)
    });

    by_kind
        .or_else(|| locations.iter().find_map(LocationCandidate::local_path))
        .map(PathBuf::from)
        .ok_or(ModelError::NoMountableArtifact {
            candidates: locations.len(),
        })
}
