mod processor;
pub use processor::{ProcessorSpec, VolumeBinding, VolumeMode};

mod artifact;
pub use artifact::{ArtifactDescriptor, ArtifactMetadata, LocationCandidate};
