mod domain;
pub use domain::{BYTES_PER_MB, FILE_SCHEME, INGEST_MOUNT_PATH, LABEL_MESSAGE, LABEL_PROCESSOR};
pub use domain::{Env, Label, Labels, TaskId};

mod error;
pub use error::{ModelError, ModelResult};

mod spec;
pub use spec::{
    ArtifactDescriptor, ArtifactMetadata, LocationCandidate, ProcessorSpec, VolumeBinding,
    VolumeMode,
};

mod status;
pub use status::{FailureReason, LifecycleState, StatusUpdate};

mod decode;
pub use decode::{TaskDescriptor, decode_descriptor, decode_message, decode_processor};

mod locate;
pub use locate::{LOCATION_PRIORITY, locate_artifact};
