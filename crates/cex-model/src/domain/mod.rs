mod kv;
pub use kv::Label;

mod env;
pub use env::Env;

mod labels;
pub use labels::Labels;

mod task_id;
pub use task_id::TaskId;

mod constants;
pub use constants::{BYTES_PER_MB, FILE_SCHEME, INGEST_MOUNT_PATH, LABEL_MESSAGE, LABEL_PROCESSOR};
