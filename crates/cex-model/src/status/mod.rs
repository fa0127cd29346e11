mod state;
pub use state::LifecycleState;

mod reason;
pub use reason::FailureReason;

mod update;
pub use update::StatusUpdate;
