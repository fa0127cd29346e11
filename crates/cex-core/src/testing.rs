//! In-memory doubles for the runtime and sink seams.
use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use futures::{StreamExt, stream};

use cex_model::{LifecycleState, StatusUpdate, TaskId};

use crate::{
    plan::LaunchPlan,
    reporter::{SinkError, StatusSink},
    runtime::{ContainerId, ContainerRuntime, OutputStream, RuntimeError},
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create { name: String, plan: LaunchPlan },
    Pull(String),
    Start(String),
    Attach(String),
    Wait(String),
}

impl Call {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Call::Create { .. } => "create",
            Call::Pull(_) => "pull",
            Call::Start(_) => "start",
            Call::Attach(_) => "attach",
            Call::Wait(_) => "wait",
        }
    }
}

/// Scripted behavior of a [`MockRuntime`].
#[derive(Debug, Clone)]
pub(crate) struct Script {
    pub image_present: bool,
    pub fail_pull: bool,
    pub fail_create: bool,
    pub fail_start: bool,
    pub panic_on_start: bool,
    pub attach_fault: bool,
    pub wait_fault: bool,
    pub output: Vec<&'static [u8]>,
    pub exit_code: i64,
    pub wait_delay: Option<Duration>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            image_present: true,
            fail_pull: false,
            fail_create: false,
            fail_start: false,
            panic_on_start: false,
            attach_fault: false,
            wait_fault: false,
            output: Vec::new(),
            exit_code: 0,
            wait_delay: None,
        }
    }
}

pub(crate) struct MockRuntime {
    script: Script,
    image_present: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl MockRuntime {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            image_present: AtomicBool::new(script.image_present),
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_kinds(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::kind).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create(&self, name: &str, plan: &LaunchPlan) -> Result<ContainerId, RuntimeError> {
        self.record(Call::Create {
            name: name.to_string(),
            plan: plan.clone(),
        });
        if !self.image_present.load(Ordering::SeqCst) {
            return Err(RuntimeError::ImageNotFound(plan.image.clone()));
        }
        if self.script.fail_create {
            return Err(RuntimeError::Engine("name already in use".into()));
        }
        Ok(ContainerId::new(format!("ctr-{name}")))
    }

    async fn pull(&self, image: &str) -> Result<(), RuntimeError> {
        self.record(Call::Pull(image.to_string()));
        if self.script.fail_pull {
            return Err(RuntimeError::Engine("manifest unknown".into()));
        }
        self.image_present.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn start(&self, id: &ContainerId) -> Result<(), RuntimeError> {
        self.record(Call::Start(id.as_str().to_string()));
        if self.script.panic_on_start {
            panic!("runtime exploded");
        }
        if self.script.fail_start {
            return Err(RuntimeError::Engine("mount denied".into()));
        }
        Ok(())
    }

    async fn attach(&self, id: &ContainerId) -> Result<OutputStream, RuntimeError> {
        self.record(Call::Attach(id.as_str().to_string()));
        let mut items: Vec<Result<Vec<u8>, RuntimeError>> =
            self.script.output.iter().map(|c| Ok(c.to_vec())).collect();
        if self.script.attach_fault {
            items.push(Err(RuntimeError::Engine("attach stream reset".into())));
        }
        Ok(stream::iter(items).boxed())
    }

    async fn wait(&self, id: &ContainerId) -> Result<i64, RuntimeError> {
        self.record(Call::Wait(id.as_str().to_string()));
        if let Some(delay) = self.script.wait_delay {
            tokio::time::sleep(delay).await;
        }
        if self.script.wait_fault {
            return Err(RuntimeError::Engine("daemon connection lost".into()));
        }
        Ok(self.script.exit_code)
    }
}

/// Sink that keeps every delivered update.
#[derive(Default)]
pub(crate) struct RecordingSink {
    updates: Mutex<Vec<StatusUpdate>>,
    fail_remaining: AtomicUsize,
}

impl RecordingSink {
    /// Reject the first `n` deliveries.
    pub(crate) fn failing_first(n: usize) -> Self {
        Self {
            updates: Mutex::new(Vec::new()),
            fail_remaining: AtomicUsize::new(n),
        }
    }

    pub(crate) fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub(crate) fn states(&self) -> Vec<LifecycleState> {
        self.updates().iter().map(|u| u.state).collect()
    }

    pub(crate) fn for_task(&self, id: &str) -> Vec<StatusUpdate> {
        let id = TaskId::new(id);
        self.updates()
            .into_iter()
            .filter(|u| u.task_id == id)
            .collect()
    }
}

#[async_trait]
impl StatusSink for RecordingSink {
    async fn send(&self, update: &StatusUpdate) -> Result<(), SinkError> {
        let reject = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if reject {
            return Err(SinkError::Delivery("scheduler unreachable".into()));
        }
        self.updates.lock().unwrap().push(update.clone());
        Ok(())
    }
}
