use std::time::Duration;

use async_trait::async_trait;
use bollard::{
    API_DEFAULT_VERSION, Docker,
    container::{
        AttachContainerOptions, AttachContainerResults, Config, CreateContainerOptions,
        StartContainerOptions, WaitContainerOptions,
    },
    errors::Error as BollardError,
    image::CreateImageOptions,
    models::HostConfig,
};
use futures::{StreamExt, TryStreamExt};
use tracing::{debug, info, trace};

use cex_core::{
    plan::{LaunchPlan, Mount},
    runtime::{ContainerId, ContainerRuntime, OutputStream, RuntimeError},
};

use crate::{DockerConfig, DockerError, RUNTIME_NAME, split_image_ref};

/// [`ContainerRuntime`] backed by the Docker Engine API.
///
/// Wraps a single [`Docker`] client; the client is cheap to clone and safe to
/// share across concurrent tasks.
#[derive(Clone, Debug)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Build a client from config. Does not contact the daemon.
    pub fn connect(config: &DockerConfig) -> Result<Self, DockerError> {
        config.validate()?;
        let timeout = config.timeout_secs;

        let docker = match config.endpoint.as_deref() {
            None => Docker::connect_with_local_defaults()?
                .with_timeout(Duration::from_secs(timeout)),
            Some(ep) if ep.starts_with("unix://") => {
                Docker::connect_with_unix(ep, timeout, API_DEFAULT_VERSION)?
            }
            Some(ep) => Docker::connect_with_http(ep, timeout, API_DEFAULT_VERSION)?,
        };
        debug!(endpoint = ?config.endpoint, timeout_secs = timeout, "docker client configured");
        Ok(Self { docker })
    }

    /// Check that the daemon answers.
    pub async fn ping(&self) -> Result<(), DockerError> {
        let reply = self.docker.ping().await?;
        info!(reply = %reply, "docker daemon reachable");
        Ok(())
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    fn name(&self) -> &'static str {
        RUNTIME_NAME
    }

    async fn create(&self, name: &str, plan: &LaunchPlan) -> Result<ContainerId, RuntimeError> {
        let options = CreateContainerOptions {
            name: name.to_string(),
            platform: None,
        };
        let created = self
            .docker
            .create_container(Some(options), container_config(plan))
            .await
            .map_err(|e| create_error(&plan.image, e))?;

        Ok(ContainerId::new(created.id))
    }

    async fn pull(&self, image: &str) -> Result<(), RuntimeError> {
        let (from_image, tag) = split_image_ref(image);
        info!(image, from_image = %from_image, tag = %tag, "pulling image");

        let options = CreateImageOptions {
            from_image,
            tag,
            ..Default::default()
        };
        let mut progress = self.docker.create_image(Some(options), None, None);
        while let Some(step) = progress.next().await {
            let step = step.map_err(engine)?;
            trace!(image, progress = ?step, "pull progress");
        }
        Ok(())
    }

    async fn start(&self, id: &ContainerId) -> Result<(), RuntimeError> {
        self.docker
            .start_container(id.as_str(), None::<StartContainerOptions<String>>)
            .await
            .map_err(engine)
    }

    async fn attach(&self, id: &ContainerId) -> Result<OutputStream, RuntimeError> {
        let options = AttachContainerOptions::<String> {
            stdout: Some(true),
            stderr: Some(true),
            stream: Some(true),
            logs: Some(true),
            ..Default::default()
        };
        let AttachContainerResults { output, .. } = self
            .docker
            .attach_container(id.as_str(), Some(options))
            .await
            .map_err(engine)?;

        Ok(output
            .map_ok(|chunk| chunk.as_ref().to_vec())
            .map_err(engine)
            .boxed())
    }

    async fn wait(&self, id: &ContainerId) -> Result<i64, RuntimeError> {
        let options = WaitContainerOptions {
            condition: "not-running",
        };
        let mut waiting = self.docker.wait_container(id.as_str(), Some(options));
        match waiting.next().await {
            Some(Ok(resp)) => Ok(resp.status_code),
            // bollard reports a non-zero exit as an error carrying the code.
            Some(Err(BollardError::DockerContainerWaitError { code, .. })) => Ok(code),
            Some(Err(e)) => Err(engine(e)),
            None => Err(RuntimeError::Engine(
                "wait stream ended without an exit status".into(),
            )),
        }
    }
}

/// Container configuration sent to the engine for `plan`.
pub fn container_config(plan: &LaunchPlan) -> Config<String> {
    let host_config = HostConfig {
        memory: (plan.memory_bytes > 0).then_some(plan.memory_bytes),
        binds: Some(plan.mounts.iter().map(bind_spec).collect()),
        ..Default::default()
    };

    Config {
        image: Some(plan.image.clone()),
        env: Some(plan.env.iter().map(str::to_string).collect()),
        attach_stdout: Some(true),
        attach_stderr: Some(true),
        tty: Some(false),
        host_config: Some(host_config),
        ..Default::default()
    }
}

fn bind_spec(mount: &Mount) -> String {
    let mode = if mount.writable { "rw" } else { "ro" };
    format!(
        "{}:{}:{}",
        mount.host_path.display(),
        mount.container_path,
        mode
    )
}

/// A create 404 means the image is not present locally.
fn create_error(image: &str, e: BollardError) -> RuntimeError {
    match e {
        BollardError::DockerResponseServerError {
            status_code: 404, ..
        } => RuntimeError::ImageNotFound(image.to_string()),
        other => engine(other),
    }
}

fn engine(e: BollardError) -> RuntimeError {
    RuntimeError::Engine(e.to_string())
}
