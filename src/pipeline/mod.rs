//! Full generation pipeline: compile, dispatch, adapt, publish.

use std::path::Path;

use crate::config::VolumeConfig;
use crate::gpu::{ComputeSession, SessionError};
use crate::toolchain::{ToolchainConfig, ToolchainError};
use crate::volume::{AdaptError, SinkError, VolumeArray, VolumeSink};

/// Errors that can occur during pipeline execution.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Toolchain error: {0}")]
    Toolchain(#[from] ToolchainError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("Adapter error: {0}")]
    Adapt(#[from] AdaptError),
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Run one dispatch for `config` and adapt the output.
///
/// Constructs a session, runs it once, copies the result into an owned
/// array, and tears the session down before returning.
pub async fn generate_volume(config: &VolumeConfig) -> Result<VolumeArray, PipelineError> {
    let mut session = ComputeSession::new(config.clone()).await?;
    session.run()?;
    let volume = {
        let view = session.result_view()?;
        VolumeArray::from_view(&view, config)?
    };
    session.teardown();
    Ok(volume)
}

/// Blocking wrapper around [`generate_volume`] for synchronous hosts.
pub fn generate_volume_blocking(config: &VolumeConfig) -> Result<VolumeArray, PipelineError> {
    pollster::block_on(generate_volume(config))
}

/// Compile a shader source file, then generate a volume from the artifact.
pub async fn compile_and_generate(
    toolchain: &ToolchainConfig,
    shader_source: &Path,
    width: u32,
    height: u32,
    depth: u32,
    channels: u32,
) -> Result<VolumeArray, PipelineError> {
    let artifact = toolchain.compile(shader_source)?;
    let config = VolumeConfig::new(width, height, depth, channels, artifact);
    generate_volume(&config).await
}

/// Generate the scalar (channel 0) volume and publish it under `name`.
pub async fn generate_and_publish(
    config: &VolumeConfig,
    sink: &mut dyn VolumeSink,
    name: &str,
) -> Result<VolumeArray, PipelineError> {
    let volume = generate_volume(config).await?;
    let scalar = volume.scalar()?;
    sink.publish(name, &scalar)?;
    Ok(scalar)
}
