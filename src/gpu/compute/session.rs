//! The compute session: one pipeline, one output buffer, one dispatch.

use crate::config::{ConfigError, VolumeConfig};
use crate::gpu::context::{GpuContext, GpuError};

use super::artifact::{ArtifactError, ShaderArtifact};
use super::buffers::VolumeBuffers;
use super::params::VolumeParams;
use super::pipelines::VolumePipeline;

/// Local workgroup size every generator kernel declares, per axis.
///
/// The dispatch grid is the extent divided by this, rounded up, so each
/// voxel is covered exactly once; kernels bounds-check the rounded-up tail.
pub const WORKGROUP_SIZE: u32 = 8;

/// Errors from constructing or driving a [`ComputeSession`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid volume configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("shader artifact rejected: {0}")]
    Artifact(#[from] ArtifactError),
    #[error("GPU device unavailable: {0}")]
    DeviceInit(#[from] GpuError),
    #[error("compute pipeline build failed: {0}")]
    PipelineBuild(String),
    #[error("volume needs {needed} bytes but the device caps storage buffers at {limit}")]
    VolumeTooLarge { needed: u64, limit: u64 },
    #[error("dispatch of {groups} workgroups on the {axis} axis exceeds the device limit of {limit}")]
    ExtentTooLarge { axis: char, groups: u32, limit: u32 },
    #[error("no completed dispatch yet; call run() first")]
    NotReady,
    #[error("compute session already torn down")]
    UseAfterTeardown,
    #[error("GPU buffer mapping failed: {0}")]
    BufferMapFailed(String),
}

/// Read-only view of the kernel output, in f32 element order.
///
/// Borrows the session's readback of the output buffer, so a view only
/// exists between a completed [`ComputeSession::run`] and
/// [`ComputeSession::teardown`] (which takes the session mutably).
pub struct ResultView<'a> {
    data: &'a [f32],
}

impl<'a> ResultView<'a> {
    pub fn as_f32(&self) -> &'a [f32] {
        self.data
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn byte_len(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

struct SessionResources {
    ctx: GpuContext,
    pipeline: VolumePipeline,
    bind_group: wgpu::BindGroup,
    buffers: VolumeBuffers,
}

/// Owns the device connection, the generator pipeline, and the output
/// buffer for one volume configuration.
///
/// The session is the sole writer of its output buffer. `run()` executes
/// one dispatch and blocks until the device has finished; the result is
/// then readable any number of times until `teardown()`, which releases
/// every device resource exactly once (and is also invoked on drop).
pub struct ComputeSession {
    config: VolumeConfig,
    resources: Option<SessionResources>,
    readback: Option<Vec<f32>>,
}

impl ComputeSession {
    /// Validate the configuration, load the shader artifact, acquire a
    /// device, and build the pipeline and buffers.
    ///
    /// Fails without leaving anything behind: resources acquired before
    /// an error are released by drop before this returns.
    pub async fn new(config: VolumeConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let artifact = ShaderArtifact::load(&config.shader_artifact)?;

        let ctx = GpuContext::new().await?;
        let limits = ctx.device.limits();

        let byte_size = config.byte_size();
        let buffer_limit = (limits.max_storage_buffer_binding_size as u64).min(limits.max_buffer_size);
        if byte_size > buffer_limit {
            return Err(SessionError::VolumeTooLarge {
                needed: byte_size,
                limit: buffer_limit,
            });
        }

        let (gx, gy, gz) = dispatch_extent(&config);
        let group_limit = limits.max_compute_workgroups_per_dimension;
        for (axis, groups) in [('x', gx), ('y', gy), ('z', gz)] {
            if groups > group_limit {
                return Err(SessionError::ExtentTooLarge {
                    axis,
                    groups,
                    limit: group_limit,
                });
            }
        }

        // Shader and pipeline creation report malformed artifacts through
        // the validation error scope rather than losing the device.
        let error_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("volume_kernel"),
                source: artifact.into_shader_source(),
            });
        let pipeline = VolumePipeline::new(&ctx.device, &shader);
        let buffers = VolumeBuffers::new(&ctx.device, byte_size);
        let bind_group = pipeline.create_bind_group(&ctx.device, &buffers.output, &buffers.params);

        if let Some(err) = error_scope.pop().await {
            return Err(SessionError::PipelineBuild(err.to_string()));
        }

        ctx.queue.write_buffer(
            &buffers.params,
            0,
            bytemuck::bytes_of(&VolumeParams::new(&config)),
        );

        log::info!(
            "compute session ready: {}x{}x{}x{} ({} bytes) on {}",
            config.width,
            config.height,
            config.depth,
            config.channels,
            byte_size,
            ctx.adapter_info().name
        );

        Ok(Self {
            config,
            resources: Some(SessionResources {
                ctx,
                pipeline,
                bind_group,
                buffers,
            }),
            readback: None,
        })
    }

    pub fn config(&self) -> &VolumeConfig {
        &self.config
    }

    /// Whether a dispatch has completed since construction.
    pub fn has_run(&self) -> bool {
        self.readback.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.resources.is_none()
    }

    /// Execute one dispatch covering the full extent and block until the
    /// device signals completion.
    ///
    /// Re-running is allowed: the kernel executes again and the readback
    /// is overwritten in place. The `&mut` receiver serializes callers,
    /// so two dispatches can never be in flight on one session.
    pub fn run(&mut self) -> Result<(), SessionError> {
        let res = self
            .resources
            .as_ref()
            .ok_or(SessionError::UseAfterTeardown)?;

        let (gx, gy, gz) = dispatch_extent(&self.config);
        log::debug!("dispatching {}x{}x{} workgroups", gx, gy, gz);

        let mut encoder = res
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("volume_dispatch_encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("volume_dispatch_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&res.pipeline.pipeline);
            pass.set_bind_group(0, &res.bind_group, &[]);
            pass.dispatch_workgroups(gx, gy, gz);
        }
        encoder.copy_buffer_to_buffer(
            &res.buffers.output,
            0,
            &res.buffers.staging,
            0,
            self.config.byte_size(),
        );
        res.ctx.queue.submit(Some(encoder.finish()));

        let readback = Self::read_staging(res, self.config.byte_size())?;
        self.readback = Some(readback);
        Ok(())
    }

    /// View the output of the last completed dispatch.
    pub fn result_view(&self) -> Result<ResultView<'_>, SessionError> {
        if self.resources.is_none() {
            return Err(SessionError::UseAfterTeardown);
        }
        self.readback
            .as_deref()
            .map(|data| ResultView { data })
            .ok_or(SessionError::NotReady)
    }

    /// Release pipeline, buffers, and device. Idempotent: later calls
    /// are no-ops. Also runs on drop.
    pub fn teardown(&mut self) {
        if let Some(res) = self.resources.take() {
            log::debug!("tearing down compute session");
            self.readback = None;
            drop(res);
        }
    }

    fn read_staging(res: &SessionResources, byte_size: u64) -> Result<Vec<f32>, SessionError> {
        let slice = res.buffers.staging.slice(..byte_size);

        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| {
            let _ = tx.send(r);
        });
        res.ctx
            .device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| SessionError::BufferMapFailed(format!("{:?}", e)))?;

        rx.recv()
            .map_err(|e| SessionError::BufferMapFailed(e.to_string()))?
            .map_err(|e| SessionError::BufferMapFailed(format!("{:?}", e)))?;

        let data = slice.get_mapped_range();
        let result: Vec<f32> = bytemuck::cast_slice(&data).to_vec();
        drop(data);
        res.buffers.staging.unmap();

        Ok(result)
    }
}

impl Drop for ComputeSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn dispatch_extent(config: &VolumeConfig) -> (u32, u32, u32) {
    (
        config.width.div_ceil(WORKGROUP_SIZE),
        config.height.div_ceil(WORKGROUP_SIZE),
        config.depth.div_ceil(WORKGROUP_SIZE),
    )
}
