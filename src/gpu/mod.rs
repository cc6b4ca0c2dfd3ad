//! GPU compute dispatch using wgpu.
//!
//! Provides headless device acquisition and the compute session that
//! executes volumetric generator kernels and reads their output back
//! to the host.

pub mod compute;
pub mod context;

pub use compute::{
    ArtifactError, ComputeSession, ResultView, SessionError, ShaderArtifact, WORKGROUP_SIZE,
};
pub use context::{GpuContext, GpuError};
