//! Voluma Core
//!
//! GPU compute-dispatch library for generating volumetric datasets.
//!
//! A [`ComputeSession`] owns a wgpu compute pipeline sized by a 3-D extent
//! and channel count, executes a single shader dispatch synchronously, and
//! exposes the device-written output buffer as a flat float32 view. The
//! [`VolumeArray`] adapter reshapes that view into an owned
//! `(width, height, depth, channels)` array that outlives the session.
//!
//! # Features
//!
//! - Shader compilation via an external `glslangValidator` subprocess
//!   (GLSL → SPIR-V), or WGSL artifacts loaded directly
//! - Synchronous compute dispatch over a `width × height × depth` grid
//!   via wgpu (Vulkan, Metal, DX12)
//! - Deterministic resource teardown, idempotent and enforced on drop
//! - Channel-fastest result adaptation with single-channel projection
//! - Headless publishing through the [`VolumeSink`] trait (raw file dump
//!   with a JSON metadata sidecar included)
//!
//! # Shader contract
//!
//! Every kernel run by a session declares local workgroup size `8×8×8`,
//! entry point `main`, and two bindings in group 0: a read-write `f32`
//! storage buffer at binding 0 and a uniform params block
//! `{width, height, depth, channels: u32}` at binding 1. Output is
//! row-major, channel-fastest. Kernels must bounds-check writes because
//! the dispatch grid rounds the extent up to whole workgroups.

pub mod config;
pub mod gpu;
pub mod pipeline;
pub mod toolchain;
pub mod volume;

// Re-export commonly used types
pub use config::{ConfigError, VolumeConfig};
pub use gpu::{ComputeSession, GpuContext, GpuError, ResultView, SessionError, WORKGROUP_SIZE};
pub use pipeline::{
    compile_and_generate, generate_and_publish, generate_volume, generate_volume_blocking,
    PipelineError,
};
pub use toolchain::{ToolchainConfig, ToolchainError};
pub use volume::{AdaptError, RawFileSink, SinkError, VolumeArray, VolumeSink};
