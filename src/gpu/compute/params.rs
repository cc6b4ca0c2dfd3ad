//! Uniform parameter struct shared with generator kernels.
//!
//! Must match the shader-side params block exactly: four consecutive
//! u32 fields, 16 bytes total, no padding.

use crate::config::VolumeConfig;

/// Extent and channel count as seen by the kernel.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VolumeParams {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub channels: u32,
}

impl VolumeParams {
    pub fn new(config: &VolumeConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            depth: config.depth,
            channels: config.channels,
        }
    }
}
