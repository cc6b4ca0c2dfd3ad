//! GPU buffer set for one volumetric dispatch.

use wgpu::{Buffer, BufferUsages, Device};

/// Buffers owned by a compute session.
///
/// `output` is the storage buffer the kernel writes, `params` carries the
/// extent uniform, and `staging` is the mappable readback target. All are
/// sized exactly from the configuration and live until teardown.
pub struct VolumeBuffers {
    pub output: Buffer,
    pub params: Buffer,
    pub staging: Buffer,
}

impl VolumeBuffers {
    pub fn new(device: &Device, byte_size: u64) -> Self {
        let output = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("volume_output_buffer"),
            size: byte_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("volume_params"),
            size: std::mem::size_of::<super::params::VolumeParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("volume_staging"),
            size: byte_size,
            usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            output,
            params,
            staging,
        }
    }
}
