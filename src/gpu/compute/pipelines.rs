//! Bind group layout and compute pipeline for generator kernels.

use wgpu::{BindGroup, BindGroupLayout, Buffer, ComputePipeline, Device, ShaderModule};

/// Entry point every generator kernel must export.
pub const KERNEL_ENTRY_POINT: &str = "main";

/// The single pipeline a session dispatches.
pub struct VolumePipeline {
    pub layout: BindGroupLayout,
    pub pipeline: ComputePipeline,
}

impl VolumePipeline {
    /// Create the pipeline for the fixed kernel binding contract:
    /// read-write storage output at binding 0, extent uniform at binding 1.
    pub fn new(device: &Device, shader: &ShaderModule) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("volume_kernel_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("volume_kernel_pipeline_layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("volume_kernel_pipeline"),
            layout: Some(&pipeline_layout),
            module: shader,
            entry_point: Some(KERNEL_ENTRY_POINT),
            compilation_options: Default::default(),
            cache: None,
        });

        Self { layout, pipeline }
    }

    pub fn create_bind_group(&self, device: &Device, output: &Buffer, params: &Buffer) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("volume_kernel_bind_group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: output.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params.as_entire_binding(),
                },
            ],
        })
    }
}
