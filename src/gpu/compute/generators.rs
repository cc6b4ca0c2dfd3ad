//! Built-in volumetric generator kernels.
//!
//! Shipped as WGSL source conforming to the session's binding contract.
//! They are ordinary shader artifacts: write one to disk and point a
//! [`VolumeConfig`](crate::config::VolumeConfig) at the file.

/// Writes the x coordinate into channel 0 of every voxel; remaining
/// channels are zeroed. A deterministic smoke-test kernel.
pub const GRADIENT_X_WGSL: &str = include_str!("../shaders/gradient_x.wgsl");

/// Escape-time Mandelbrot set swept through a per-slice zoom.
pub const MANDELBROT_WGSL: &str = include_str!("../shaders/mandelbrot.wgsl");
