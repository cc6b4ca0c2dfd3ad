//! Volume configuration shared by the compute session and the adapter.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Errors produced when validating a [`VolumeConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("volume dimensions must all be non-zero, got {width}x{height}x{depth}x{channels}")]
    ZeroDimension {
        width: u32,
        height: u32,
        depth: u32,
        channels: u32,
    },
}

/// Immutable description of one volumetric dispatch.
///
/// The extent and channel count fix the output buffer byte size for the
/// lifetime of a session; a different volume requires a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub channels: u32,
    /// Compiled shader artifact: a SPIR-V `.spv` binary or WGSL text.
    pub shader_artifact: PathBuf,
}

impl VolumeConfig {
    pub fn new(
        width: u32,
        height: u32,
        depth: u32,
        channels: u32,
        shader_artifact: impl Into<PathBuf>,
    ) -> Self {
        Self {
            width,
            height,
            depth,
            channels,
            shader_artifact: shader_artifact.into(),
        }
    }

    /// Total number of f32 elements written by a dispatch.
    pub fn element_count(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64 * self.channels as u64
    }

    /// Exact size of the output buffer in bytes.
    pub fn byte_size(&self) -> u64 {
        self.element_count() * std::mem::size_of::<f32>() as u64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.depth == 0 || self.channels == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
                depth: self.depth,
                channels: self.channels,
            });
        }
        Ok(())
    }
}
