//! Owned volumetric array adapted from a session's result view.

use crate::config::VolumeConfig;
use crate::gpu::ResultView;

/// Errors from reshaping a result view into a [`VolumeArray`].
#[derive(Debug, thiserror::Error)]
pub enum AdaptError {
    #[error("data holds {got} elements but the shape implies {expected}")]
    LengthMismatch { expected: u64, got: usize },
    #[error("channel {channel} out of range for {channels} channels")]
    ChannelOutOfRange { channel: u32, channels: u32 },
}

/// Owned `(width, height, depth, channels)` float32 array.
///
/// Row-major with channels fastest, matching the byte layout generator
/// kernels write: `offset = ((x*height + y)*depth + z)*channels + c`.
/// Channel 0 is the primary scalar channel by convention. The array is an
/// independent copy and outlives the session it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeArray {
    width: u32,
    height: u32,
    depth: u32,
    channels: u32,
    data: Vec<f32>,
}

impl VolumeArray {
    /// Copy a result view into an owned array shaped by the configuration.
    ///
    /// Pure: the view is only read.
    pub fn from_view(view: &ResultView<'_>, config: &VolumeConfig) -> Result<Self, AdaptError> {
        Self::from_parts(
            config.width,
            config.height,
            config.depth,
            config.channels,
            view.as_f32().to_vec(),
        )
    }

    /// Build an array from raw parts, checking that the data length
    /// matches the shape.
    pub fn from_parts(
        width: u32,
        height: u32,
        depth: u32,
        channels: u32,
        data: Vec<f32>,
    ) -> Result<Self, AdaptError> {
        let expected = width as u64 * height as u64 * depth as u64 * channels as u64;
        if data.len() as u64 != expected {
            return Err(AdaptError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            channels,
            data,
        })
    }

    pub fn shape(&self) -> (u32, u32, u32, u32) {
        (self.width, self.height, self.depth, self.channels)
    }

    pub fn extent(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Value at `(x, y, z)` in channel `c`.
    ///
    /// Panics if any index is out of range.
    pub fn get(&self, x: u32, y: u32, z: u32, c: u32) -> f32 {
        assert!(
            x < self.width && y < self.height && z < self.depth && c < self.channels,
            "index ({}, {}, {}, {}) out of range for shape {:?}",
            x,
            y,
            z,
            c,
            self.shape()
        );
        self.data[self.offset(x, y, z, c)]
    }

    /// Project a single channel into a new `(width, height, depth)` array.
    pub fn channel(&self, channel: u32) -> Result<VolumeArray, AdaptError> {
        if channel >= self.channels {
            return Err(AdaptError::ChannelOutOfRange {
                channel,
                channels: self.channels,
            });
        }
        let data: Vec<f32> = self
            .data
            .iter()
            .skip(channel as usize)
            .step_by(self.channels as usize)
            .copied()
            .collect();
        Self::from_parts(self.width, self.height, self.depth, 1, data)
    }

    /// The primary scalar channel (channel 0).
    pub fn scalar(&self) -> Result<VolumeArray, AdaptError> {
        self.channel(0)
    }

    /// Mean over all elements, accumulated in f64.
    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|&v| v as f64).sum();
        (sum / self.data.len() as f64) as f32
    }

    fn offset(&self, x: u32, y: u32, z: u32, c: u32) -> usize {
        (((x as usize * self.height as usize + y as usize) * self.depth as usize + z as usize)
            * self.channels as usize)
            + c as usize
    }
}
