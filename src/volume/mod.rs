//! Adapted volumetric arrays and host publishing.

mod array;
mod sink;

pub use array::{AdaptError, VolumeArray};
pub use sink::{RawFileSink, SinkError, VolumeMetadata, VolumeSink};
