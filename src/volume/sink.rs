//! Publishing adapted volumes to a host data model.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::array::VolumeArray;

/// Errors from publishing a volume.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("metadata serialization failed: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Host-side consumer of adapted volumes.
///
/// A host application implements this to create or update a named
/// volumetric dataset in its own data model. Publishing the same name
/// twice means update-in-place; a new name means create.
pub trait VolumeSink {
    fn publish(&mut self, name: &str, volume: &VolumeArray) -> Result<(), SinkError>;
}

/// Shape sidecar written next to each raw dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeMetadata {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub channels: u32,
    pub element_count: usize,
}

/// Headless sink that dumps volumes to disk.
///
/// `<name>.raw` holds the native-endian f32 data, `<name>.json` the shape
/// metadata. Re-publishing a name overwrites both files.
pub struct RawFileSink {
    dir: PathBuf,
}

impl RawFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn raw_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.raw", name))
    }

    pub fn metadata_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl VolumeSink for RawFileSink {
    fn publish(&mut self, name: &str, volume: &VolumeArray) -> Result<(), SinkError> {
        let (width, height, depth, channels) = volume.shape();

        let mut writer = BufWriter::new(File::create(self.raw_path(name))?);
        writer.write_all(bytemuck::cast_slice(volume.as_slice()))?;
        writer.flush()?;

        let metadata = VolumeMetadata {
            width,
            height,
            depth,
            channels,
            element_count: volume.len(),
        };
        let file = BufWriter::new(File::create(self.metadata_path(name))?);
        serde_json::to_writer_pretty(file, &metadata)?;

        log::debug!(
            "published volume '{}' ({}x{}x{}x{}) to {}",
            name,
            width,
            height,
            depth,
            channels,
            self.dir.display()
        );
        Ok(())
    }
}
