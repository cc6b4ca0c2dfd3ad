//! Compiled shader artifact loading.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

// First word of every SPIR-V binary, little endian.
const SPIRV_MAGIC: u32 = 0x0723_0203;

/// Errors produced while loading a shader artifact from disk.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot read shader artifact {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} is not a SPIR-V binary (bad magic or truncated word)")]
    NotSpirV(PathBuf),
    #[error("{0} is not valid UTF-8 WGSL")]
    InvalidUtf8(PathBuf),
}

/// A compiled shader artifact read into memory.
///
/// `.spv` files are decoded as SPIR-V words; anything else is treated as
/// WGSL text. Both are validated here so a bad artifact is rejected
/// before any device resource is acquired.
pub enum ShaderArtifact {
    SpirV(Vec<u32>),
    Wgsl(String),
}

impl ShaderArtifact {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "spv") {
            if bytes.len() < 4 || bytes.len() % 4 != 0 {
                return Err(ArtifactError::NotSpirV(path.to_path_buf()));
            }
            let words: Vec<u32> = bytes
                .chunks_exact(4)
                .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect();
            if words[0] != SPIRV_MAGIC {
                return Err(ArtifactError::NotSpirV(path.to_path_buf()));
            }
            Ok(Self::SpirV(words))
        } else {
            let text = String::from_utf8(bytes)
                .map_err(|_| ArtifactError::InvalidUtf8(path.to_path_buf()))?;
            Ok(Self::Wgsl(text))
        }
    }

    pub(crate) fn into_shader_source(self) -> wgpu::ShaderSource<'static> {
        match self {
            Self::SpirV(words) => wgpu::ShaderSource::SpirV(Cow::Owned(words)),
            Self::Wgsl(text) => wgpu::ShaderSource::Wgsl(Cow::Owned(text)),
        }
    }
}
