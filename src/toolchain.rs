//! External shader compiler invocation (GLSL → SPIR-V).

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Errors from the external shader compiler step.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    #[error("shader compiler not found: {0}")]
    CompilerNotFound(PathBuf),
    #[error("shader compiler exited with {status}: {stderr}")]
    CompileFailed { status: i32, stderr: String },
    #[error("shader compiler succeeded but produced no artifact at {0}")]
    EmptyArtifact(PathBuf),
    #[error("I/O error running shader compiler: {0}")]
    Io(#[from] io::Error),
}

/// Where to find the external compiler toolchain.
///
/// Deployment concerns like SDK install locations belong to the caller;
/// the default resolves `glslangValidator` through `PATH`.
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    pub compiler: PathBuf,
    pub extra_args: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("glslangValidator"),
            extra_args: Vec::new(),
        }
    }
}

impl ToolchainConfig {
    pub fn with_compiler(compiler: impl Into<PathBuf>) -> Self {
        Self {
            compiler: compiler.into(),
            ..Self::default()
        }
    }

    /// Compile a shader source file to a SPIR-V artifact next to it.
    ///
    /// The artifact path is the source path with a `.spv` extension.
    /// Re-invoking overwrites any previous artifact.
    pub fn compile(&self, source: &Path) -> Result<PathBuf, ToolchainError> {
        let artifact = source.with_extension("spv");

        log::debug!(
            "compiling {} -> {} with {}",
            source.display(),
            artifact.display(),
            self.compiler.display()
        );

        let output = Command::new(&self.compiler)
            .args(&self.extra_args)
            .arg("-V")
            .arg(source)
            .arg("-o")
            .arg(&artifact)
            .output()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    ToolchainError::CompilerNotFound(self.compiler.clone())
                } else {
                    ToolchainError::Io(e)
                }
            })?;

        if !output.status.success() {
            // glslangValidator reports syntax errors on stdout.
            let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                stderr = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            return Err(ToolchainError::CompileFailed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        let len = std::fs::metadata(&artifact).map(|m| m.len()).unwrap_or(0);
        if len == 0 {
            return Err(ToolchainError::EmptyArtifact(artifact));
        }

        log::info!("compiled shader artifact {} ({} bytes)", artifact.display(), len);
        Ok(artifact)
    }
}
