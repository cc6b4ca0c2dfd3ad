//! Tests for the external shader compiler invocation.
//!
//! Uses stub compiler scripts so no real Vulkan SDK is required.

use voluma::{ToolchainConfig, ToolchainError};

#[test]
fn test_missing_compiler_is_reported() {
    let toolchain = ToolchainConfig::with_compiler("/nonexistent/glslangValidator");
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("kernel.comp");
    std::fs::write(&source, "void main() {}").unwrap();

    let result = toolchain.compile(&source);
    assert!(matches!(result, Err(ToolchainError::CompilerNotFound(_))));
}

#[cfg(unix)]
mod stub_compiler {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write an executable stub that stands in for glslangValidator.
    /// The real invocation is `<compiler> -V <source> -o <artifact>`,
    /// so the artifact path arrives as `$4`.
    fn write_stub(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("stub-glslang");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn write_source(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("kernel.comp");
        std::fs::write(&path, "void main() {}").unwrap();
        path
    }

    #[test]
    fn test_successful_compile_yields_spv_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = write_stub(&dir, "printf 'spirv-bytes' > \"$4\"");
        let source = write_source(&dir);

        let toolchain = ToolchainConfig::with_compiler(&compiler);
        let artifact = toolchain.compile(&source).expect("compile failed");

        assert_eq!(artifact, source.with_extension("spv"));
        assert!(std::fs::metadata(&artifact).unwrap().len() > 0);
    }

    #[test]
    fn test_recompile_overwrites_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = write_stub(&dir, "printf 'spirv-bytes' > \"$4\"");
        let source = write_source(&dir);

        let toolchain = ToolchainConfig::with_compiler(&compiler);
        let first = toolchain.compile(&source).unwrap();
        let second = toolchain.compile(&source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compiler_failure_captures_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = write_stub(&dir, "echo 'ERROR: syntax error' >&2; exit 1");
        let source = write_source(&dir);

        let toolchain = ToolchainConfig::with_compiler(&compiler);
        match toolchain.compile(&source) {
            Err(ToolchainError::CompileFailed { status, stderr }) => {
                assert_eq!(status, 1);
                assert!(stderr.contains("syntax error"));
            }
            other => panic!("expected CompileFailed, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_compiler_failure_falls_back_to_stdout() {
        // glslangValidator reports syntax errors on stdout
        let dir = tempfile::tempdir().unwrap();
        let compiler = write_stub(&dir, "echo 'kernel.comp:1: unexpected token'; exit 2");
        let source = write_source(&dir);

        let toolchain = ToolchainConfig::with_compiler(&compiler);
        match toolchain.compile(&source) {
            Err(ToolchainError::CompileFailed { status, stderr }) => {
                assert_eq!(status, 2);
                assert!(stderr.contains("unexpected token"));
            }
            other => panic!("expected CompileFailed, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_silent_success_without_artifact_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = write_stub(&dir, "exit 0");
        let source = write_source(&dir);

        let toolchain = ToolchainConfig::with_compiler(&compiler);
        assert!(matches!(
            toolchain.compile(&source),
            Err(ToolchainError::EmptyArtifact(_))
        ));
    }

    #[test]
    fn test_extra_args_are_passed_before_source() {
        // stub writes its own argv to the artifact so we can inspect it
        let dir = tempfile::tempdir().unwrap();
        let compiler = write_stub(&dir, "echo \"$@\" > \"$6\"");
        let source = write_source(&dir);

        let mut toolchain = ToolchainConfig::with_compiler(&compiler);
        toolchain.extra_args = vec!["--target-env".into(), "vulkan1.1".into()];

        let artifact = toolchain.compile(&source).expect("compile failed");
        let argv = std::fs::read_to_string(&artifact).unwrap();
        assert!(argv.starts_with("--target-env vulkan1.1 -V"));
    }
}
