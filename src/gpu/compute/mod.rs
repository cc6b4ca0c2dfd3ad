//! Volumetric compute dispatch.
//!
//! This module owns the session object that executes one generator kernel
//! over a `width × height × depth` grid and hands the written buffer back
//! to the host.

mod artifact;
mod buffers;
mod params;
mod pipelines;

pub mod generators;
pub mod session;

pub use artifact::{ArtifactError, ShaderArtifact};
pub use session::{ComputeSession, ResultView, SessionError, WORKGROUP_SIZE};
