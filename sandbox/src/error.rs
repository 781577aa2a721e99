//! Error types for the sandbox core.

use std::path::PathBuf;

use thiserror::Error;

/// Faults reported by the simulation engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// The engine could not build a convex polygon from the given vertices.
    #[error("degenerate polygon: {vertices:?}")]
    DegeneratePolygon {
        /// Vertices relative to the body origin, in world units
        vertices: [[f32; 2]; 4],
    },

    /// A handle that does not (or no longer) refer to a live body.
    #[error("unknown body handle {handle}")]
    UnknownBody {
        /// Debug rendering of the offending handle
        handle: String,
    },
}

/// Top-level error for configuration, frame sources and the sync loop.
#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid recording: {0}")]
    InvalidRecording(String),

    #[error("frame source produced no frames")]
    EmptySource,

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}
