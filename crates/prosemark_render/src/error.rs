//! Render gateway error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from rendering a document or probing the renderer.
///
/// Every variant is terminal for the current document only; batch callers
/// continue with the remaining documents.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum RenderError {
    /// Network-level failure constructing or sending the render request.
    #[error("render request for {} failed: {source}", .path.display())]
    Transport {
        /// Document whose render failed.
        path: PathBuf,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The renderer answered with a non-success status. The renderer is
    /// assumed deterministic, so the rejection is terminal; a retry would
    /// not change the outcome.
    #[error("renderer rejected {} with status {status}", .path.display())]
    Rejected {
        /// Document the renderer rejected.
        path: PathBuf,
        /// Status code the renderer answered with.
        status: reqwest::StatusCode,
    },

    /// The pre-built HTML artifact could not be read.
    #[error("failed to read built artifact {}: {source}", .path.display())]
    ArtifactRead {
        /// Artifact path that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The readiness probe deadline elapsed before the renderer accepted
    /// a connection.
    #[error("renderer at {address} failed to start")]
    ProbeTimeout {
        /// Address that never became reachable.
        address: String,
    },
}
