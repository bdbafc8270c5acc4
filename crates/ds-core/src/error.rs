use thiserror::Error;

/// Failures reported by a document surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// A snapshot could not be decoded back into a document.
    #[error("snapshot decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}
