use thiserror::Error;

/// Failures a render surface can report to its engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    /// The page structure the surface attaches to does not exist yet. Retried
    /// on the next spawn or frame.
    #[error("surface not ready: {0}")]
    NotReady(&'static str),
    /// The rendering context could not be obtained. The engine stops drawing
    /// and spawning for the rest of its life.
    #[error("surface unavailable: {0}")]
    Unavailable(String),
}
