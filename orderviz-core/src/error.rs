use thiserror::Error;

/// Errors raised while setting up a sketch
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    #[error("unknown mode `{0}` (expected one of: tentacle, trs, tsr, rts)")]
    UnknownMode(String),

    #[error("unknown object `{0}` (expected one of: rect, rotating-rects, side-rect, box, rotating-box)")]
    UnknownObject(String),

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("invalid size `{0}` (expected WIDTHxHEIGHT)")]
    InvalidSize(String),
}

pub type Result<T> = std::result::Result<T, SketchError>;
