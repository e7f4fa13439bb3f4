use std::path::PathBuf;

/// Failures in the canvas/output adapter layer. Degenerate geometry is never
/// an error; only surface allocation and artifact persistence can fail.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to create {path}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode PNG")]
    Encode(#[from] png::EncodingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
