//! Camera and gallery seams. The platform shell implements these; the engine
//! only sees the resulting image sources.

use thiserror::Error;

use super::types::MediaSource;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture device unavailable: {0}")]
    Unavailable(String),
    #[error("permission to use the {0} was denied")]
    PermissionDenied(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Front-facing camera able to take one still frame.
pub trait Camera {
    fn capture_still(&mut self) -> Result<MediaSource, CaptureError>;
}

/// Media-library picker restricted to images.
pub trait MediaPicker {
    /// `Ok(None)` when the user dismissed the picker.
    fn pick_image(&mut self) -> Result<Option<MediaSource>, CaptureError>;
}
