use std::path::PathBuf;

use zeroize::Zeroize;

use super::core::MediaKind;
use crate::domain::content_detection::{
    detect_extension_from_bytes, extension_from_path, extension_to_mime_type,
};

/// Extension used when the format cannot be determined. The mobile shells
/// hand over camera frames as JPEG.
pub const FALLBACK_EXTENSION: &str = "jpg";

/// Where the bytes of a captured image live.
///
/// ## Memory Considerations
/// - `Path`: what camera and gallery APIs usually hand back (a file in the
///   app cache). Read lazily at submit time.
/// - `Bytes`: frames already in memory. Buffers are zeroized on drop since
///   selfies and identity documents are personal data.
///
/// Wiping covers only the buffer owned here. Not `Clone`; the session shares
/// media through `Arc`. The copy handed to the HTTP client for upload (and
/// anything the OS or the caller kept) is outside the engine's reach.
pub enum MediaSource {
    Path(PathBuf),
    Bytes { data: Vec<u8> },
}

impl MediaSource {
    /// Image extension detected from content, then from the file name.
    pub fn detect_extension(&self) -> Option<&'static str> {
        match self {
            MediaSource::Bytes { data } => detect_extension_from_bytes(data),
            MediaSource::Path(path) => extension_from_path(path),
        }
    }
}

impl std::fmt::Debug for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            MediaSource::Bytes { data } => f.debug_struct("Bytes")
                .field("data_len", &data.len())
                .finish(),
        }
    }
}

impl Drop for MediaSource {
    fn drop(&mut self) {
        if let MediaSource::Bytes { data } = self {
            data.zeroize();
        }
    }
}

/// One user-supplied image (the selfie or the identity document).
///
/// Immutable once built; a new capture of the same kind replaces it.
#[derive(Debug)]
pub struct CapturedMedia {
    kind: MediaKind,
    source: MediaSource,
    mime_type: String,
    name: String,
}

impl CapturedMedia {
    /// Wrap a source, naming it `<kind>.<ext>` with the detected image type.
    pub fn new(kind: MediaKind, source: MediaSource) -> Self {
        let ext = source.detect_extension().unwrap_or(FALLBACK_EXTENSION);
        Self {
            kind,
            mime_type: extension_to_mime_type(ext).to_string(),
            name: format!("{}.{}", kind.field_name(), ext),
            source,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Display and upload file name, e.g. `document.png`.
    pub fn name(&self) -> &str {
        &self.name
    }
}
