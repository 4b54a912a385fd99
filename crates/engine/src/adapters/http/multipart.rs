use reqwest::multipart::{Form, Part};

use crate::domain::error::{EngineError, EngineResult};
use crate::domain::types::{CapturedMedia, MediaSource};

/// Read the bytes behind a piece of media, enforcing the per-image limit
/// before anything is buffered for path sources.
///
/// The returned buffer is moved into the request body and is not zeroized.
pub async fn load_media_bytes(media: &CapturedMedia, max_size: u64) -> EngineResult<Vec<u8>> {
  let too_large = |size: u64| EngineError::MediaTooLarge {
    name: media.name().to_string(),
    size,
    limit: max_size,
  };
  match media.source() {
    MediaSource::Bytes { data } => {
      let size = data.len() as u64;
      if size > max_size {
        return Err(too_large(size));
      }
      Ok(data.clone())
    }
    MediaSource::Path(path) => {
      let meta = tokio::fs::metadata(path).await?;
      if meta.len() > max_size {
        return Err(too_large(meta.len()));
      }
      Ok(tokio::fs::read(path).await?)
    }
  }
}

fn media_part(media: &CapturedMedia, bytes: Vec<u8>) -> EngineResult<Part> {
  let part = Part::bytes(bytes)
    .file_name(media.name().to_string())
    .mime_str(media.mime_type())?;
  Ok(part)
}

/// Multipart body shared by `/check-quality` and `/verify`: a `selfie` part
/// followed by a `document` part.
pub async fn build_media_form(
  selfie: &CapturedMedia,
  document: &CapturedMedia,
  max_size: u64,
) -> EngineResult<Form> {
  let selfie_bytes = load_media_bytes(selfie, max_size).await?;
  let document_bytes = load_media_bytes(document, max_size).await?;
  Ok(Form::new()
    .part(selfie.kind().field_name(), media_part(selfie, selfie_bytes)?)
    .part(document.kind().field_name(), media_part(document, document_bytes)?))
}
