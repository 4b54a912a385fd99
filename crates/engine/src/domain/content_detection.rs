//! Image format sniffing for captured media.

use std::path::Path;

/// Detect an image file extension from the leading magic bytes.
pub fn detect_extension_from_bytes(data: &[u8]) -> Option<&'static str> {
  // JPEG
  if data.len() >= 3 && data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF {
    return Some("jpg");
  }

  // PNG
  if data.len() >= 8 && data[..8] == [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A] {
    return Some("png");
  }

  // GIF
  if data.len() >= 6 && (&data[..6] == b"GIF87a" || &data[..6] == b"GIF89a") {
    return Some("gif");
  }

  // WebP
  if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
    return Some("webp");
  }

  // BMP
  if data.len() >= 2 && &data[..2] == b"BM" {
    return Some("bmp");
  }

  // TIFF
  if data.len() >= 4 && ((&data[..4] == b"II*\0") || (&data[..4] == b"MM\0*")) {
    return Some("tiff");
  }

  // HEIC/HEIF/AVIF live in an ISO-BMFF ftyp box; phones save selfies this way.
  if data.len() >= 12 && &data[4..8] == b"ftyp" {
    let brand = &data[8..12];
    if brand == b"heic" || brand == b"heix" || brand == b"mif1" {
      return Some("heic");
    }
    if brand == b"heif" {
      return Some("heif");
    }
    if brand == b"avif" {
      return Some("avif");
    }
  }

  None
}

/// Map a file name's extension onto one of the image extensions we upload.
pub fn extension_from_path(path: &Path) -> Option<&'static str> {
  let ext = path.extension()?.to_str()?.to_ascii_lowercase();
  match ext.as_str() {
    "jpg" | "jpeg" => Some("jpg"),
    "png" => Some("png"),
    "gif" => Some("gif"),
    "webp" => Some("webp"),
    "bmp" => Some("bmp"),
    "tif" | "tiff" => Some("tiff"),
    "heic" => Some("heic"),
    "heif" => Some("heif"),
    "avif" => Some("avif"),
    _ => None,
  }
}

/// Convert file extension to MIME type
pub fn extension_to_mime_type(extension: &str) -> &'static str {
  match extension {
    "jpg" | "jpeg" => "image/jpeg",
    "png" => "image/png",
    "gif" => "image/gif",
    "webp" => "image/webp",
    "bmp" => "image/bmp",
    "tiff" | "tif" => "image/tiff",
    "heic" => "image/heic",
    "heif" => "image/heif",
    "avif" => "image/avif",
    _ => "application/octet-stream",
  }
}
