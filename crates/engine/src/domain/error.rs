// crates/engine/src/domain/error.rs
use thiserror::Error;

use super::capture::CaptureError;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("configuration: {0}")]
  Config(String),

  /// Input rejected locally, before anything reaches the network layer.
  #[error("validation: {0}")]
  Validation(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  Toml(#[from] toml::de::Error),

  #[cfg(feature = "http")]
  #[error(transparent)]
  Transport(#[from] reqwest::Error),

  #[error("service returned HTTP {status}: {body}")]
  ServiceStatus { status: u16, body: String },

  #[error("{name} is too large ({size} bytes, limit {limit})")]
  MediaTooLarge { name: String, size: u64, limit: u64 },

  #[error(transparent)]
  Capture(#[from] CaptureError),

  #[error("a submission is already in progress")]
  Busy,

  /// The session was reset while the submission was in flight.
  #[error("submission was reset before it finished")]
  Cancelled,

  // Raised instead of unwinding across the FFI boundary.
  #[error("internal panic: {0}")]
  Panic(String),
}

impl EngineError {
  /// True for failures that happened before any request was sent.
  pub fn is_local(&self) -> bool {
    matches!(
      self,
      EngineError::Validation(_) | EngineError::Busy | EngineError::Capture(_)
    )
  }
}

pub type EngineResult<T> = Result<T, EngineError>;
