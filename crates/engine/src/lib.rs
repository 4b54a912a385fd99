// crates/engine/src/lib.rs

//! Public facade for the ScamShield engine.
//! Exposes a stable API and re-exports types for consumers (mobile shells via FFI).

pub mod adapters;
pub mod domain;
pub mod logging;
pub mod orchestrator;
pub mod runtime;

/// Entry points for the two single-shot screens.
pub use domain::classify::{classify_message, classify_url, message_report, url_report};

// Re-exports for convenience
pub use domain::capture::{Camera, CaptureError, MediaPicker};
pub use domain::classify::{MessageVerdict, Prediction, UrlVerdict, VerdictReport};
pub use domain::error::{EngineError, EngineResult};
pub use domain::notify::{Notification, NotificationLevel, NotificationLog, Notifier};
pub use domain::service::{ClassifierService, VerificationService};
pub use domain::types::{
    CapturedMedia, EngineDefaults, LimitsConfig, MediaKind, MediaSource, ServiceConfig,
    SubmissionState,
};
pub use domain::verify::{FaceMatch, QualityReport, VerificationResult, VerifyResponse};
pub use logging::{init_logging, LogFormat};
pub use orchestrator::{Submission, VerificationOrchestrator};

#[cfg(feature = "http")]
pub use adapters::http::HttpService;

/// Orchestrator wired to the HTTP adapter, the usual production setup.
#[cfg(feature = "http")]
pub type HttpVerificationSession<N> = VerificationOrchestrator<HttpService, N>;

/// Build an HTTP-backed verification session from configuration.
#[cfg(feature = "http")]
pub fn http_session<N: Notifier>(
    config: &ServiceConfig,
    notifier: N,
) -> EngineResult<HttpVerificationSession<N>> {
    let service = HttpService::new(config)?;
    Ok(VerificationOrchestrator::new(service, notifier))
}
