use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use scamshield_engine as se;
use scamshield_engine::domain::error::EngineError;

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    /// Rejected locally; show `message` to the user as-is.
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    Generic { message: String },
}

impl From<EngineError> for FfiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Validation(message) => FfiError::Validation { message },
            other => FfiError::Generic { message: other.to_string() },
        }
    }
}

impl From<anyhow::Error> for FfiError {
    fn from(e: anyhow::Error) -> Self {
        FfiError::Generic { message: format!("{e:#}") }
    }
}

// ===== FFI types mirroring the public Rust API (FFI-friendly) =====

#[derive(uniffi::Record, Debug, Clone, Copy)]
pub struct FfiLimitsConfig {
    pub max_media_size: u64,
    pub request_timeout_secs: Option<u64>,
}

impl From<FfiLimitsConfig> for se::LimitsConfig {
    fn from(v: FfiLimitsConfig) -> Self {
        se::LimitsConfig { max_media_size: v.max_media_size, request_timeout_secs: v.request_timeout_secs }
    }
}

impl From<se::LimitsConfig> for FfiLimitsConfig {
    fn from(v: se::LimitsConfig) -> Self {
        FfiLimitsConfig { max_media_size: v.max_media_size, request_timeout_secs: v.request_timeout_secs }
    }
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiServiceConfig {
    pub base_host: String,
    pub classifier_host: String,
    pub allow_insecure_http: bool,
    pub limits: FfiLimitsConfig,
}

impl From<FfiServiceConfig> for se::ServiceConfig {
    fn from(v: FfiServiceConfig) -> Self {
        se::ServiceConfig {
            base_host: v.base_host,
            classifier_host: v.classifier_host,
            allow_insecure_http: v.allow_insecure_http,
            limits: v.limits.into(),
        }
    }
}

impl From<se::ServiceConfig> for FfiServiceConfig {
    fn from(v: se::ServiceConfig) -> Self {
        FfiServiceConfig {
            base_host: v.base_host,
            classifier_host: v.classifier_host,
            allow_insecure_http: v.allow_insecure_http,
            limits: v.limits.into(),
        }
    }
}

#[derive(uniffi::Enum, Debug, Clone)]
pub enum FfiMediaSource { Path(String), Bytes(Vec<u8>) }

impl From<FfiMediaSource> for se::MediaSource {
    fn from(v: FfiMediaSource) -> Self {
        match v {
            FfiMediaSource::Path(p) => se::MediaSource::Path(PathBuf::from(p)),
            FfiMediaSource::Bytes(b) => se::MediaSource::Bytes { data: b },
        }
    }
}

#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiSubmissionState { Idle, Submitting, Completed }

impl From<se::SubmissionState> for FfiSubmissionState {
    fn from(v: se::SubmissionState) -> Self {
        match v {
            se::SubmissionState::Idle => FfiSubmissionState::Idle,
            se::SubmissionState::Submitting => FfiSubmissionState::Submitting,
            se::SubmissionState::Completed => FfiSubmissionState::Completed,
        }
    }
}

#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiNotificationLevel { Success, Info, Error }

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiNotification {
    pub level: FfiNotificationLevel,
    pub text: String,
}

impl From<se::Notification> for FfiNotification {
    fn from(n: se::Notification) -> Self {
        let level = match n.level {
            se::NotificationLevel::Success => FfiNotificationLevel::Success,
            se::NotificationLevel::Info => FfiNotificationLevel::Info,
            se::NotificationLevel::Error => FfiNotificationLevel::Error,
        };
        FfiNotification { level, text: n.text }
    }
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiMediaInfo {
    pub name: String,
    pub mime_type: String,
}

impl From<&se::CapturedMedia> for FfiMediaInfo {
    fn from(m: &se::CapturedMedia) -> Self {
        FfiMediaInfo { name: m.name().to_string(), mime_type: m.mime_type().to_string() }
    }
}

// ===== Verification result mappings =====

#[derive(uniffi::Enum, Debug, Clone, PartialEq)]
pub enum FfiVerificationResult {
    FeedbackRequired { document_issues: Vec<String>, selfie_issues: Vec<String> },
    Verified { similarity_score: f64, is_match: bool, date_of_birth: String, age: u32 },
    Failed { reason: String },
}

impl From<se::VerificationResult> for FfiVerificationResult {
    fn from(v: se::VerificationResult) -> Self {
        match v {
            se::VerificationResult::FeedbackRequired { document_issues, selfie_issues } => {
                FfiVerificationResult::FeedbackRequired { document_issues, selfie_issues }
            }
            se::VerificationResult::Verified { similarity_score, is_match, date_of_birth, age } => {
                FfiVerificationResult::Verified { similarity_score, is_match, date_of_birth, age }
            }
            se::VerificationResult::Failed { reason } => FfiVerificationResult::Failed { reason },
        }
    }
}

#[derive(uniffi::Record, Debug, Clone, PartialEq, Eq)]
pub struct FfiVerdictReport {
    pub status: String,
    pub message: String,
    pub color: String,
}

impl From<se::VerdictReport> for FfiVerdictReport {
    fn from(r: se::VerdictReport) -> Self {
        FfiVerdictReport { status: r.status.into(), message: r.message.into(), color: r.color.into() }
    }
}

// ===== Verification session object =====

/// One verification screen. The shell captures/picks images natively and
/// hands them over; toasts are pulled with `take_notifications`.
#[derive(uniffi::Object)]
pub struct FfiVerificationSession {
    inner: Mutex<se::HttpVerificationSession<Arc<se::NotificationLog>>>,
    log: Arc<se::NotificationLog>,
}

impl FfiVerificationSession {
    fn lock(&self) -> Result<MutexGuard<'_, se::HttpVerificationSession<Arc<se::NotificationLog>>>, FfiError> {
        self.inner
            .lock()
            .map_err(|_| FfiError::from(EngineError::Panic("session mutex poisoned".into())))
    }
}

#[uniffi::export]
impl FfiVerificationSession {
    #[uniffi::constructor]
    pub fn new(config: FfiServiceConfig) -> Result<Arc<Self>, FfiError> {
        let config: se::ServiceConfig = config.into();
        let log = Arc::new(se::NotificationLog::new());
        let session = se::http_session(&config, Arc::clone(&log))?;
        Ok(Arc::new(Self { inner: Mutex::new(session), log }))
    }

    pub fn set_selfie(&self, source: FfiMediaSource) -> Result<FfiMediaInfo, FfiError> {
        let mut s = self.lock()?;
        s.set_selfie(source.into());
        s.selfie()
            .map(FfiMediaInfo::from)
            .ok_or_else(|| FfiError::Generic { message: "selfie was not stored".into() })
    }

    pub fn set_document(&self, source: FfiMediaSource) -> Result<FfiMediaInfo, FfiError> {
        let mut s = self.lock()?;
        s.set_document(source.into());
        s.document()
            .map(FfiMediaInfo::from)
            .ok_or_else(|| FfiError::Generic { message: "document was not stored".into() })
    }

    /// Blocks until both remote calls (or the first one, on rejection) finish.
    ///
    /// The session lock is only held to start and to record the submission,
    /// so `state()` reads `Submitting` meanwhile and a concurrent `submit()`
    /// fails fast as busy.
    pub fn submit(&self) -> Result<FfiVerificationResult, FfiError> {
        let (submission, service) = {
            let mut s = self.lock()?;
            let submission = s.begin_submission()?;
            (submission, s.service().clone())
        };
        let outcome = se::runtime::run_on_current_thread(async { Ok(submission.run(&service).await) });
        let mut s = self.lock()?;
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                // Never leave the session stuck in `Submitting`.
                let _ = s.finish_submission(submission, se::VerificationResult::failed());
                return Err(e.into());
            }
        };
        let result = s.finish_submission(submission, result)?;
        Ok(result.clone().into())
    }

    pub fn reset(&self) -> Result<(), FfiError> {
        self.lock()?.reset();
        Ok(())
    }

    pub fn state(&self) -> Result<FfiSubmissionState, FfiError> {
        Ok(self.lock()?.state().into())
    }

    pub fn result(&self) -> Result<Option<FfiVerificationResult>, FfiError> {
        Ok(self.lock()?.result().cloned().map(Into::into))
    }

    /// Drain pending notifications, oldest first.
    pub fn take_notifications(&self) -> Vec<FfiNotification> {
        self.log.drain().into_iter().map(Into::into).collect()
    }
}

// ===== Configuration and single-shot helpers =====

#[uniffi::export]
pub fn default_service_config() -> FfiServiceConfig {
    se::ServiceConfig::from_env().into()
}

#[uniffi::export]
pub fn load_service_config(path: String) -> Result<FfiServiceConfig, FfiError> {
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading service config {path}"))?;
    let cfg = se::ServiceConfig::from_toml_str(&raw)
        .with_context(|| format!("parsing service config {path}"))?;
    Ok(cfg.into())
}

#[uniffi::export]
pub fn classify_message_ffi(config: FfiServiceConfig, text: String) -> Result<FfiVerdictReport, FfiError> {
    let config: se::ServiceConfig = config.into();
    let service = se::HttpService::new(&config)?;
    let outcome = se::runtime::run_on_current_thread(se::classify_message(&service, &text));
    if let Err(EngineError::Validation(message)) = outcome {
        return Err(FfiError::Validation { message });
    }
    Ok(se::message_report(&outcome).into())
}

#[uniffi::export]
pub fn classify_url_ffi(config: FfiServiceConfig, url: String) -> Result<FfiVerdictReport, FfiError> {
    let config: se::ServiceConfig = config.into();
    let service = se::HttpService::new(&config)?;
    let outcome = se::runtime::run_on_current_thread(se::classify_url(&service, &url));
    if let Err(EngineError::Validation(message)) = outcome {
        return Err(FfiError::Validation { message });
    }
    Ok(se::url_report(&outcome).into())
}

/// `format` is `"human"` or `"json"`.
#[uniffi::export]
pub fn init_logging_ffi(format: String, level: String) -> Result<(), FfiError> {
    let format: se::LogFormat = format.parse()?;
    se::init_logging(format, &level);
    Ok(())
}

uniffi::setup_scaffolding!();
