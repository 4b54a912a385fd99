//! Identity verification flow: capture a selfie and a document, run the
//! quality gate, and only then ask for face matching.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::capture::{Camera, MediaPicker};
use crate::domain::error::{EngineError, EngineResult};
use crate::domain::notify::{feedback_notifications, messages, Notification, Notifier};
use crate::domain::service::VerificationService;
use crate::domain::types::{CapturedMedia, MediaKind, MediaSource, SubmissionState};
use crate::domain::verify::{assess_quality, interpret_verification, VerificationResult};

/// Owns the two media slots, the run state and the last result of one
/// verification screen.
///
/// `submit` takes `&mut self`, so at most one submission runs per session.
/// Hosts that share a session across threads drive the same flow in three
/// steps instead (`begin_submission`, [`Submission::run`],
/// `finish_submission`) and only hold their lock around the first and last.
/// A submission abandoned mid-flight leaves the session in `Submitting`;
/// further submits answer [`EngineError::Busy`] until `reset`. There is no
/// built-in timeout unless [`crate::LimitsConfig`] sets one.
pub struct VerificationOrchestrator<S, N> {
    service: S,
    notifier: N,
    selfie: Option<Arc<CapturedMedia>>,
    document: Option<Arc<CapturedMedia>>,
    state: SubmissionState,
    result: Option<VerificationResult>,
    // Bumped by every begin and every reset; stale submissions are dropped.
    epoch: u64,
}

/// Both images of one submission, captured when it began.
#[derive(Debug)]
pub struct Submission {
    epoch: u64,
    selfie: Arc<CapturedMedia>,
    document: Arc<CapturedMedia>,
}

impl Submission {
    pub fn selfie(&self) -> &CapturedMedia {
        &self.selfie
    }

    pub fn document(&self) -> &CapturedMedia {
        &self.document
    }

    /// The remote half of a submission. Transport, status and decoding
    /// errors are logged and turned into [`VerificationResult::Failed`].
    pub async fn run<S>(&self, service: &S) -> VerificationResult
    where
        S: VerificationService + ?Sized,
    {
        match run_exchange(service, &self.selfie, &self.document).await {
            Ok(result) => result,
            Err(e) => {
                error!(submission = self.epoch, error = %e, "verification submission failed");
                VerificationResult::failed()
            }
        }
    }
}

impl<S, N> VerificationOrchestrator<S, N>
where
    S: VerificationService,
    N: Notifier,
{
    pub fn new(service: S, notifier: N) -> Self {
        Self {
            service,
            notifier,
            selfie: None,
            document: None,
            state: SubmissionState::Idle,
            result: None,
            epoch: 0,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        self.result.as_ref()
    }

    pub fn selfie(&self) -> Option<&CapturedMedia> {
        self.selfie.as_deref()
    }

    pub fn document(&self) -> Option<&CapturedMedia> {
        self.document.as_deref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Take one frame from the camera and make it the current selfie.
    ///
    /// A camera failure is reported to the user and returned; the session
    /// itself is left exactly as it was.
    pub fn capture_selfie<C>(&mut self, camera: &mut C) -> EngineResult<()>
    where
        C: Camera + ?Sized,
    {
        match camera.capture_still() {
            Ok(source) => {
                self.set_selfie(source);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "selfie capture failed");
                self.notifier.notify(Notification::error(messages::CAMERA_UNAVAILABLE));
                Err(e.into())
            }
        }
    }

    /// Store an already captured frame as the selfie, replacing any previous one.
    pub fn set_selfie(&mut self, source: MediaSource) {
        let media = CapturedMedia::new(MediaKind::Selfie, source);
        info!(name = media.name(), mime = media.mime_type(), "selfie set");
        self.selfie = Some(Arc::new(media));
        self.notifier.notify(Notification::success(messages::SELFIE_CAPTURED));
    }

    /// Let the user pick the identity document from the photo library.
    ///
    /// Returns `Ok(false)` when the picker was dismissed; nothing changes and
    /// nothing is shown in that case.
    pub fn pick_document<P>(&mut self, picker: &mut P) -> EngineResult<bool>
    where
        P: MediaPicker + ?Sized,
    {
        match picker.pick_image() {
            Ok(Some(source)) => {
                self.set_document(source);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                warn!(error = %e, "document pick failed");
                self.notifier.notify(Notification::error(messages::PICKER_UNAVAILABLE));
                Err(e.into())
            }
        }
    }

    /// Store a picked image as the document, replacing any previous one.
    pub fn set_document(&mut self, source: MediaSource) {
        let media = CapturedMedia::new(MediaKind::Document, source);
        info!(name = media.name(), mime = media.mime_type(), "document set");
        self.document = Some(Arc::new(media));
        self.notifier.notify(Notification::success(messages::DOCUMENT_SELECTED));
    }

    /// Run the quality gate and, if both images pass, the verification call.
    ///
    /// Errors are returned only for submissions that never started (missing
    /// media, or one already running). Remote failures end the submission
    /// with [`VerificationResult::Failed`] instead.
    pub async fn submit(&mut self) -> EngineResult<&VerificationResult> {
        let submission = self.begin_submission()?;
        let result = submission.run(&self.service).await;
        self.finish_submission(submission, result)
    }

    /// Check preconditions, enter `Submitting` and snapshot both images.
    pub fn begin_submission(&mut self) -> EngineResult<Submission> {
        if self.state.is_submitting() {
            return Err(EngineError::Busy);
        }
        let (Some(selfie), Some(document)) = (&self.selfie, &self.document) else {
            warn!(
                has_selfie = self.selfie.is_some(),
                has_document = self.document.is_some(),
                "submit without both images"
            );
            self.notifier.notify(Notification::error(messages::MISSING_MEDIA));
            return Err(EngineError::Validation(messages::MISSING_MEDIA.into()));
        };
        let submission = Submission {
            epoch: self.epoch + 1,
            selfie: Arc::clone(selfie),
            document: Arc::clone(document),
        };

        self.epoch = submission.epoch;
        self.state = SubmissionState::Submitting;
        self.result = None;
        info!(submission = submission.epoch, "submission started");
        Ok(submission)
    }

    /// Record the outcome of `submission`, notify, and move to `Completed`.
    ///
    /// Fails with [`EngineError::Cancelled`] if the session was reset after
    /// the submission began; the result is then discarded.
    pub fn finish_submission(
        &mut self,
        submission: Submission,
        result: VerificationResult,
    ) -> EngineResult<&VerificationResult> {
        if !self.state.is_submitting() || submission.epoch != self.epoch {
            warn!(submission = submission.epoch, "dropping result of a reset submission");
            return Err(EngineError::Cancelled);
        }

        match &result {
            VerificationResult::FeedbackRequired { document_issues, selfie_issues } => {
                warn!(
                    document_issues = document_issues.len(),
                    selfie_issues = selfie_issues.len(),
                    "quality gate rejected images"
                );
                for n in feedback_notifications(document_issues, selfie_issues) {
                    self.notifier.notify(n);
                }
            }
            VerificationResult::Verified { is_match, similarity_score, .. } => {
                info!(is_match, similarity_score, "verification completed");
                if *is_match {
                    self.notifier.notify(Notification::success(messages::VERIFIED));
                }
            }
            VerificationResult::Failed { .. } => {
                self.notifier.notify(Notification::error(messages::FAILED));
            }
        }

        self.state = SubmissionState::Completed;
        let result: &VerificationResult = self.result.insert(result);
        Ok(result)
    }

    /// Forget both images and the result. Safe to call repeatedly.
    pub fn reset(&mut self) {
        if self.state.is_submitting() {
            warn!("resetting an interrupted submission");
        }
        self.selfie = None;
        self.document = None;
        self.result = None;
        self.state = SubmissionState::Idle;
        self.epoch += 1;
        info!("session reset");
    }
}

/// The two remote calls. A quality rejection is a normal outcome, not an error.
async fn run_exchange<S>(
    service: &S,
    selfie: &CapturedMedia,
    document: &CapturedMedia,
) -> EngineResult<VerificationResult>
where
    S: VerificationService + ?Sized,
{
    let report = service.check_quality(selfie, document).await?;
    if let Some(rejected) = assess_quality(report).into_result() {
        return Ok(rejected);
    }
    let resp = service.verify(selfie, document).await?;
    Ok(interpret_verification(resp))
}
