// crates/engine/src/domain/service.rs

use std::sync::Arc;

use async_trait::async_trait;

use super::classify::Prediction;
use super::error::EngineResult;
use super::types::CapturedMedia;
use super::verify::{QualityReport, VerifyResponse};

/// Remote identity-verification backend (HTTP today, fakes in tests).
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// `POST /check-quality` with both images.
    async fn check_quality(
        &self,
        selfie: &CapturedMedia,
        document: &CapturedMedia,
    ) -> EngineResult<QualityReport>;

    /// `POST /verify` with both images.
    async fn verify(
        &self,
        selfie: &CapturedMedia,
        document: &CapturedMedia,
    ) -> EngineResult<VerifyResponse>;
}

/// Remote text and URL classifiers.
#[async_trait]
pub trait ClassifierService: Send + Sync {
    async fn predict_message(&self, text: &str) -> EngineResult<Prediction>;
    async fn predict_url(&self, url: &str) -> EngineResult<Prediction>;
}

#[async_trait]
impl<T: VerificationService + ?Sized> VerificationService for Arc<T> {
    async fn check_quality(
        &self,
        selfie: &CapturedMedia,
        document: &CapturedMedia,
    ) -> EngineResult<QualityReport> {
        (**self).check_quality(selfie, document).await
    }

    async fn verify(
        &self,
        selfie: &CapturedMedia,
        document: &CapturedMedia,
    ) -> EngineResult<VerifyResponse> {
        (**self).verify(selfie, document).await
    }
}

#[async_trait]
impl<T: ClassifierService + ?Sized> ClassifierService for Arc<T> {
    async fn predict_message(&self, text: &str) -> EngineResult<Prediction> {
        (**self).predict_message(text).await
    }

    async fn predict_url(&self, url: &str) -> EngineResult<Prediction> {
        (**self).predict_url(url).await
    }
}
