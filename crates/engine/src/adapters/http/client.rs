//! HTTP client for the verification and classification endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::constants::*;
use super::multipart::build_media_form;
use crate::adapters::url_validation::endpoint_url;
use crate::domain::classify::Prediction;
use crate::domain::error::{EngineError, EngineResult};
use crate::domain::service::{ClassifierService, VerificationService};
use crate::domain::types::{CapturedMedia, ServiceConfig};
use crate::domain::verify::{QualityReport, VerifyResponse};

/// Talks to the remote services described by a [`ServiceConfig`].
///
/// The underlying `reqwest::Client` (and its connection pool) is built once
/// and reused for every call.
#[derive(Debug, Clone)]
pub struct HttpService {
  client: Client,
  base: Url,
  classifier_base: Url,
  max_media_size: u64,
}

impl HttpService {
  pub fn new(config: &ServiceConfig) -> EngineResult<Self> {
    let base = config.base_url()?;
    let classifier_base = config.classifier_url()?;
    let mut builder = Client::builder();
    if let Some(timeout) = config.limits.request_timeout() {
      builder = builder.timeout(timeout);
    }
    let client = builder.build()?;
    Ok(Self {
      client,
      base,
      classifier_base,
      max_media_size: config.limits.max_media_size,
    })
  }

  pub fn base_url(&self) -> &Url {
    &self.base
  }

  pub fn classifier_url(&self) -> &Url {
    &self.classifier_base
  }

  async fn post_media(
    &self,
    path: &str,
    selfie: &CapturedMedia,
    document: &CapturedMedia,
  ) -> EngineResult<Response> {
    let url = endpoint_url(&self.base, path)?;
    let form = build_media_form(selfie, document, self.max_media_size).await?;
    debug!(%url, selfie = selfie.name(), document = document.name(), "uploading media");
    Ok(self.client.post(url).multipart(form).send().await?)
  }

  async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> EngineResult<Response> {
    let url = endpoint_url(&self.classifier_base, path)?;
    debug!(%url, "posting json");
    Ok(self.client.post(url).json(body).send().await?)
  }
}

/// Turn a response into `T`, mapping non-2xx statuses to
/// [`EngineError::ServiceStatus`].
pub async fn decode_response<T: DeserializeOwned>(resp: Response) -> EngineResult<T> {
  let status = resp.status();
  if !status.is_success() {
    let body: String = resp
      .text()
      .await
      .unwrap_or_default()
      .chars()
      .take(MAX_ERROR_BODY_CHARS)
      .collect();
    return Err(EngineError::ServiceStatus { status: status.as_u16(), body });
  }
  let bytes = resp.bytes().await?;
  Ok(serde_json::from_slice(&bytes)?)
}

#[derive(Serialize)]
struct MessageBody<'a> {
  text: &'a str,
}

#[derive(Serialize)]
struct UrlBody<'a> {
  url: &'a str,
}

#[async_trait]
impl VerificationService for HttpService {
  async fn check_quality(
    &self,
    selfie: &CapturedMedia,
    document: &CapturedMedia,
  ) -> EngineResult<QualityReport> {
    let resp = self.post_media(CHECK_QUALITY_PATH, selfie, document).await?;
    decode_response(resp).await
  }

  async fn verify(
    &self,
    selfie: &CapturedMedia,
    document: &CapturedMedia,
  ) -> EngineResult<VerifyResponse> {
    let resp = self.post_media(VERIFY_PATH, selfie, document).await?;
    decode_response(resp).await
  }
}

#[async_trait]
impl ClassifierService for HttpService {
  async fn predict_message(&self, text: &str) -> EngineResult<Prediction> {
    let resp = self.post_json(PREDICT_MESSAGE_PATH, &MessageBody { text }).await?;
    decode_response(resp).await
  }

  async fn predict_url(&self, url: &str) -> EngineResult<Prediction> {
    let resp = self.post_json(PREDICT_URL_PATH, &UrlBody { url }).await?;
    decode_response(resp).await
  }
}
