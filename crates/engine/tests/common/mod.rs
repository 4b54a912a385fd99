#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{ImageBuffer, Rgb};
use scamshield_engine as se;
use se::domain::error::{EngineError, EngineResult};

/// Create a tiny RGB JPEG image and return its bytes.
pub fn make_test_jpeg_bytes() -> Vec<u8> {
    encode(image::ImageOutputFormat::Jpeg(80))
}

/// Same image, PNG encoded (documents picked from the gallery are often PNG).
pub fn make_test_png_bytes() -> Vec<u8> {
    encode(image::ImageOutputFormat::Png)
}

fn encode(format: image::ImageOutputFormat) -> Vec<u8> {
    // 8x8 solid color image
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(8, 8, |_x, _y| Rgb([128, 200, 50]));
    let dynimg = image::DynamicImage::ImageRgb8(img);
    let mut out: Vec<u8> = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut out);
    dynimg.write_to(&mut cursor, format).expect("image encode");
    out
}

pub fn jpeg_source() -> se::MediaSource {
    se::MediaSource::Bytes { data: make_test_jpeg_bytes() }
}

pub fn png_source() -> se::MediaSource {
    se::MediaSource::Bytes { data: make_test_png_bytes() }
}

pub fn quality(document: &[&str], selfie: &[&str]) -> se::QualityReport {
    se::QualityReport {
        document_feedback: document.iter().map(|s| s.to_string()).collect(),
        selfie_feedback: selfie.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn verify_body(json: serde_json::Value) -> se::VerifyResponse {
    serde_json::from_value(json).expect("verify body")
}

/// What a fake service saw for one image of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenMedia {
    pub name: String,
    pub mime_type: String,
    pub payload: Vec<u8>,
}

impl SeenMedia {
    fn of(m: &se::CapturedMedia) -> Self {
        let payload = match m.source() {
            se::MediaSource::Bytes { data } => data.clone(),
            se::MediaSource::Path(p) => p.to_string_lossy().as_bytes().to_vec(),
        };
        Self { name: m.name().to_string(), mime_type: m.mime_type().to_string(), payload }
    }
}

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    /// Connection-level failure, as if the host were unreachable.
    NetworkDown,
    /// Non-2xx answer from the service.
    Status(u16),
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> EngineResult<T> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::NetworkDown => Err(EngineError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            Reply::Status(status) => Err(EngineError::ServiceStatus { status: *status, body: "boom".into() }),
        }
    }
}

/// Scripted verification backend that counts and records every call.
pub struct FakeVerificationService {
    quality: Reply<se::QualityReport>,
    verify: Reply<se::VerifyResponse>,
    pub quality_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
    pub quality_seen: Mutex<Vec<(SeenMedia, SeenMedia)>>,
    pub verify_seen: Mutex<Vec<(SeenMedia, SeenMedia)>>,
}

impl FakeVerificationService {
    pub fn new(quality: Reply<se::QualityReport>, verify: Reply<se::VerifyResponse>) -> Arc<Self> {
        Arc::new(Self {
            quality,
            verify,
            quality_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            quality_seen: Mutex::new(Vec::new()),
            verify_seen: Mutex::new(Vec::new()),
        })
    }

    pub fn quality_count(&self) -> usize {
        self.quality_calls.load(Ordering::SeqCst)
    }

    pub fn verify_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        self.quality_count() + self.verify_count()
    }
}

#[async_trait]
impl se::VerificationService for FakeVerificationService {
    async fn check_quality(
        &self,
        selfie: &se::CapturedMedia,
        document: &se::CapturedMedia,
    ) -> EngineResult<se::QualityReport> {
        self.quality_calls.fetch_add(1, Ordering::SeqCst);
        self.quality_seen.lock().unwrap().push((SeenMedia::of(selfie), SeenMedia::of(document)));
        self.quality.produce()
    }

    async fn verify(
        &self,
        selfie: &se::CapturedMedia,
        document: &se::CapturedMedia,
    ) -> EngineResult<se::VerifyResponse> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verify_seen.lock().unwrap().push((SeenMedia::of(selfie), SeenMedia::of(document)));
        self.verify.produce()
    }
}

/// Scripted classifier backend.
pub struct FakeClassifier {
    pub reply: Reply<String>,
    pub calls: AtomicUsize,
    pub last_input: Mutex<Option<String>>,
}

impl FakeClassifier {
    pub fn new(reply: Reply<String>) -> Self {
        Self { reply, calls: AtomicUsize::new(0), last_input: Mutex::new(None) }
    }

    fn answer(&self, input: &str) -> EngineResult<se::Prediction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input.to_string());
        self.reply.produce().map(|prediction| se::Prediction { prediction })
    }
}

#[async_trait]
impl se::ClassifierService for FakeClassifier {
    async fn predict_message(&self, text: &str) -> EngineResult<se::Prediction> {
        self.answer(text)
    }

    async fn predict_url(&self, url: &str) -> EngineResult<se::Prediction> {
        self.answer(url)
    }
}

/// Camera that returns a fixed frame, or fails when `frame` is `None`.
pub struct StubCamera {
    pub frame: Option<Vec<u8>>,
    pub shots: usize,
}

impl se::Camera for StubCamera {
    fn capture_still(&mut self) -> Result<se::MediaSource, se::CaptureError> {
        self.shots += 1;
        match &self.frame {
            Some(data) => Ok(se::MediaSource::Bytes { data: data.clone() }),
            None => Err(se::CaptureError::Unavailable("no front camera".into())),
        }
    }
}

/// Picker returning a scripted outcome.
pub enum StubPicker {
    /// Hands back these bytes on every pick.
    Picks(Vec<u8>),
    Cancels,
    Fails,
}

impl se::MediaPicker for StubPicker {
    fn pick_image(&mut self) -> Result<Option<se::MediaSource>, se::CaptureError> {
        match self {
            StubPicker::Picks(data) => Ok(Some(se::MediaSource::Bytes { data: data.clone() })),
            StubPicker::Cancels => Ok(None),
            StubPicker::Fails => Err(se::CaptureError::PermissionDenied("photo library")),
        }
    }
}

pub type Session = se::VerificationOrchestrator<Arc<FakeVerificationService>, Arc<se::NotificationLog>>;

/// Orchestrator over a fake service with a shared notification log.
pub fn session(service: &Arc<FakeVerificationService>) -> (Session, Arc<se::NotificationLog>) {
    let log = Arc::new(se::NotificationLog::new());
    (se::VerificationOrchestrator::new(Arc::clone(service), Arc::clone(&log)), log)
}

pub fn texts(log: &se::NotificationLog) -> Vec<String> {
    log.drain().into_iter().map(|n| n.text).collect()
}
