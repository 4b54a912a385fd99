// crates/engine/src/domain/verify.rs
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reason shown for any failed submission; the cause only goes to the logs.
pub const GENERIC_FAILURE_REASON: &str = "Verification failed";

fn null_as_empty<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(de)?.unwrap_or_default())
}

/// Body of `POST /check-quality`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QualityReport {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub document_feedback: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub selfie_feedback: Vec<String>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.document_feedback.is_empty() && self.selfie_feedback.is_empty()
    }
}

/// Face-match indicator. Older backends send a bare bool, newer ones an
/// object with a `match` flag plus matcher details.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FaceMatch {
    Flag(bool),
    Detail(FaceMatchDetail),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FaceMatchDetail {
    #[serde(rename = "match", default)]
    pub is_match: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FaceMatch {
    pub fn is_match(&self) -> bool {
        match self {
            FaceMatch::Flag(b) => *b,
            FaceMatch::Detail(d) => d.is_match,
        }
    }
}

// Per-field leniency for `/verify`: a value of the wrong shape reads as
// absent instead of failing the whole body.
fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(de)?;
    Ok(serde_json::from_value(value).ok())
}

// Numbers may also arrive as numeric strings (`"91.5"`).
fn lenient_number<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Body of `POST /verify`.
///
/// Must be a JSON object; inside it every field is optional and tolerant of
/// unexpected types.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VerifyResponse {
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub face_match: Option<FaceMatch>,
    #[serde(default, deserialize_with = "lenient")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub age: Option<f64>,
    /// Extracted from the document by OCR; not surfaced in the result.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_adult: Option<bool>,
}

/// Outcome of a completed submission. Exactly one variant is current after
/// a submission ends; an idle session has none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerificationResult {
    /// The quality gate rejected one or both images; nothing was verified.
    FeedbackRequired {
        document_issues: Vec<String>,
        selfie_issues: Vec<String>,
    },
    Verified {
        similarity_score: f64,
        is_match: bool,
        date_of_birth: String,
        age: u32,
    },
    Failed {
        reason: String,
    },
}

impl VerificationResult {
    pub fn failed() -> Self {
        VerificationResult::Failed { reason: GENERIC_FAILURE_REASON.to_string() }
    }

    /// Verified and the faces matched.
    pub fn is_positive_match(&self) -> bool {
        matches!(self, VerificationResult::Verified { is_match: true, .. })
    }
}

/// What to do after the quality gate answered.
#[derive(Debug, Clone, PartialEq)]
pub enum QualityDecision {
    Proceed,
    Reject {
        document_issues: Vec<String>,
        selfie_issues: Vec<String>,
    },
}

impl QualityDecision {
    pub fn into_result(self) -> Option<VerificationResult> {
        match self {
            QualityDecision::Proceed => None,
            QualityDecision::Reject { document_issues, selfie_issues } => {
                Some(VerificationResult::FeedbackRequired { document_issues, selfie_issues })
            }
        }
    }
}

/// Any issue on either image stops the flow before verification.
pub fn assess_quality(report: QualityReport) -> QualityDecision {
    if report.is_clean() {
        QualityDecision::Proceed
    } else {
        QualityDecision::Reject {
            document_issues: report.document_feedback,
            selfie_issues: report.selfie_feedback,
        }
    }
}

/// Map a successful verification body onto the result shown to the user.
pub fn interpret_verification(resp: VerifyResponse) -> VerificationResult {
    let age = resp.age.filter(|a| a.is_finite() && *a > 0.0).unwrap_or(0.0);
    VerificationResult::Verified {
        similarity_score: resp.confidence.filter(|c| c.is_finite()).unwrap_or(0.0),
        is_match: resp.face_match.as_ref().map(FaceMatch::is_match).unwrap_or(false),
        date_of_birth: resp.dob.unwrap_or_default(),
        age: age.floor() as u32,
    }
}
