//! Text-message and URL verdicts returned by the prediction endpoints.

use serde::Deserialize;

use super::error::{EngineError, EngineResult};
use super::service::ClassifierService;

/// Body of both `/predict/message` and `/predict/url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Prediction {
    pub prediction: String,
}

/// What the UI renders for a verdict or a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictReport {
    pub status: &'static str,
    pub message: &'static str,
    /// Color hint for the status label.
    pub color: &'static str,
}

pub const MESSAGE_ERROR_REPORT: VerdictReport = VerdictReport {
    status: "ERROR",
    message: "Failed to analyze text.",
    color: "orange",
};

pub const URL_ERROR_REPORT: VerdictReport = VerdictReport {
    status: "ERROR",
    message: "Could not check URL. Please try again.",
    color: "gray",
};

pub const EMPTY_TEXT: &str = "Please enter some text first";
pub const EMPTY_URL: &str = "Please enter a URL first";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageVerdict {
    Scam,
    Legit,
}

impl MessageVerdict {
    /// Only an explicit `"scam"` is treated as a scam.
    pub fn from_prediction(prediction: &str) -> Self {
        if prediction == "scam" {
            MessageVerdict::Scam
        } else {
            MessageVerdict::Legit
        }
    }

    pub fn report(self) -> VerdictReport {
        match self {
            MessageVerdict::Scam => VerdictReport {
                status: "SCAM",
                message: "This message is likely a scam. Be cautious!",
                color: "red",
            },
            MessageVerdict::Legit => VerdictReport {
                status: "LEGIT",
                message: "This message seems safe.",
                color: "green",
            },
        }
    }
}

/// URL classes emitted by the prediction service. Anything else, including
/// labels from older model builds, is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlVerdict {
    Benign,
    Phishing,
    Malware,
    Defacement,
    Unknown,
}

impl UrlVerdict {
    pub fn from_prediction(prediction: &str) -> Self {
        match prediction {
            "benign" => UrlVerdict::Benign,
            "phishing" => UrlVerdict::Phishing,
            "malware" => UrlVerdict::Malware,
            "defacement" => UrlVerdict::Defacement,
            _ => UrlVerdict::Unknown,
        }
    }

    pub fn is_safe(self) -> bool {
        matches!(self, UrlVerdict::Benign)
    }

    pub fn report(self) -> VerdictReport {
        match self {
            UrlVerdict::Benign => VerdictReport {
                status: "SAFE",
                message: "This URL appears to be safe.",
                color: "green",
            },
            UrlVerdict::Phishing => VerdictReport {
                status: "PHISHING",
                message: "This URL is likely a phishing attempt!",
                color: "orange",
            },
            UrlVerdict::Malware => VerdictReport {
                status: "MALWARE",
                message: "This URL may contain malware. Avoid immediately!",
                color: "red",
            },
            UrlVerdict::Defacement => VerdictReport {
                status: "DEFACEMENT",
                message: "This site appears to be tampered with or defaced.",
                color: "purple",
            },
            UrlVerdict::Unknown => VerdictReport {
                status: "UNKNOWN",
                message: "Unable to classify this URL.",
                color: "gray",
            },
        }
    }
}

/// Classify a text message. Blank input never reaches the service.
pub async fn classify_message<C>(service: &C, text: &str) -> EngineResult<MessageVerdict>
where
    C: ClassifierService + ?Sized,
{
    if text.trim().is_empty() {
        return Err(EngineError::Validation(EMPTY_TEXT.into()));
    }
    let p = service.predict_message(text).await?;
    tracing::info!(prediction = %p.prediction, "message classified");
    Ok(MessageVerdict::from_prediction(&p.prediction))
}

/// Classify a URL. Blank input never reaches the service.
pub async fn classify_url<C>(service: &C, url: &str) -> EngineResult<UrlVerdict>
where
    C: ClassifierService + ?Sized,
{
    if url.trim().is_empty() {
        return Err(EngineError::Validation(EMPTY_URL.into()));
    }
    let p = service.predict_url(url).await?;
    let verdict = UrlVerdict::from_prediction(&p.prediction);
    if verdict == UrlVerdict::Unknown {
        tracing::warn!(prediction = %p.prediction, "unrecognized URL class");
    } else {
        tracing::info!(prediction = %p.prediction, "url classified");
    }
    Ok(verdict)
}

/// Report for a finished message check, collapsing service failures.
pub fn message_report(outcome: &EngineResult<MessageVerdict>) -> VerdictReport {
    match outcome {
        Ok(v) => v.report(),
        Err(_) => MESSAGE_ERROR_REPORT,
    }
}

/// Report for a finished URL check, collapsing service failures.
pub fn url_report(outcome: &EngineResult<UrlVerdict>) -> VerdictReport {
    match outcome {
        Ok(v) => v.report(),
        Err(_) => URL_ERROR_REPORT,
    }
}
