mod common;

use std::sync::atomic::Ordering;

use common::{FakeClassifier, Reply};
use scamshield_engine as se;
use se::{EngineError, MessageVerdict, UrlVerdict};

#[tokio::test]
async fn scam_message_is_flagged() {
    let svc = FakeClassifier::new(Reply::Ok("scam".into()));
    let outcome = se::classify_message(&svc, "Claim your reward now").await;
    assert_eq!(outcome.as_ref().unwrap(), &MessageVerdict::Scam);
    let report = se::message_report(&outcome);
    assert_eq!(report.status, "SCAM");
    assert_eq!(report.color, "red");
}

#[tokio::test]
async fn anything_but_scam_reads_as_legit() {
    for label in ["legit", "ham", ""] {
        let svc = FakeClassifier::new(Reply::Ok(label.into()));
        let v = se::classify_message(&svc, "lunch at noon?").await.unwrap();
        assert_eq!(v, MessageVerdict::Legit);
    }
}

#[tokio::test]
async fn message_text_is_sent_untrimmed() {
    let svc = FakeClassifier::new(Reply::Ok("legit".into()));
    se::classify_message(&svc, "  hello \n").await.unwrap();
    assert_eq!(svc.last_input.lock().unwrap().as_deref(), Some("  hello \n"));
}

#[tokio::test]
async fn blank_message_is_rejected_locally() {
    let svc = FakeClassifier::new(Reply::Ok("scam".into()));
    let err = se::classify_message(&svc, " \t ").await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(ref m) if m == "Please enter some text first"));
    assert_eq!(svc.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn message_service_failure_renders_error_report() {
    let svc = FakeClassifier::new(Reply::NetworkDown);
    let outcome = se::classify_message(&svc, "hi").await;
    assert!(outcome.is_err());
    let report = se::message_report(&outcome);
    assert_eq!(report.status, "ERROR");
    assert_eq!(report.message, "Failed to analyze text.");
}

#[tokio::test]
async fn url_classes_map_to_labels() {
    let cases = [
        ("benign", UrlVerdict::Benign, "SAFE"),
        ("phishing", UrlVerdict::Phishing, "PHISHING"),
        ("malware", UrlVerdict::Malware, "MALWARE"),
        ("defacement", UrlVerdict::Defacement, "DEFACEMENT"),
        ("malicious", UrlVerdict::Unknown, "UNKNOWN"),
    ];
    for (label, verdict, status) in cases {
        let svc = FakeClassifier::new(Reply::Ok(label.into()));
        let outcome = se::classify_url(&svc, "https://example.com").await;
        assert_eq!(outcome.as_ref().unwrap(), &verdict);
        assert_eq!(se::url_report(&outcome).status, status);
    }
}

#[tokio::test]
async fn blank_url_is_rejected_locally() {
    let svc = FakeClassifier::new(Reply::Ok("benign".into()));
    let err = se::classify_url(&svc, "").await.unwrap_err();
    assert!(err.is_local());
    assert_eq!(svc.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn url_service_failure_renders_error_report() {
    let svc = FakeClassifier::new(Reply::Status(503));
    let outcome = se::classify_url(&svc, "https://example.com").await;
    let report = se::url_report(&outcome);
    assert_eq!(report.status, "ERROR");
    assert_eq!(report.message, "Could not check URL. Please try again.");
}
