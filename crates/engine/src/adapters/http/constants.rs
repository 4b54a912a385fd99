// Endpoint paths, relative to the configured hosts.
pub const CHECK_QUALITY_PATH: &str = "check-quality";
pub const VERIFY_PATH: &str = "verify";
pub const PREDICT_MESSAGE_PATH: &str = "predict/message";
pub const PREDICT_URL_PATH: &str = "predict/url";

// Error bodies are logged, never shown; keep them short.
pub const MAX_ERROR_BODY_CHARS: usize = 512;
