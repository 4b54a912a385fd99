use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::adapters::url_validation::validate_service_host;
use crate::domain::error::{EngineError, EngineResult};

/// Centralized defaults for the engine.
/// All opinionated defaults should be defined here for consistency.
pub struct EngineDefaults;

impl EngineDefaults {
    // Hosts the mobile builds shipped with; overridden per deployment.
    pub const API_HOST: &'static str = "http://192.168.1.33:5000";
    pub const CLASSIFIER_HOST: &'static str = "http://192.168.1.33:8000";

    // Environment keys read by `ServiceConfig::from_env`.
    pub const API_HOST_ENV: &'static str = "SCAMSHIELD_API_HOST";
    pub const CLASSIFIER_HOST_ENV: &'static str = "SCAMSHIELD_CLASSIFIER_HOST";

    // Both services are reached over plain HTTP on the local network.
    pub const ALLOW_INSECURE_HTTP: bool = true;

    // No request timeout: a hung call keeps the session in `Submitting`.
    pub const REQUEST_TIMEOUT_SECS: Option<u64> = None;
    pub const MAX_MEDIA_SIZE: u64 = 32 * 1024 * 1024; // 32 MB per image
}

/// Per-session limits on uploads and network waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max size of a single selfie or document upload.
    pub max_media_size: u64,
    /// Opt-in total timeout for each remote call.
    pub request_timeout_secs: Option<u64>,
}

impl LimitsConfig {
    /// Opinionated production defaults.
    pub fn defaults() -> Self {
        Self {
            max_media_size: EngineDefaults::MAX_MEDIA_SIZE,
            request_timeout_secs: EngineDefaults::REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Where the remote services live and how to talk to them.
///
/// Built once by the host application and injected into the services; the
/// engine never reads the process environment on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Host of the quality-check and verification endpoints.
    pub base_host: String,
    /// Host of the message and URL prediction endpoints.
    pub classifier_host: String,
    pub allow_insecure_http: bool,
    pub limits: LimitsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ServiceConfig {
    pub fn defaults() -> Self {
        Self {
            base_host: EngineDefaults::API_HOST.to_string(),
            classifier_host: EngineDefaults::CLASSIFIER_HOST.to_string(),
            allow_insecure_http: EngineDefaults::ALLOW_INSECURE_HTTP,
            limits: LimitsConfig::defaults(),
        }
    }

    /// Hosts from `SCAMSHIELD_API_HOST` / `SCAMSHIELD_CLASSIFIER_HOST`,
    /// falling back to the built-in defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServiceConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, fallback: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        Self {
            base_host: pick(EngineDefaults::API_HOST_ENV, EngineDefaults::API_HOST),
            classifier_host: pick(
                EngineDefaults::CLASSIFIER_HOST_ENV,
                EngineDefaults::CLASSIFIER_HOST,
            ),
            ..Self::defaults()
        }
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> EngineResult<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_file(path: &Path) -> EngineResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Render as TOML, e.g. to seed a config file with the defaults.
    pub fn to_toml_string(&self) -> EngineResult<String> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.base_url()?;
        self.classifier_url()?;
        Ok(())
    }

    /// Normalized verification host (always ends in `/`).
    pub fn base_url(&self) -> EngineResult<Url> {
        validate_service_host(&self.base_host, self.allow_insecure_http)
    }

    /// Normalized classifier host (always ends in `/`).
    pub fn classifier_url(&self) -> EngineResult<Url> {
        validate_service_host(&self.classifier_host, self.allow_insecure_http)
    }
}
