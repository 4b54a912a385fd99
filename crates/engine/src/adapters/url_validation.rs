use url::Url;

use crate::domain::error::{EngineError, EngineResult};

/// Validate a service host and normalize it for joining endpoint paths.
///
/// The returned URL always has a path ending in `/`, so
/// `url.join("verify")` lands under any path prefix instead of replacing it.
pub fn validate_service_host(host: &str, allow_http: bool) -> EngineResult<Url> {
  let trimmed = host.trim();
  if trimmed.is_empty() {
    return Err(EngineError::Config("service host is empty".into()));
  }
  let mut url = Url::parse(trimmed)
    .map_err(|e| EngineError::Config(format!("invalid service host {trimmed:?}: {e}")))?;
  match url.scheme() {
    "https" => {}
    "http" => {
      if !allow_http {
        return Err(EngineError::Config("HTTP URLs are not allowed".into()));
      }
    }
    _ => return Err(EngineError::Config("unsupported URL scheme".into())),
  }
  if url.host().is_none() {
    return Err(EngineError::Config("URL missing host".into()));
  }
  if !url.username().is_empty() || url.password().is_some() {
    return Err(EngineError::Config("credentials in service host are not allowed".into()));
  }
  if url.query().is_some() || url.fragment().is_some() {
    return Err(EngineError::Config("service host must not carry a query or fragment".into()));
  }
  if !url.path().ends_with('/') {
    let path = format!("{}/", url.path());
    url.set_path(&path);
  }
  Ok(url)
}

/// Resolve an endpoint path (e.g. `check-quality`) against a normalized host.
pub fn endpoint_url(base: &Url, path: &str) -> EngineResult<Url> {
  base
    .join(path.trim_start_matches('/'))
    .map_err(|e| EngineError::Config(format!("invalid endpoint {path:?}: {e}")))
}
