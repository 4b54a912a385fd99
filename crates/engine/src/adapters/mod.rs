pub mod url_validation;

#[cfg(feature = "http")]
pub mod http;
