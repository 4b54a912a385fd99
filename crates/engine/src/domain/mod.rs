pub mod capture;
pub mod classify;
pub mod content_detection;
pub mod error;
pub mod notify;
pub mod service;
pub mod types;
pub mod verify;
