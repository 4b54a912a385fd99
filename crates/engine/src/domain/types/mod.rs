// Re-export all types so callers can `use domain::types::*`
// while the definitions stay split by concern.

pub use core::*;
pub use media::*;
pub use config::*;

// Module declarations
mod core;
mod media;
mod config;
