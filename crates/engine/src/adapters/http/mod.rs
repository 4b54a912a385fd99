//! reqwest-backed implementation of the service traits.

mod constants;
mod client;
mod multipart;

pub use constants::*;
pub use client::*;
pub use multipart::*;
