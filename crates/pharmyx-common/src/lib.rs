//! pharmyx-common — Shared error types and HTTP plumbing used across all Pharmyx crates.

pub mod error;
pub mod http;

// Re-export commonly used types
pub use error::{PharmyxError, Result};
pub use http::{build_http_client, HttpSettings};
