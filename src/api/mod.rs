//! Control API client
//!
//! This module handles all HTTP traffic to the crawler control backend:
//! - Selecting the base endpoint fixed at build time
//! - Attaching the fixed header set to every request
//! - Classifying transport, HTTP and decoding failures into `ApiError`

mod client;
mod environment;

pub use client::{build_http_client, fixed_headers, ApiClient};
pub use environment::Environment;
