//! HTTP client module
//!
//! Fetches response bodies and hands them to the structured decoder.
//!
//! # Features
//!
//! - **Format Negotiation**: `Accept` header for the preferred format
//! - **Content-Type Detection**: XML/JSON picked from the response header
//! - **Status Handling**: non-2xx responses fail unless `expect_success` is off

mod client;

pub use client::{FetchedBody, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
