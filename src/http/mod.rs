//! HTTP client module
//!
//! reqwest-based client with retry, backoff, and governor rate limiting.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
