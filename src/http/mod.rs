//! HTTP client module wrapping the shared transport.

mod client;

pub use client::HttpClient;
