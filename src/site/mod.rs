//! Client for the OptiFine download site's two HTML endpoints.

mod client;

pub use client::{DEFAULT_BASE_URL, FetchMarkup, OptiFineSite};

#[cfg(test)]
pub use client::MockFetchMarkup;
