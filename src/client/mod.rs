//! HTTP client for the directory API and screen assets.

mod api;
mod error;

pub use api::ApiClient;
pub use error::ClientError;
