//! Client for the remote air-quality backend.
//!
//! [`HttpClient`] is the transport seam, [`BasicClient`] the reqwest-backed
//! implementation, and [`ApiClient`] the typed endpoints on top.

mod backend;
mod basic;
mod client;
pub mod types;

pub use backend::ApiClient;
pub use basic::BasicClient;
pub use client::HttpClient;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not logged in")]
    NotAuthenticated,

    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("{context} request failed with status {status}: {message}")]
    Status {
        context: &'static str,
        status: StatusCode,
        message: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status of a rejected request, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            _ => None,
        }
    }
}
