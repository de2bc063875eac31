//! REST transport to the BizCore backend

pub mod client;

use serde::Deserialize;
use thiserror::Error;

pub use client::ApiClient;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8091/api";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the token; the session has been cleared
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response had no body")]
    EmptyBody,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// A collection endpoint that may or may not wrap its items in a page
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Page {
        #[serde(default)]
        content: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Page { content: items } => items,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
