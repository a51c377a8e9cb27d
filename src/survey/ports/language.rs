//! Port for the remote language detection service.

use async_trait::async_trait;
use thiserror::Error;

/// Remote service returning the dominant language of a text document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageDetectionClient: Send + Sync {
    /// Detects the language of `text`, returning its ISO 639-1 code as
    /// reported by the service.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageDetectionError`] when the request fails or the
    /// response does not carry a detected language.
    async fn detect_language(&self, text: &str) -> Result<String, LanguageDetectionError>;
}

/// Errors from the language detection service.
#[derive(Debug, Error)]
pub enum LanguageDetectionError {
    /// The HTTP request itself failed.
    #[error("language detection request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("language detection service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service rejected the submitted document.
    #[error("language detection rejected the document: {0}")]
    Document(String),

    /// The response carried no detected language.
    #[error("language detection response contained no result")]
    EmptyResult,
}
