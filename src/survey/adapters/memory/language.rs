//! Language detection client answering from a fixed script.

use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::survey::ports::{LanguageDetectionClient, LanguageDetectionError};

/// Language client returning the same answer for every document.
#[derive(Debug, Clone)]
pub struct FixedLanguageClient {
    answer: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl FixedLanguageClient {
    /// Creates a client that always detects `code`.
    #[must_use]
    pub fn detecting(code: impl Into<String>) -> Self {
        Self {
            answer: Some(code.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a client whose every call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns how many documents were submitted.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageDetectionClient for FixedLanguageClient {
    async fn detect_language(&self, _text: &str) -> Result<String, LanguageDetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .ok_or(LanguageDetectionError::EmptyResult)
    }
}
