//! Port for loading localized survey templates.

use crate::survey::domain::{IssueTemplate, LanguageCode};
use thiserror::Error;

/// Source of survey issue templates.
pub trait TemplateSource: Send + Sync {
    /// Loads the template for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] when no template exists for the
    /// language and [`TemplateError::Io`] when it cannot be read.
    fn load(&self, language: LanguageCode) -> Result<IssueTemplate, TemplateError>;
}

/// Errors while loading a survey template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template file exists for the language.
    #[error("survey template '{file_name}' for language '{language}' not found")]
    NotFound {
        /// Requested language.
        language: LanguageCode,
        /// Expected file name.
        file_name: String,
    },

    /// The template exists but could not be read.
    #[error("failed to read survey template '{file_name}': {source}")]
    Io {
        /// Template file name.
        file_name: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
